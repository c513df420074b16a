//! Rotation-based 2D Hilbert mapping on an `n x n` grid.
//!
//! This is the classic quadrant-rotation formulation. It numbers the curve
//! independently of the N-dimensional transpose in [`crate::hilbert`], so the
//! two may disagree on the index of a given cell; each is only consistent with
//! itself. `side` must be a power of two.

use std::mem;

/// Rotate or flip a quadrant of side `s` so the sub-curve has the right
/// orientation.
fn rotate(s: u32, x: &mut u32, y: &mut u32, rx: u32, ry: u32) {
    if ry == 0 {
        if rx == 1 {
            *x = s - 1 - *x;
            *y = s - 1 - *y;
        }
        mem::swap(x, y);
    }
}

/// Curve index of `(x, y)` on a `side x side` grid.
pub fn xy2d(side: u32, x: u32, y: u32) -> u64 {
    let (mut x, mut y) = (x, y);
    let mut d = 0u64;
    let mut s = side / 2;
    while s > 0 {
        let rx = u32::from(x & s != 0);
        let ry = u32::from(y & s != 0);
        d += u64::from(s) * u64::from(s) * u64::from((3 * rx) ^ ry);
        // Only the bits below `s` matter from here on.
        x &= s - 1;
        y &= s - 1;
        rotate(s, &mut x, &mut y, rx, ry);
        s /= 2;
    }
    d
}

/// Grid cell at curve index `d` on a `side x side` grid.
pub fn d2xy(side: u32, d: u64) -> (u32, u32) {
    let (mut x, mut y) = (0u32, 0u32);
    let mut t = d;
    let mut s = 1u32;
    while s < side {
        let rx = (1 & (t / 2)) as u32;
        let ry = (1 & (t ^ u64::from(rx))) as u32;
        rotate(s, &mut x, &mut y, rx, ry);
        x += s * rx;
        y += s * ry;
        t /= 4;
        match s.checked_mul(2) {
            Some(next) => s = next,
            None => break,
        }
    }
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_two() {
        assert_eq!(xy2d(2, 0, 0), 0);
        assert_eq!(xy2d(2, 0, 1), 1);
        assert_eq!(xy2d(2, 1, 1), 2);
        assert_eq!(xy2d(2, 1, 0), 3);
    }

    #[test]
    fn test_endpoints() {
        for n in [2u32, 4, 8, 16, 32] {
            assert_eq!(d2xy(n, 0), (0, 0));
            assert_eq!(d2xy(n, u64::from(n) * u64::from(n) - 1), (n - 1, 0));
        }
    }

    #[test]
    fn test_symmetry() {
        for n in [1u32, 2, 4, 8, 16] {
            for d in 0..u64::from(n * n) {
                let (x, y) = d2xy(n, d);
                assert!(x < n && y < n);
                assert_eq!(xy2d(n, x, y), d);
            }
        }
    }

    #[test]
    fn test_continuity() {
        let n = 32u32;
        for d in 1..u64::from(n * n) {
            let (x0, y0) = d2xy(n, d - 1);
            let (x1, y1) = d2xy(n, d);
            assert_eq!(x0.abs_diff(x1) + y0.abs_diff(y1), 1, "step {d}");
        }
    }

    #[test]
    fn test_large_side() {
        let n = 1u32 << 31;
        let (x, y) = (n - 5, 12345);
        assert_eq!(d2xy(n, xy2d(n, x, y)), (x, y));
    }
}
