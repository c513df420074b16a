//! Command handlers for the `hspace` CLI.
//!
//! Each handler returns the text to print so it can be checked without
//! spawning the binary.

use std::fmt::Write;

use anyhow::{Result, bail};
use hilbertspace::{
    BigUint, HilbertCurve, HilbertPoint, calc_hilbert_index,
    curves::hilbert2,
    hilbert_coordinates,
    ops,
};
use log::info;

/// Join coordinates as `x,y,z`.
fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Hilbert index of `coords`, inferring the bit depth when `bits` is `None`.
pub fn index(coords: &[u32], bits: Option<u32>) -> Result<String> {
    if coords.is_empty() {
        bail!("at least one coordinate is required");
    }
    let bits = match bits {
        Some(bits) => bits,
        None => ops::find_bits_per_dimension_for_points(&[coords]),
    };
    let point = HilbertPoint::new(coords, bits)?;
    info!("{} dimensions at {bits} bits", point.dimensions());
    Ok(point.hilbert_index().to_string())
}

/// Coordinates of the point at `index` on the `dimensions` x `bits` curve.
pub fn point(index: &BigUint, dimensions: u32, bits: u32) -> Result<String> {
    if index.bits() > u64::from(dimensions) * u64::from(bits) {
        bail!("index {index} does not fit {dimensions} dimensions of {bits} bits");
    }
    let coords = hilbert_coordinates(index, dimensions, bits)?;
    debug_assert_eq!(calc_hilbert_index(&coords, bits).as_ref(), Ok(index));
    Ok(join(&coords))
}

/// Every cell of the curve, one `coords proportion` line each.
pub fn curve(side: u32, three_d: bool) -> Result<String> {
    let curve = build_curve(side, three_d)?;
    let dims = curve.dimension() as usize;
    let mut out = String::new();
    for cell in curve.points() {
        let coord: Vec<f32> = cell[..dims].iter().map(|&c| c as f32).collect();
        let proportion = curve.proportion_of_length(&coord)?;
        writeln!(out, "{} {proportion:.6}", join(&cell[..dims]))?;
    }
    Ok(out)
}

/// Proportion of the curve length at `coordinate`.
pub fn proportion(side: u32, three_d: bool, coordinate: &[f32]) -> Result<String> {
    let curve = build_curve(side, three_d)?;
    Ok(format!("{:.6}", curve.proportion_of_length(coordinate)?))
}

/// Distance along the 2D curve for cell `(x, y)`.
pub fn xy2d(side: u32, x: u32, y: u32) -> Result<String> {
    check_side(side)?;
    if x >= side || y >= side {
        bail!("({x}, {y}) is outside a {side}x{side} grid");
    }
    Ok(hilbert2::xy2d(side, x, y).to_string())
}

/// Cell at distance `d` along the 2D curve.
pub fn d2xy(side: u32, d: u64) -> Result<String> {
    check_side(side)?;
    let cells = u64::from(side) * u64::from(side);
    if d >= cells {
        bail!("distance {d} is past the end of a {side}x{side} curve");
    }
    let (x, y) = hilbert2::d2xy(side, d);
    Ok(format!("{x},{y}"))
}

/// Build a 2D or 3D grid curve.
fn build_curve(side: u32, three_d: bool) -> Result<HilbertCurve> {
    let curve = if three_d {
        HilbertCurve::make_3d(side)?
    } else {
        HilbertCurve::make_2d(side)?
    };
    info!("curve of {} cells", curve.len());
    Ok(curve)
}

/// The classic mapping needs a non-zero power-of-two side.
fn check_side(side: u32) -> Result<()> {
    if !side.is_power_of_two() {
        bail!("side must be a power of two, got {side}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_infers_bits() {
        assert_eq!(index(&[3, 0], Some(2)).unwrap(), "15");
        assert_eq!(index(&[3, 0], None).unwrap(), "15");
        assert!(index(&[4, 0], Some(2)).is_err());
        assert!(index(&[], None).is_err());
    }

    #[test]
    fn point_inverts_index() {
        assert_eq!(point(&BigUint::from(15u32), 2, 2).unwrap(), "3,0");
        assert!(point(&BigUint::from(16u32), 2, 2).is_err());
        assert!(point(&BigUint::from(0u32), 2, 33).is_err());
    }

    #[test]
    fn curve_lines() {
        let out = curve(2, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "0,0 0.000000");
        assert_eq!(lines[3], "1,0 1.000000");
    }

    #[test]
    fn proportions() {
        assert_eq!(proportion(4, false, &[3.0, 0.0]).unwrap(), "1.000000");
        assert!(proportion(4, false, &[9.0, 0.0]).is_err());
        assert!(proportion(0, true, &[0.0]).is_err());
    }

    #[test]
    fn classic_mapping() {
        assert_eq!(xy2d(4, 3, 0).unwrap(), "15");
        assert_eq!(d2xy(4, 15).unwrap(), "3,0");
        assert!(xy2d(3, 0, 0).is_err());
        assert!(xy2d(4, 4, 0).is_err());
        assert!(d2xy(4, 16).is_err());
    }
}
