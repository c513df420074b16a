//! Support operations for Hilbert index calculation.
//!
//! The forward and inverse transforms here follow Skilling's "Programming the
//! Hilbert curve" (AIP Conf. Proc. 707, 2004). Both work on the *transposed*
//! form of an index: one `u32` word per axis, where bit `b` of word `i` holds
//! index bit `b * n + (n - 1 - i)` for `n` axes.

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// One word per dimension: either Cartesian axes or a transposed index.
pub type Axes = SmallVec<[u32; 8]>;

/// Largest supported bit depth per axis.
pub const MAX_BITS: u32 = u32::BITS;

/// Reject bit depths wider than a coordinate word.
pub fn check_bit_depth(bits: u32) -> Result<()> {
    if bits > MAX_BITS {
        return Err(Error::BitDepthTooLarge { bits });
    }
    Ok(())
}

/// Reject a coordinate that needs more than `bits` bits.
pub fn check_coordinate(value: u32, bits: u32) -> Result<()> {
    if bits < MAX_BITS && u64::from(value) >= 1u64 << bits {
        return Err(Error::CoordinateOutOfRange {
            value: u64::from(value),
            bits,
        });
    }
    Ok(())
}

/// Convert Cartesian `axes` (each using `bits` bits) into the transposed
/// Hilbert index.
///
/// Empty input and `bits == 0` are returned unchanged. Fails when `bits`
/// exceeds [`MAX_BITS`].
pub fn hilbert_index_transposed(axes: &[u32], bits: u32) -> Result<Axes> {
    check_bit_depth(bits)?;
    let mut x = Axes::from_slice(axes);
    let Some(last) = x.len().checked_sub(1) else {
        return Ok(x);
    };
    if bits == 0 {
        return Ok(x);
    }

    // Inverse undo: walk from the top bit down, exchanging or inverting the
    // low bits of axis 0 against every axis.
    for level in (1..bits).rev() {
        let q = 1u32 << level;
        let p = q - 1;
        for i in 0..x.len() {
            if x[i] & q != 0 {
                x[0] ^= p;
            } else {
                let t = (x[0] ^ x[i]) & p;
                x[0] ^= t;
                x[i] ^= t;
            }
        }
    }

    // Gray encode.
    for i in 1..x.len() {
        x[i] ^= x[i - 1];
    }
    let mut t = 0;
    for level in (1..bits).rev() {
        let q = 1u32 << level;
        if x[last] & q != 0 {
            t ^= q - 1;
        }
    }
    for word in &mut x {
        *word ^= t;
    }
    Ok(x)
}

/// Convert a transposed Hilbert index back into Cartesian axes. Exact inverse
/// of [`hilbert_index_transposed`] for the same `bits`.
pub fn hilbert_axes(transposed: &[u32], bits: u32) -> Result<Axes> {
    check_bit_depth(bits)?;
    let mut x = Axes::from_slice(transposed);
    let Some(last) = x.len().checked_sub(1) else {
        return Ok(x);
    };
    if bits == 0 {
        return Ok(x);
    }

    // Gray decode.
    let mut t = x[last] >> 1;
    for i in (1..x.len()).rev() {
        x[i] ^= x[i - 1];
    }
    x[0] ^= t;

    // Undo excess work, from the low bits up.
    for level in 1..bits {
        let q = 1u32 << level;
        let p = q - 1;
        for i in (0..x.len()).rev() {
            if x[i] & q != 0 {
                x[0] ^= p;
            } else {
                t = (x[0] ^ x[i]) & p;
                x[0] ^= t;
                x[i] ^= t;
            }
        }
    }
    Ok(x)
}

/// Smallest `k` such that `2^k >= n`.
pub fn smallest_power_of_two(n: u64) -> u32 {
    match n {
        0 | 1 => 0,
        n => u64::BITS - (n - 1).leading_zeros(),
    }
}

/// Number of bits needed to represent `max`, i.e. the smallest `k` with
/// `2^k > max`.
pub fn find_bits_per_dimension(max: u32) -> u32 {
    smallest_power_of_two(u64::from(max) + 1)
}

/// Bits needed to cover the largest of a set of per-dimension maxima.
pub fn find_bits_per_dimension_for_ranges<I>(max_per_dimension: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    find_bits_per_dimension(max_per_dimension.into_iter().max().unwrap_or(0))
}

/// Bits needed to hold every coordinate of every point. Always at least one.
pub fn find_bits_per_dimension_for_points<P>(points: &[P]) -> u32
where
    P: AsRef<[u32]>,
{
    let combined = points
        .iter()
        .flat_map(|p| p.as_ref().iter().copied())
        .fold(1u32, |acc, c| acc | c);
    find_bits_per_dimension(combined)
}
