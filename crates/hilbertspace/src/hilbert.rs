//! Points ordered along an N-dimensional Hilbert curve.
//!
//! A [`HilbertPoint`] wraps an [`UnsignedPoint`] and adds its exact Hilbert
//! index for a fixed number of bits per dimension. Points sort by index, with
//! the point id breaking ties.
//!
//! Curve distance is not spatial distance. Points that are close on the curve
//! are usually close in space, but two spatial neighbours can sit far apart on
//! the curve where it crosses between large sub-cubes.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
};

use num_bigint::BigUint;
use smallvec::SmallVec;

use crate::{
    error::Result,
    interleave::InterleaverCache,
    ops::{self, Axes},
    point::{UnsignedPoint, make_unsigned},
};

/// Hilbert index of `axes`, each using `bits` bits, via the global cache.
///
/// Fails when `bits` exceeds [`ops::MAX_BITS`]. Coordinate bits above `bits`
/// are not checked here; [`HilbertPoint`] construction rejects them.
pub fn calc_hilbert_index(axes: &[u32], bits: u32) -> Result<BigUint> {
    calc_hilbert_index_in(InterleaverCache::global(), axes, bits)
}

/// Hilbert index of `axes`, each using `bits` bits, via `cache`.
pub fn calc_hilbert_index_in(
    cache: &InterleaverCache,
    axes: &[u32],
    bits: u32,
) -> Result<BigUint> {
    let transposed = ops::hilbert_index_transposed(axes, bits)?;
    Ok(cache
        .instance(axes.len() as u32, bits)
        .untranspose(&transposed))
}

/// Coordinates of the point at `index` on the curve over
/// `[0, 2^bits)^dimensions`. Inverse of [`calc_hilbert_index`].
pub fn hilbert_coordinates(index: &BigUint, dimensions: u32, bits: u32) -> Result<Axes> {
    ops::check_bit_depth(bits)?;
    let transposed = InterleaverCache::global()
        .instance(dimensions, bits)
        .transpose(index);
    ops::hilbert_axes(&transposed, bits)
}

/// A point paired with its position along the Hilbert curve.
#[derive(Clone, Debug)]
pub struct HilbertPoint {
    /// Coordinates, id and cached magnitudes.
    point: UnsignedPoint,
    /// Bits reserved for every axis.
    bits_per_dimension: u32,
    /// Position along the curve.
    hilbert_index: BigUint,
}

impl HilbertPoint {
    /// Create a point with `bits_per_dimension` bits per axis.
    ///
    /// Fails when `bits_per_dimension > 32` or any coordinate needs more bits.
    pub fn new(coords: impl Into<SmallVec<[u32; 8]>>, bits_per_dimension: u32) -> Result<Self> {
        Self::with_cache(coords, bits_per_dimension, InterleaverCache::global())
    }

    /// Like [`HilbertPoint::new`], resolving the interleaver through `cache`.
    pub fn with_cache(
        coords: impl Into<SmallVec<[u32; 8]>>,
        bits_per_dimension: u32,
        cache: &InterleaverCache,
    ) -> Result<Self> {
        Self::from_point(UnsignedPoint::new(coords), bits_per_dimension, cache)
    }

    /// Index an existing point, keeping its id.
    pub fn from_point(
        point: UnsignedPoint,
        bits_per_dimension: u32,
        cache: &InterleaverCache,
    ) -> Result<Self> {
        ops::check_bit_depth(bits_per_dimension)?;
        ops::check_coordinate(point.max_coordinate(), bits_per_dimension)?;
        let hilbert_index = calc_hilbert_index_in(cache, point.coordinates(), bits_per_dimension)?;
        Ok(Self {
            point,
            bits_per_dimension,
            hilbert_index,
        })
    }

    /// Create a point from signed coordinates with an explicit bit depth.
    pub fn from_signed(coords: &[i32], bits_per_dimension: u32) -> Result<Self> {
        Self::new(make_unsigned(coords)?, bits_per_dimension)
    }

    /// Create a point from signed coordinates, sizing the bit depth to cover
    /// the largest of `ranges` (the maximum value of each dimension).
    pub fn from_signed_with_ranges(coords: &[i32], ranges: &[i32]) -> Result<Self> {
        let ranges = make_unsigned(ranges)?;
        let bits = ops::find_bits_per_dimension_for_ranges(ranges);
        Self::from_signed(coords, bits)
    }

    /// Index a batch of signed points.
    ///
    /// When `bits_per_dimension` is `None` the depth is chosen to hold every
    /// coordinate of every point.
    pub fn transform<P>(points: &[P], bits_per_dimension: Option<u32>) -> Result<Vec<Self>>
    where
        P: AsRef<[i32]>,
    {
        let unsigned = points
            .iter()
            .map(|p| make_unsigned(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let bits = match bits_per_dimension {
            Some(bits) => bits,
            None => ops::find_bits_per_dimension_for_points(&unsigned),
        };
        unsigned
            .into_iter()
            .map(|coords| Self::new(coords, bits))
            .collect()
    }

    /// Sort points into curve order.
    pub fn sort_by_hilbert_index(points: &mut [Self]) {
        points.sort();
    }

    /// The underlying point.
    pub fn point(&self) -> &UnsignedPoint {
        &self.point
    }

    /// Bits reserved for every axis.
    pub fn bits_per_dimension(&self) -> u32 {
        self.bits_per_dimension
    }

    /// Position along the curve.
    pub fn hilbert_index(&self) -> &BigUint {
        &self.hilbert_index
    }

    /// Absolute difference between the two curve positions.
    pub fn hilbert_distance(&self, other: &Self) -> BigUint {
        if self.hilbert_index >= other.hilbert_index {
            &self.hilbert_index - &other.hilbert_index
        } else {
            &other.hilbert_index - &self.hilbert_index
        }
    }

    /// Spatial squared distance to `reference`.
    pub fn measure(&self, reference: &Self) -> u128 {
        self.point.measure(&reference.point)
    }

    /// A new point with one extra trailing dimension at the same bit depth.
    pub fn append_coordinate(&self, value: u32) -> Result<Self> {
        ops::check_coordinate(value, self.bits_per_dimension)?;
        let mut coords = SmallVec::<[u32; 8]>::from_slice(self.point.coordinates());
        coords.push(value);
        Self::new(coords, self.bits_per_dimension)
    }
}

impl PartialEq for HilbertPoint {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for HilbertPoint {}

impl PartialOrd for HilbertPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HilbertPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hilbert_index
            .cmp(&other.hilbert_index)
            .then_with(|| self.point.id().cmp(&other.point.id()))
    }
}

impl Hash for HilbertPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.point.hash(state);
    }
}

impl Deref for HilbertPoint {
    type Target = UnsignedPoint;
    fn deref(&self) -> &Self::Target {
        &self.point
    }
}

impl fmt::Display for HilbertPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.point, self.hilbert_index)
    }
}
