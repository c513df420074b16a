//! Immutable points in unsigned integer space.
//!
//! Points carry a unique id and compare by identity: two points built from the
//! same coordinates are distinct values. Use
//! [`UnsignedPoint::same_coordinates`] for coordinate equality.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering as AtomicOrdering},
    },
};

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Default number of coordinates rendered by `Display`.
pub const MAX_COORDINATES_TO_SHOW: usize = 10;

/// Monotonic source of point ids.
///
/// Ids are unique per source. Points built with [`UnsignedPoint::new`] draw
/// from [`IdSource::global`].
#[derive(Debug, Default)]
pub struct IdSource {
    /// Last id handed out.
    counter: AtomicU64,
}

impl IdSource {
    /// Create a source whose first id is 1.
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// The process-wide source.
    pub fn global() -> &'static Self {
        /// Backing storage for [`IdSource::global`].
        static GLOBAL: IdSource = IdSource::new();
        &GLOBAL
    }

    /// Hand out the next id.
    pub fn next_id(&self) -> u64 {
        self.counter.fetch_add(1, AtomicOrdering::Relaxed) + 1
    }
}

/// Seeded XOR-shift mix over the coordinates and their count.
fn coordinate_hash(coords: &[u32]) -> u32 {
    coords.iter().fold(coords.len() as u32, |seed, &c| {
        seed ^ c
            .wrapping_add(0x9e37_79b9)
            .wrapping_add(seed << 6)
            .wrapping_add(seed >> 2)
    })
}

/// An immutable point with unsigned coordinates and cached magnitude.
#[derive(Clone, Debug)]
pub struct UnsignedPoint {
    /// Coordinate values, one per dimension.
    coords: SmallVec<[u32; 8]>,
    /// Identity used for equality and ordering.
    id: u64,
    /// Largest coordinate.
    max_coordinate: u32,
    /// Sum of squared coordinates.
    square_magnitude: u128,
    /// Square root of `square_magnitude`, computed on first use.
    magnitude: OnceLock<f64>,
    /// Cached coordinate hash.
    hash: u32,
}

impl UnsignedPoint {
    /// Create a point with a fresh id from the global source.
    pub fn new(coords: impl Into<SmallVec<[u32; 8]>>) -> Self {
        Self::with_id(coords, IdSource::global().next_id())
    }

    /// Create a point with a fresh id drawn from `ids`.
    pub fn with_id_source(coords: impl Into<SmallVec<[u32; 8]>>, ids: &IdSource) -> Self {
        Self::with_id(coords, ids.next_id())
    }

    /// Create a point with a caller-chosen id.
    ///
    /// The caller is responsible for keeping ids unique.
    pub fn with_id(coords: impl Into<SmallVec<[u32; 8]>>, id: u64) -> Self {
        let coords = coords.into();
        let max_coordinate = coords.iter().copied().max().unwrap_or(0);
        let square_magnitude = coords.iter().map(|&c| wide_product(c, c)).sum();
        let hash = coordinate_hash(&coords);
        Self {
            coords,
            id,
            max_coordinate,
            square_magnitude,
            magnitude: OnceLock::new(),
            hash,
        }
    }

    /// Create a point from signed coordinates, rejecting negative values.
    pub fn from_signed(coords: &[i32]) -> Result<Self> {
        Ok(Self::new(make_unsigned(coords)?))
    }

    /// Copy this point under a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: IdSource::global().next_id(),
            ..self.clone()
        }
    }

    /// Unique id of this point.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Coordinate values.
    pub fn coordinates(&self) -> &[u32] {
        &self.coords
    }

    /// Coordinates as signed values. Fails on any value above `i32::MAX`.
    pub fn to_signed(&self) -> Result<Vec<i32>> {
        self.coords
            .iter()
            .map(|&c| i32::try_from(c).map_err(|_| Error::SignedOverflow { value: c }))
            .collect()
    }

    /// Dimensionality of the point.
    pub fn dimensions(&self) -> usize {
        self.coords.len()
    }

    /// Largest coordinate, or zero for a point with no dimensions.
    pub fn max_coordinate(&self) -> u32 {
        self.max_coordinate
    }

    /// Sum of the squared coordinates.
    pub fn square_magnitude(&self) -> u128 {
        self.square_magnitude
    }

    /// Euclidean length of the position vector.
    pub fn magnitude(&self) -> f64 {
        *self
            .magnitude
            .get_or_init(|| (self.square_magnitude as f64).sqrt())
    }

    /// True when both points hold the same coordinates, regardless of id.
    pub fn same_coordinates(&self, other: &Self) -> bool {
        self.coords == other.coords
    }

    /// Exact squared Euclidean distance to `other`.
    ///
    /// Computed as `|a|^2 + |b|^2 - 2 a.b` from the cached magnitudes. Both
    /// points must have the same dimensionality; in debug builds a mismatch
    /// triggers a `debug_assert!`, in release builds the shared prefix is used.
    pub fn square_distance(&self, other: &Self) -> u128 {
        debug_assert!(
            self.dimensions() == other.dimensions(),
            "UnsignedPoint::square_distance called with differing dimensions: {} vs {}",
            self.dimensions(),
            other.dimensions()
        );
        let narrow = u128::from(self.max_coordinate) * u128::from(other.max_coordinate) * 4
            < u128::from(u32::MAX);
        let dot = if narrow {
            u128::from(dot_product_narrow(&self.coords, &other.coords))
        } else {
            dot_product_wide(&self.coords, &other.coords)
        };
        (self.square_magnitude + other.square_magnitude).saturating_sub(2 * dot)
    }

    /// Compare the squared distance to `other` against `target`.
    ///
    /// Returns `Greater` when the distance exceeds `target`. The bounds
    /// `(|a| - |b|)^2 <= d^2 <= |a|^2 + |b|^2` settle most comparisons without
    /// computing the dot product.
    pub fn square_distance_cmp(&self, other: &Self, target: u128) -> Ordering {
        // Integer square roots bracket each magnitude in `[r, r + 1)`, so the
        // gap between magnitudes is more than `|ra - rb| - 1`.
        let ra = self.square_magnitude.isqrt();
        let rb = other.square_magnitude.isqrt();
        let gap = ra.abs_diff(rb).saturating_sub(1);
        if target < gap * gap {
            return Ordering::Greater;
        }
        let high = self.square_magnitude.saturating_add(other.square_magnitude);
        if target > high {
            return Ordering::Less;
        }
        self.square_distance(other).cmp(&target)
    }

    /// Squared distance, used as a clustering measure.
    pub fn measure(&self, reference: &Self) -> u128 {
        self.square_distance(reference)
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        (self.square_distance(other) as f64).sqrt()
    }

    /// A new point with `value` appended as an extra trailing dimension.
    pub fn append_coordinate(&self, value: u32) -> Self {
        let mut coords = self.coords.clone();
        coords.push(value);
        Self::new(coords)
    }

    /// Per-dimension mean of `points`, rounded half to even.
    ///
    /// Returns `None` for an empty input. Dimensionality is taken from the
    /// first point.
    pub fn centroid<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut sums: Vec<f64> = first.coords.iter().map(|&c| f64::from(c)).collect();
        let mut count = 1u32;
        for p in points {
            debug_assert_eq!(p.dimensions(), sums.len(), "centroid dimension mismatch");
            for (sum, &c) in sums.iter_mut().zip(p.coords.iter()) {
                *sum += f64::from(c);
            }
            count += 1;
        }
        let n = f64::from(count);
        let coords: SmallVec<[u32; 8]> = sums
            .into_iter()
            .map(|s| (s / n).round_ties_even() as u32)
            .collect();
        Some(Self::new(coords))
    }

    /// Render at most `limit` coordinates (`0` renders all of them).
    pub fn as_string(&self, limit: usize) -> String {
        let limit = match limit {
            0 => self.dimensions(),
            n => n.min(self.dimensions()),
        };
        let shown: Vec<String> = self.coords[..limit].iter().map(u32::to_string).collect();
        let ellipsis = if limit < self.dimensions() { ",..." } else { "" };
        format!("[{}{ellipsis}]", shown.join(","))
    }
}

/// Dot product for inputs where `4 * max_a * max_b` fits in a `u32`.
fn dot_product_narrow(x: &[u32], y: &[u32]) -> u64 {
    let mut dot = 0u64;
    let mut xs = x.chunks_exact(4);
    let mut ys = y.chunks_exact(4);
    for (a, b) in (&mut xs).zip(&mut ys) {
        dot += u64::from(a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]);
    }
    for (a, b) in xs.remainder().iter().zip(ys.remainder()) {
        dot += u64::from(a * b);
    }
    dot
}

/// Product of two coordinates, widened for accumulation.
#[inline]
fn wide_product(a: u32, b: u32) -> u128 {
    u128::from(u64::from(a) * u64::from(b))
}

/// Dot product accumulated in 128 bits, exact for any `u32` coordinates.
fn dot_product_wide(x: &[u32], y: &[u32]) -> u128 {
    let mut dot = 0u128;
    let mut xs = x.chunks_exact(4);
    let mut ys = y.chunks_exact(4);
    for (a, b) in (&mut xs).zip(&mut ys) {
        dot += wide_product(a[0], b[0])
            + wide_product(a[1], b[1])
            + wide_product(a[2], b[2])
            + wide_product(a[3], b[3]);
    }
    for (&a, &b) in xs.remainder().iter().zip(ys.remainder()) {
        dot += wide_product(a, b);
    }
    dot
}

/// Convert signed coordinates to unsigned ones.
pub fn make_unsigned(coords: &[i32]) -> Result<SmallVec<[u32; 8]>> {
    coords
        .iter()
        .map(|&c| {
            u32::try_from(c).map_err(|_| Error::NegativeCoordinate {
                value: i64::from(c),
            })
        })
        .collect()
}

impl PartialEq for UnsignedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UnsignedPoint {}

impl PartialOrd for UnsignedPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UnsignedPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for UnsignedPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}

impl Deref for UnsignedPoint {
    type Target = [u32];
    fn deref(&self) -> &Self::Target {
        &self.coords
    }
}

impl fmt::Display for UnsignedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string(MAX_COORDINATES_TO_SHOW))
    }
}

impl From<&UnsignedPoint> for Vec<u32> {
    fn from(val: &UnsignedPoint) -> Self {
        val.coords.to_vec()
    }
}
