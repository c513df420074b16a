//! Error types for Hilbert indexing and curve lookups.

use thiserror::Error;

/// Errors produced by point construction, indexing and curve lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A coordinate does not fit in the bit width reserved per axis.
    #[error("coordinate {value} does not fit in {bits} bits (must be smaller than 2^{bits})")]
    CoordinateOutOfRange {
        /// The offending coordinate.
        value: u64,
        /// Bits available per dimension.
        bits: u32,
    },

    /// Signed input contained a negative coordinate.
    #[error("coordinate {value} is negative")]
    NegativeCoordinate {
        /// The offending coordinate.
        value: i64,
    },

    /// An unsigned coordinate does not fit in an `i32`.
    #[error("coordinate {value} does not fit in a signed 32-bit integer")]
    SignedOverflow {
        /// The offending coordinate.
        value: u32,
    },

    /// Coordinates are 32-bit words, so at most 32 bits fit per axis.
    #[error("bit depth {bits} is out of range [0, 32]")]
    BitDepthTooLarge {
        /// The requested bit depth.
        bits: u32,
    },

    /// Two operands disagree on dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality required by the receiver.
        expected: usize,
        /// Dimensionality supplied by the caller.
        actual: usize,
    },

    /// Curves can only be materialized over 2D or 3D grids.
    #[error("unsupported curve dimension {dimension}: only 2 and 3 are supported")]
    UnsupportedDimension {
        /// The requested dimension.
        dimension: u32,
    },

    /// A curve grid needs at least one point per side.
    #[error("curve side length must be at least 1")]
    EmptyGrid,

    /// The scaled coordinate is not one of the curve's grid points.
    #[error("coordinate {coordinate:?} outside bounds of this curve")]
    OutsideCurve {
        /// The coordinate as supplied by the caller.
        coordinate: Vec<f32>,
    },
}

/// Convenience result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
