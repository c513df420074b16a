//! Hilbert space-filling curve indexing for points in unsigned integer space.
//!
//! The pipeline runs from raw coordinates to curve order:
//!
//! - [`point::UnsignedPoint`] holds coordinates with cached magnitude and hash.
//! - [`ops`] converts between Cartesian axes and the transposed Hilbert form.
//! - [`interleave::HilbertInterleaver`] packs the transposed form into an
//!   arbitrary-precision index, memoized per shape by
//!   [`interleave::InterleaverCache`].
//! - [`hilbert::HilbertPoint`] pairs a point with its index and sorts by it.
//! - [`curves::HilbertCurve`] materializes a full 2D or 3D grid in curve order.
//!
//! All operations are synchronous and CPU-bound. The only shared state is the
//! interleaver cache and the id counter, both safe to use from many threads.

/// Materialized curves and the classic 2D mapping.
pub mod curves;
/// Error types used across the crate.
pub mod error;
/// Hilbert-indexed points and index calculation.
pub mod hilbert;
/// Bit interleaving and the interleaver cache.
pub mod interleave;
/// Bit-level transforms and bit depth helpers.
pub mod ops;
/// Unsigned integer points.
pub mod point;

pub use num_bigint::BigUint;

pub use crate::{
    curves::HilbertCurve,
    error::{Error, Result},
    hilbert::{HilbertPoint, calc_hilbert_index, hilbert_coordinates},
    interleave::{HilbertInterleaver, InterleaverCache},
    point::UnsignedPoint,
};
