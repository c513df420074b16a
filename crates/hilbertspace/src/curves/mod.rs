//! Materialized Hilbert curves over bounded grids.

/// Full enumeration of a 2D or 3D grid in curve order.
pub mod grid;
/// The classic rotation-based 2D mapping.
pub mod hilbert2;

pub use grid::{GridCoord, HilbertCurve};
