//! A Hilbert curve materialized over every cell of a 2D or 3D grid.
//!
//! Construction enumerates all `side^dimension` cells, so cost grows with the
//! cube of the side for 3D curves. Bounding the side is up to the caller.

use std::collections::HashMap;

use log::debug;

use crate::{
    error::{Error, Result},
    hilbert::HilbertPoint,
    ops,
};

/// Grid cell as `[x, y, z]`; 2D curves keep `z` at zero.
pub type GridCoord = [u32; 3];

/// Every cell of a square or cube grid, in Hilbert order.
#[derive(Debug, Clone)]
pub struct HilbertCurve {
    /// Cells per side.
    side: u32,
    /// 2 or 3.
    dimension: u32,
    /// Cells sorted by strictly increasing Hilbert index.
    nodes: Vec<GridCoord>,
    /// Cell to `position / (count - 1)`.
    proportions: HashMap<GridCoord, f32>,
    /// Multiplier from caller coordinates to grid coordinates.
    scale_factor: f32,
}

impl HilbertCurve {
    /// Curve through every cell of a `side x side` square.
    pub fn make_2d(side: u32) -> Result<Self> {
        Self::make(2, side)
    }

    /// Curve through every cell of a `side x side x side` cube.
    pub fn make_3d(side: u32) -> Result<Self> {
        Self::make(3, side)
    }

    /// Curve through every cell of a `dimension`-cube with `side` cells per
    /// axis. Only 2 and 3 dimensions are supported.
    pub fn make(dimension: u32, side: u32) -> Result<Self> {
        if !(2..=3).contains(&dimension) {
            return Err(Error::UnsupportedDimension { dimension });
        }
        if side == 0 {
            return Err(Error::EmptyGrid);
        }
        let bits = ops::find_bits_per_dimension(side - 1).max(1);

        let mut points = enumerate_cells(dimension, side)
            .into_iter()
            .map(|cell| HilbertPoint::new(&cell[..dimension as usize], bits))
            .collect::<Result<Vec<_>>>()?;
        HilbertPoint::sort_by_hilbert_index(&mut points);

        let nodes: Vec<GridCoord> = points
            .iter()
            .map(|p| {
                let mut cell = [0; 3];
                cell[..p.dimensions()].copy_from_slice(p.coordinates());
                cell
            })
            .collect();
        let span = nodes.len().saturating_sub(1) as f32;
        let proportions = nodes
            .iter()
            .enumerate()
            .map(|(i, &cell)| {
                let proportion = if span > 0.0 { i as f32 / span } else { 0.0 };
                (cell, proportion)
            })
            .collect();

        debug!(
            "materialized {dimension}D Hilbert curve: side {side}, {bits} bits, {} cells",
            nodes.len()
        );
        Ok(Self {
            side,
            dimension,
            nodes,
            proportions,
            scale_factor: 1.0,
        })
    }

    /// Use `scale_factor` to map caller coordinates onto grid cells.
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Cells per side.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Number of axes (2 or 3).
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Multiplier from caller coordinates to grid coordinates.
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Number of cells on the curve.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a curve holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cells in curve order.
    pub fn points(&self) -> &[GridCoord] {
        &self.nodes
    }

    /// Steps from the first to the last cell, in caller units.
    pub fn length(&self) -> f32 {
        self.nodes.len().saturating_sub(1) as f32 / self.scale_factor
    }

    /// Position of `coordinate` along the curve, from 0.0 at the first cell to
    /// 1.0 at the last.
    ///
    /// Takes up to three coordinates; missing trailing ones are zero. The
    /// coordinate is scaled and rounded to the nearest cell. Anything that
    /// does not land on a cell of this curve is an error.
    pub fn proportion_of_length(&self, coordinate: &[f32]) -> Result<f32> {
        if coordinate.len() > 3 {
            return Err(Error::DimensionMismatch {
                expected: 3,
                actual: coordinate.len(),
            });
        }
        let outside = || Error::OutsideCurve {
            coordinate: coordinate.to_vec(),
        };
        let mut cell: GridCoord = [0; 3];
        for (slot, &c) in cell.iter_mut().zip(coordinate) {
            let scaled = (c * self.scale_factor).round();
            if !scaled.is_finite() || scaled < 0.0 || scaled > u32::MAX as f32 {
                return Err(outside());
            }
            *slot = scaled as u32;
        }
        self.proportions.get(&cell).copied().ok_or_else(outside)
    }
}

/// Every cell of the grid, in row-major order.
fn enumerate_cells(dimension: u32, side: u32) -> Vec<GridCoord> {
    let depth = if dimension == 3 { side } else { 1 };
    let mut cells = Vec::with_capacity(side as usize * side as usize * depth as usize);
    for x in 0..side {
        for y in 0..side {
            for z in 0..depth {
                cells.push([x, y, z]);
            }
        }
    }
    cells
}
