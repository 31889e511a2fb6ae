//! Grid expansion
//!
//! Readings are taken on a small patch of the shell: `cols` samples of
//! `test_area` arc length each, and `rows` samples spaced `height` apart.
//! The expander lays that patch onto a grid that covers the whole
//! circumference and the full height, copying the readings into the
//! top-left block and marking everything else unmeasured.

use thickmap_core::{
    ExpandedField, ExpansionFactors, GeometryError, GeometryParams, Grid, SourceMatrix, SENTINEL,
};
use tracing::debug;

/// Expands measurement grids for one cylinder geometry
#[derive(Debug, Clone, Copy)]
pub struct GridExpander {
    geometry: GeometryParams,
}

impl GridExpander {
    /// Create an expander for the given geometry
    pub fn new(geometry: GeometryParams) -> Self {
        Self { geometry }
    }

    /// The geometry this expander uses
    pub fn geometry(&self) -> &GeometryParams {
        &self.geometry
    }

    /// Column and row expansion factors
    pub fn factors(&self) -> ExpansionFactors {
        self.geometry.expansion_factors()
    }

    /// Expand `source` onto the full cylinder surface.
    ///
    /// The output is `floor(rows * row_factor) x floor(cols * col_factor)`.
    /// Source row 0 stays at output row 0. A column factor below 1 shrinks
    /// the grid and only the overlapping block is copied. Geometry whose
    /// output would exceed [`thickmap_core::MAX_FIELD_CELLS`] is rejected
    /// before anything is allocated.
    pub fn expand(&self, source: &SourceMatrix) -> Result<ExpandedField, GeometryError> {
        self.geometry.validate()?;

        let factors = self.factors();
        let (rows, cols) = (source.rows(), source.cols());
        let (out_rows, out_cols) = factors.output_dims(rows, cols)?;
        debug!(
            "Expanding {}x{} grid to {}x{} (row factor {:.4}, column factor {:.4})",
            rows, cols, out_rows, out_cols, factors.rows, factors.cols
        );

        if out_rows == 0 || out_cols == 0 {
            return Err(GeometryError::EmptyOutput {
                rows: out_rows,
                cols: out_cols,
            });
        }

        let mut grid = Grid::filled(out_rows, out_cols, SENTINEL);
        let source = source.grid();
        for row in 0..rows.min(out_rows) {
            for (col, value) in source.row(row).iter().take(out_cols).enumerate() {
                grid.set(row, col, *value);
            }
        }

        Ok(ExpandedField::from_grid(grid))
    }
}

/// Expand `source` with `geometry`. See [`GridExpander::expand`].
pub fn expand(
    source: &SourceMatrix,
    geometry: &GeometryParams,
) -> Result<ExpandedField, GeometryError> {
    GridExpander::new(*geometry).expand(source)
}
