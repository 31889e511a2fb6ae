//! Cylinder geometry
//!
//! The physical parameters of an inspected shell and the expansion
//! factors that map a sparse measurement grid onto its full surface.

use crate::constants::MAX_FIELD_CELLS;
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Physical geometry of the inspected cylinder
///
/// All lengths share the unit of the inspection; only their ratios matter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryParams {
    /// Outer diameter of the shell
    pub outer_diameter: f64,
    /// Arc length covered by one circumferential sample
    pub test_area: f64,
    /// Spacing between row samples
    pub height: f64,
    /// Full cylinder height
    pub total_height: f64,
}

/// Column and row expansion factors derived from a [`GeometryParams`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpansionFactors {
    /// Circumference divided by test area
    pub cols: f64,
    /// Total height divided by row spacing
    pub rows: f64,
}

impl ExpansionFactors {
    /// Output dimensions for a `rows x cols` source, truncated toward zero
    ///
    /// Fails with [`GeometryError::OutputTooLarge`] when either dimension is
    /// not finite or the cell count would exceed [`MAX_FIELD_CELLS`].
    pub fn output_dims(&self, rows: usize, cols: usize) -> Result<(usize, usize), GeometryError> {
        let out_rows = (self.rows * rows as f64).floor();
        let out_cols = (self.cols * cols as f64).floor();
        let too_large = GeometryError::OutputTooLarge {
            rows: out_rows,
            cols: out_cols,
        };

        let limit = MAX_FIELD_CELLS as f64;
        let fits = |n: f64| n.is_finite() && n <= limit;
        if !(fits(out_rows) && fits(out_cols)) {
            return Err(too_large);
        }

        let dims = (out_rows as usize, out_cols as usize);
        match dims.0.checked_mul(dims.1) {
            Some(cells) if cells <= MAX_FIELD_CELLS => Ok(dims),
            _ => Err(too_large),
        }
    }
}

impl GeometryParams {
    /// Create geometry parameters
    pub fn new(outer_diameter: f64, test_area: f64, height: f64, total_height: f64) -> Self {
        Self {
            outer_diameter,
            test_area,
            height,
            total_height,
        }
    }

    /// Check every parameter is positive and `height <= total_height`
    pub fn validate(&self) -> Result<(), GeometryError> {
        let named = [
            ("outer_diameter", self.outer_diameter),
            ("test_area", self.test_area),
            ("height", self.height),
            ("total_height", self.total_height),
        ];
        for (name, value) in named {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::NonPositive { name, value });
            }
        }

        if self.height > self.total_height {
            return Err(GeometryError::HeightExceedsTotal {
                height: self.height,
                total_height: self.total_height,
            });
        }

        Ok(())
    }

    /// Full circumference of the shell
    pub fn circumference(&self) -> f64 {
        PI * self.outer_diameter
    }

    /// Expansion factors for this geometry. Does not validate.
    pub fn expansion_factors(&self) -> ExpansionFactors {
        ExpansionFactors {
            cols: self.circumference() / self.test_area,
            rows: self.total_height / self.height,
        }
    }
}
