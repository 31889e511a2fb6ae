//! Error handling for ThickMap
//!
//! Provides error types for every validation stage of an analysis:
//! - Source errors (malformed measurement matrices)
//! - Geometry errors (cylinder parameters, expansion output)
//! - Policy errors (zone classification parameters)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Source matrix error type
///
/// Raised when a measurement matrix handed to the engine is not a
/// rectangular grid of finite, non-negative readings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Matrix has no rows or no columns
    #[error("Measurement matrix is empty")]
    Empty,

    /// A row has a different length than the first row
    #[error("Row {row} has {actual} values, expected {expected}")]
    Ragged {
        /// The offending row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },

    /// A reading is NaN or infinite
    #[error("Non-finite reading at row {row}, column {col}")]
    NonFinite {
        /// Row index of the reading.
        row: usize,
        /// Column index of the reading.
        col: usize,
    },

    /// A reading is below zero, including the unmeasured marker `-1`
    #[error("Negative reading {value} at row {row}, column {col}")]
    NegativeReading {
        /// Row index of the reading.
        row: usize,
        /// Column index of the reading.
        col: usize,
        /// The rejected reading.
        value: f64,
    },
}

/// Geometry error type
///
/// Represents invalid or inconsistent cylinder geometry. Fatal to the
/// expansion step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A geometry parameter is zero, negative or not a number
    #[error("Geometry parameter '{name}' must be positive, got {value}")]
    NonPositive {
        /// The parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Row spacing is larger than the full cylinder height
    #[error("Height {height} exceeds total height {total_height}")]
    HeightExceedsTotal {
        /// Spacing between row samples.
        height: f64,
        /// Full cylinder height.
        total_height: f64,
    },

    /// Expansion would produce a grid with no cells
    #[error("Expanded grid would be empty ({rows} x {cols})")]
    EmptyOutput {
        /// Computed output rows.
        rows: usize,
        /// Computed output columns.
        cols: usize,
    },

    /// Expansion would produce more cells than [`crate::MAX_FIELD_CELLS`],
    /// or a non-finite dimension
    #[error("Expanded grid would be too large ({rows} x {cols})")]
    OutputTooLarge {
        /// Computed output rows, before truncation to an integer.
        rows: f64,
        /// Computed output columns, before truncation to an integer.
        cols: f64,
    },
}

/// Zone policy error type
///
/// Represents out-of-range zone policy parameters. Fatal to the
/// classification step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    /// Binary threshold percentage outside [0, 100]
    #[error("Threshold percentage must be between 0 and 100, got {percentage}")]
    PercentageOutOfRange {
        /// The rejected percentage.
        percentage: f64,
    },

    /// Reference thickness is zero, negative or not a number
    #[error("Reference thickness must be positive, got {value}")]
    NonPositiveReference {
        /// The rejected reference value.
        value: f64,
    },

    /// Fixed range with max not strictly above min
    #[error("Maximum threshold {max} must be greater than minimum threshold {min}")]
    InvalidRange {
        /// Lower end of the span.
        min: f64,
        /// Upper end of the span.
        max: f64,
    },

    /// Three-zone thresholds in the wrong order
    #[error("Threshold thickness {threshold} exceeds nominal thickness {nominal}")]
    ThresholdAboveNominal {
        /// Red/yellow boundary.
        threshold: f64,
        /// Yellow/green boundary.
        nominal: f64,
    },

    /// Fixed range asked for no main zones
    #[error("Zone count must be at least 1")]
    ZeroZoneCount,

    /// Normalized band list is unusable
    #[error("Invalid normalized bands: {reason}")]
    InvalidBands {
        /// What is wrong with the bands.
        reason: String,
    },

    /// A threshold is not a finite number
    #[error("Threshold '{name}' must be a finite number, got {value}")]
    NonFinite {
        /// The parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Main error type for ThickMap
///
/// A unified error type that can represent any validation failure.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Source matrix error
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Policy error
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl Error {
    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a policy error
    pub fn is_policy_error(&self) -> bool {
        matches!(self, Error::Policy(_))
    }

    /// Check if this is a source matrix error
    pub fn is_source_error(&self) -> bool {
        matches!(self, Error::Source(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
