//! Non-fatal analysis warnings
//!
//! Warnings are collected and returned with the results instead of being
//! raised. The analysis always runs to completion when one is emitted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable condition met during an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// The derived binary threshold was above the largest measured value
    /// and was lowered to it
    ThresholdClamped {
        /// Threshold derived from the reference and percentage
        requested: f64,
        /// Threshold actually used
        clamped: f64,
    },
    /// The field has no measured cells; every ratio is reported as zero
    NoValidData,
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdClamped { requested, clamped } => write!(
                f,
                "Calculated threshold value ({:.2}) exceeds maximum data value ({:.2}). \
                 Threshold has been adjusted to maximum value.",
                requested, clamped
            ),
            Self::NoValidData => write!(f, "No measured cells; zone statistics are empty."),
        }
    }
}
