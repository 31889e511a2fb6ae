//! # ThickMap
//!
//! Wall-thickness mapping for cylindrical shells. A sparse grid of
//! ultrasonic readings is laid onto the full cylinder surface, every
//! measured cell is classified into thickness zones, and the result is
//! summarized as per-zone coverage and a ranked list of critical cells.
//!
//! ## Architecture
//!
//! ThickMap is organized as a workspace with multiple crates:
//!
//! 1. **thickmap-core** - Grids, geometry, zone policies, units, errors
//! 2. **thickmap-engine** - Grid expansion, zone classification, statistics
//! 3. **thickmap-settings** - Inspection config files and form parsing
//! 4. **thickmap** - This crate: re-exports, logging setup and the CLI

pub use thickmap_core::{
    units, Error, ExpandedField, ExpansionFactors, GeometryParams, Grid, InspectionHeader,
    MeasurementSystem, NormalizedBand, ReferenceThickness, Result, SourceMatrix, ZonePolicyConfig,
    ZonePolicyKind, SENTINEL,
};

pub use thickmap_engine::{
    analyze, expand, AnalysisReport, AnalysisRequest, AnalysisWarning, Classification,
    CriticalCell, GridExpander, StatisticsAggregator, ThicknessSummary, ZoneClassifier,
    ZoneStatistics,
};

pub use thickmap_settings::{
    GeometryForm, InspectionConfig, ReportSettings, SettingsError, ThresholdForm, ThresholdType,
};

use std::fmt;
use std::str::FromStr;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human-readable output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so report JSON on stdout stays clean
/// - RUST_LOG environment variable support, INFO by default
/// - Pretty or JSON formatting
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert!(BUILD_DATE.ends_with("UTC"));
    }
}
