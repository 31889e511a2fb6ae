//! Error types for the settings crate.
//!
//! Covers configuration files on disk and validation of operator form input.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be loaded.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// The configuration file could not be saved.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// The file extension is neither `.json` nor `.toml`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// The configuration holds invalid geometry or policy parameters.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] thickmap_core::Error),
}

/// Validation failures for operator form input.
///
/// The messages are shown to the operator as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field was left empty.
    #[error("Please fill in all measurement fields")]
    MissingField {
        /// Field that was empty.
        field: &'static str,
    },

    /// A field did not parse as a number.
    #[error("All measurement inputs must be valid numbers")]
    NotANumber {
        /// Field that failed to parse.
        field: &'static str,
        /// Parser message.
        reason: String,
    },

    /// A measurement was zero or negative.
    #[error("All measurement values must be positive numbers")]
    NotPositive {
        /// Field holding the value.
        field: &'static str,
    },

    /// Row spacing is larger than the shell height.
    #[error("Total Height must be greater than calculated height")]
    HeightExceedsTotal,

    /// Threshold percentage outside `[0, 100]`.
    #[error("Threshold Percentage must be between 0 and 100")]
    PercentageOutOfRange,
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
