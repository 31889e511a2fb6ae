//! ThickMap Settings Crate
//!
//! Inspection configuration files and parsing of the raw text an operator
//! types into the geometry and threshold forms.

pub mod config;
pub mod error;
pub mod form;

pub use config::{InspectionConfig, ReportSettings, CONFIG_FILE_NAME};
pub use error::{FormError, SettingsError, SettingsResult};
pub use form::{GeometryForm, ThresholdForm, ThresholdType};
