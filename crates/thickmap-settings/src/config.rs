//! Inspection configuration for ThickMap
//!
//! Holds everything an analysis needs besides the measured readings:
//! shell geometry, the zone policy, units, report options and the
//! optional report header.
//! Supports JSON and TOML file formats; the default file lives in the
//! platform configuration directory.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thickmap_core::{GeometryParams, InspectionHeader, MeasurementSystem, ZonePolicyConfig};
use tracing::{debug, info};

/// File name of the default configuration
pub const CONFIG_FILE_NAME: &str = "inspection.toml";

/// Report output options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Keep at most this many critical cells; `None` keeps all
    pub critical_cell_limit: Option<usize>,
    /// Emit the field with row 0 last, for renderers that draw bottom-up
    pub flip_vertical: bool,
}

/// A complete inspection setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionConfig {
    /// Shell geometry
    pub geometry: GeometryParams,
    /// Zone classification policy
    pub policy: ZonePolicyConfig,
    /// Unit the readings and lengths are recorded in
    #[serde(default)]
    pub units: MeasurementSystem,
    /// Report options
    #[serde(default)]
    pub report: ReportSettings,
    /// Report, equipment and part details; dates are `YYYY-MM-DD` strings
    #[serde(default, skip_serializing_if = "InspectionHeader::is_empty")]
    pub header: InspectionHeader,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryParams::new(1000.0, 50.0, 100.0, 2000.0),
            policy: ZonePolicyConfig::three_zone(15.0, 18.0),
            units: MeasurementSystem::Metric,
            report: ReportSettings::default(),
            header: InspectionHeader::default(),
        }
    }
}

impl InspectionConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/thickmap/inspection.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
        })?;
        Ok(base.join("thickmap").join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(unsupported(path));
        };

        config.validate()?;
        debug!("Loaded inspection config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(unsupported(path));
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!("Saved inspection config to {}", path.display());
        Ok(())
    }

    /// Validate geometry and policy parameters
    pub fn validate(&self) -> SettingsResult<()> {
        self.geometry
            .validate()
            .map_err(thickmap_core::Error::from)?;
        self.policy.validate().map_err(thickmap_core::Error::from)?;
        Ok(())
    }
}

fn unsupported(path: &Path) -> SettingsError {
    SettingsError::UnsupportedFormat(format!(
        "{} (config file must be .json or .toml)",
        path.display()
    ))
}
