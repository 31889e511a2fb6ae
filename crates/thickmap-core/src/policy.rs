//! Zone policies
//!
//! A zone policy decides how the valid cells of a thickness field are
//! partitioned into named zones. Every policy kind is one variant of
//! [`ZonePolicyConfig`], so a single classifier entry point can dispatch
//! on it. Parameters are checked with [`ZonePolicyConfig::validate`]
//! before any cell is scanned.

use crate::constants::DEFAULT_ZONE_COUNT;
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Thickness the binary threshold percentage is taken of
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReferenceThickness {
    /// Nominal wall thickness
    Nominal(f64),
    /// Design wall thickness
    Design(f64),
    /// Smallest measured value in the field
    ObservedMinimum,
}

impl ReferenceThickness {
    /// Resolve to a number, using `observed_min` for [`Self::ObservedMinimum`]
    pub fn resolve(&self, observed_min: Option<f64>) -> f64 {
        match self {
            Self::Nominal(value) | Self::Design(value) => *value,
            Self::ObservedMinimum => observed_min.unwrap_or(0.0),
        }
    }
}

impl fmt::Display for ReferenceThickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nominal(_) => write!(f, "Nominal Thickness"),
            Self::Design(_) => write!(f, "Design Thickness"),
            Self::ObservedMinimum => write!(f, "Observed Minimum"),
        }
    }
}

/// One band of the normalized-band policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBand {
    /// Zone name reported for this band
    pub name: String,
    /// Inclusive upper edge on the normalized `[0, 1]` scale
    pub upper: f64,
}

impl NormalizedBand {
    pub fn new(name: impl Into<String>, upper: f64) -> Self {
        Self {
            name: name.into(),
            upper,
        }
    }
}

/// Discriminant of [`ZonePolicyConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZonePolicyKind {
    BinaryThreshold,
    ThreeZone,
    FixedRange,
    NormalizedBands,
}

impl fmt::Display for ZonePolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BinaryThreshold => write!(f, "Binary Threshold"),
            Self::ThreeZone => write!(f, "Three Zone"),
            Self::FixedRange => write!(f, "Fixed Range"),
            Self::NormalizedBands => write!(f, "Normalized Bands"),
        }
    }
}

/// Zone classification policy and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZonePolicyConfig {
    /// Two zones split at `reference * percentage / 100`
    BinaryThreshold {
        reference: ReferenceThickness,
        percentage: f64,
    },
    /// Red below `threshold_thickness`, yellow up to `nominal_thickness`, green above
    ThreeZone {
        threshold_thickness: f64,
        nominal_thickness: f64,
    },
    /// `zone_count` equal zones over `[min_threshold, max_threshold]` plus two overflow zones
    FixedRange {
        min_threshold: f64,
        max_threshold: f64,
        #[serde(default = "default_zone_count")]
        zone_count: usize,
    },
    /// Bands over values normalized against the observed range
    NormalizedBands { bands: Vec<NormalizedBand> },
}

fn default_zone_count() -> usize {
    DEFAULT_ZONE_COUNT
}

impl ZonePolicyConfig {
    /// Binary threshold policy
    pub fn binary(reference: ReferenceThickness, percentage: f64) -> Self {
        Self::BinaryThreshold {
            reference,
            percentage,
        }
    }

    /// Three-zone policy
    pub fn three_zone(threshold_thickness: f64, nominal_thickness: f64) -> Self {
        Self::ThreeZone {
            threshold_thickness,
            nominal_thickness,
        }
    }

    /// Fixed-range policy with the default zone count
    pub fn fixed_range(min_threshold: f64, max_threshold: f64) -> Self {
        Self::fixed_range_with_zones(min_threshold, max_threshold, DEFAULT_ZONE_COUNT)
    }

    /// Fixed-range policy with an explicit zone count
    pub fn fixed_range_with_zones(min_threshold: f64, max_threshold: f64, zone_count: usize) -> Self {
        Self::FixedRange {
            min_threshold,
            max_threshold,
            zone_count,
        }
    }

    /// Normalized-band policy
    pub fn normalized(bands: Vec<NormalizedBand>) -> Self {
        Self::NormalizedBands { bands }
    }

    /// Which policy this is
    pub fn kind(&self) -> ZonePolicyKind {
        match self {
            Self::BinaryThreshold { .. } => ZonePolicyKind::BinaryThreshold,
            Self::ThreeZone { .. } => ZonePolicyKind::ThreeZone,
            Self::FixedRange { .. } => ZonePolicyKind::FixedRange,
            Self::NormalizedBands { .. } => ZonePolicyKind::NormalizedBands,
        }
    }

    /// Validate parameters for this policy
    pub fn validate(&self) -> Result<(), PolicyError> {
        match self {
            Self::BinaryThreshold {
                reference,
                percentage,
            } => {
                if !(0.0..=100.0).contains(percentage) {
                    return Err(PolicyError::PercentageOutOfRange {
                        percentage: *percentage,
                    });
                }
                match reference {
                    ReferenceThickness::Nominal(value) | ReferenceThickness::Design(value)
                        if !(value.is_finite() && *value > 0.0) =>
                    {
                        Err(PolicyError::NonPositiveReference { value: *value })
                    }
                    _ => Ok(()),
                }
            }
            Self::ThreeZone {
                threshold_thickness,
                nominal_thickness,
            } => {
                finite("threshold_thickness", *threshold_thickness)?;
                finite("nominal_thickness", *nominal_thickness)?;
                if threshold_thickness > nominal_thickness {
                    return Err(PolicyError::ThresholdAboveNominal {
                        threshold: *threshold_thickness,
                        nominal: *nominal_thickness,
                    });
                }
                Ok(())
            }
            Self::FixedRange {
                min_threshold,
                max_threshold,
                zone_count,
            } => {
                finite("min_threshold", *min_threshold)?;
                finite("max_threshold", *max_threshold)?;
                if max_threshold <= min_threshold {
                    return Err(PolicyError::InvalidRange {
                        min: *min_threshold,
                        max: *max_threshold,
                    });
                }
                if *zone_count == 0 {
                    return Err(PolicyError::ZeroZoneCount);
                }
                Ok(())
            }
            Self::NormalizedBands { bands } => validate_bands(bands),
        }
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), PolicyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PolicyError::NonFinite { name, value })
    }
}

fn validate_bands(bands: &[NormalizedBand]) -> Result<(), PolicyError> {
    if bands.is_empty() {
        return Err(PolicyError::InvalidBands {
            reason: "at least one band is required".to_string(),
        });
    }

    let mut previous: Option<f64> = None;
    for band in bands {
        if !(0.0..=1.0).contains(&band.upper) {
            return Err(PolicyError::InvalidBands {
                reason: format!("band '{}' upper edge {} is outside [0, 1]", band.name, band.upper),
            });
        }
        if previous.is_some_and(|p| band.upper <= p) {
            return Err(PolicyError::InvalidBands {
                reason: format!("band '{}' does not increase", band.name),
            });
        }
        previous = Some(band.upper);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_percentage_range() {
        let ok = ZonePolicyConfig::binary(ReferenceThickness::Nominal(10.0), 100.0);
        assert!(ok.validate().is_ok());

        let bad = ZonePolicyConfig::binary(ReferenceThickness::Nominal(10.0), 100.5);
        assert_eq!(
            bad.validate(),
            Err(PolicyError::PercentageOutOfRange { percentage: 100.5 })
        );

        let bad = ZonePolicyConfig::binary(ReferenceThickness::ObservedMinimum, -1.0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_binary_reference_must_be_positive() {
        let bad = ZonePolicyConfig::binary(ReferenceThickness::Design(0.0), 50.0);
        assert_eq!(
            bad.validate(),
            Err(PolicyError::NonPositiveReference { value: 0.0 })
        );
    }

    #[test]
    fn test_three_zone_ordering() {
        assert!(ZonePolicyConfig::three_zone(15.0, 18.0).validate().is_ok());
        assert!(ZonePolicyConfig::three_zone(18.0, 18.0).validate().is_ok());
        assert!(matches!(
            ZonePolicyConfig::three_zone(19.0, 18.0).validate(),
            Err(PolicyError::ThresholdAboveNominal { .. })
        ));
    }

    #[test]
    fn test_fixed_range_validation() {
        assert!(ZonePolicyConfig::fixed_range(10.0, 20.0).validate().is_ok());
        assert_eq!(
            ZonePolicyConfig::fixed_range(10.0, 10.0).validate(),
            Err(PolicyError::InvalidRange {
                min: 10.0,
                max: 10.0
            })
        );
        assert_eq!(
            ZonePolicyConfig::fixed_range_with_zones(10.0, 20.0, 0).validate(),
            Err(PolicyError::ZeroZoneCount)
        );
    }

    #[test]
    fn test_normalized_bands_validation() {
        let good = ZonePolicyConfig::normalized(vec![
            NormalizedBand::new("Low", 0.25),
            NormalizedBand::new("High", 1.0),
        ]);
        assert!(good.validate().is_ok());

        let unordered = ZonePolicyConfig::normalized(vec![
            NormalizedBand::new("A", 0.5),
            NormalizedBand::new("B", 0.5),
        ]);
        assert!(unordered.validate().is_err());

        assert!(ZonePolicyConfig::normalized(vec![]).validate().is_err());
    }

    #[test]
    fn test_serde_tagging() {
        let json = r#"{"kind":"fixed_range","min_threshold":10.0,"max_threshold":20.0}"#;
        let policy: ZonePolicyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(policy, ZonePolicyConfig::fixed_range(10.0, 20.0));
        assert_eq!(policy.kind(), ZonePolicyKind::FixedRange);

        let json = r#"{"kind":"binary_threshold","reference":{"kind":"nominal","value":12.0},"percentage":80.0}"#;
        let policy: ZonePolicyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            policy,
            ZonePolicyConfig::binary(ReferenceThickness::Nominal(12.0), 80.0)
        );
    }
}
