//! Operator form input
//!
//! The inspection form collects geometry and threshold values as free text.
//! These types hold the raw text and turn it into validated parameters,
//! reporting the first problem with a message fit for the operator.

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use thickmap_core::units::parse_length;
use thickmap_core::{GeometryParams, MeasurementSystem, ReferenceThickness, ZonePolicyConfig};

fn length_field(
    field: &'static str,
    text: &str,
    units: MeasurementSystem,
) -> Result<f64, FormError> {
    if text.trim().is_empty() {
        return Err(FormError::MissingField { field });
    }
    parse_length(text, units).map_err(|reason| FormError::NotANumber { field, reason })
}

fn positive(field: &'static str, value: f64) -> Result<f64, FormError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(FormError::NotPositive { field })
    }
}

/// Raw geometry fields as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryForm {
    pub outer_diameter: String,
    pub test_area: String,
    pub height: String,
    pub total_height: String,
}

impl GeometryForm {
    /// Parse and validate. Lengths are read and returned in `units`.
    pub fn parse(&self, units: MeasurementSystem) -> Result<GeometryParams, FormError> {
        let fields = [
            ("outer_diameter", &self.outer_diameter),
            ("test_area", &self.test_area),
            ("height", &self.height),
            ("total_height", &self.total_height),
        ];

        let mut values = [0.0; 4];
        for (slot, (field, text)) in values.iter_mut().zip(fields) {
            *slot = length_field(field, text, units)?;
        }
        for (value, (field, _)) in values.iter().zip(fields) {
            positive(field, *value)?;
        }

        let [outer_diameter, test_area, height, total_height] = values;
        if height > total_height {
            return Err(FormError::HeightExceedsTotal);
        }

        Ok(GeometryParams::new(
            outer_diameter,
            test_area,
            height,
            total_height,
        ))
    }
}

/// Which thickness the binary threshold percentage applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdType {
    /// Percentage of the nominal thickness
    #[default]
    Nominal,
    /// Percentage of the design thickness
    Design,
    /// Percentage of the thinnest measured value
    RelativeToMinimum,
}

/// Raw threshold fields as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdForm {
    pub threshold_type: ThresholdType,
    pub nominal_thickness: String,
    pub design_thickness: String,
    pub threshold_percentage: String,
}

impl ThresholdForm {
    /// Parse into a binary threshold policy
    pub fn parse(&self, units: MeasurementSystem) -> Result<ZonePolicyConfig, FormError> {
        let nominal = positive(
            "nominal_thickness",
            length_field("nominal_thickness", &self.nominal_thickness, units)?,
        )?;
        let design = positive(
            "design_thickness",
            length_field("design_thickness", &self.design_thickness, units)?,
        )?;

        let text = self.threshold_percentage.trim();
        if text.is_empty() {
            return Err(FormError::MissingField {
                field: "threshold_percentage",
            });
        }
        let percentage: f64 = text.parse().map_err(|e: std::num::ParseFloatError| {
            FormError::NotANumber {
                field: "threshold_percentage",
                reason: e.to_string(),
            }
        })?;
        if !(0.0..=100.0).contains(&percentage) {
            return Err(FormError::PercentageOutOfRange);
        }

        let reference = match self.threshold_type {
            ThresholdType::Nominal => ReferenceThickness::Nominal(nominal),
            ThresholdType::Design => ReferenceThickness::Design(design),
            ThresholdType::RelativeToMinimum => ReferenceThickness::ObservedMinimum,
        };
        Ok(ZonePolicyConfig::binary(reference, percentage))
    }
}
