//! Inspection header
//!
//! Administrative details printed at the top of a thickness report. None
//! of them take part in the analysis; they are carried from the config to
//! the report unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Report, equipment and part details for one inspection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Date the report was issued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_date: Option<NaiveDate>,
    /// Purchase order number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection_date: Option<NaiveDate>,

    /// Gauge manufacturer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Gauge serial number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration_due_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawing_number: Option<String>,
}

impl InspectionHeader {
    /// True when no field holds a non-blank value
    pub fn is_empty(&self) -> bool {
        let text = [
            &self.report_no,
            &self.client_name,
            &self.address,
            &self.po_number,
            &self.make,
            &self.model,
            &self.serial_no,
            &self.part_name,
            &self.material,
            &self.drawing_number,
        ];
        let dates = [
            self.report_date,
            self.inspection_date,
            self.calibration_due_date,
        ];

        text.iter()
            .all(|field| field.as_deref().map_or(true, |s| s.trim().is_empty()))
            && dates.iter().all(Option::is_none)
    }
}
