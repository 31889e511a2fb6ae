//! One analysis request, end to end
//!
//! [`analyze`] validates the request, expands the source matrix, classifies
//! the field and aggregates the statistics into an [`AnalysisReport`].

use crate::classifier::ZoneClassifier;
use crate::expander::GridExpander;
use crate::stats::{CriticalCell, StatisticsAggregator, ThicknessSummary, ZoneStatistics};
use crate::warning::AnalysisWarning;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thickmap_core::{
    ExpandedField, ExpansionFactors, GeometryParams, InspectionHeader, MeasurementSystem, Result,
    SourceMatrix, ZonePolicyConfig, ZonePolicyKind,
};
use tracing::{info, warn};

/// Inputs for a single analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Measured readings
    pub source: SourceMatrix,
    /// Shell geometry
    pub geometry: GeometryParams,
    /// Zone policy and its parameters
    pub policy: ZonePolicyConfig,
    /// Units used in bounds descriptions
    #[serde(default)]
    pub units: MeasurementSystem,
    /// Keep at most this many critical cells in the report
    #[serde(default)]
    pub critical_cell_limit: Option<usize>,
    /// Report header, copied into the report as given
    #[serde(default)]
    pub header: Option<InspectionHeader>,
}

impl AnalysisRequest {
    pub fn new(source: SourceMatrix, geometry: GeometryParams, policy: ZonePolicyConfig) -> Self {
        Self {
            source,
            geometry,
            policy,
            units: MeasurementSystem::default(),
            critical_cell_limit: None,
            header: None,
        }
    }

    pub fn with_units(mut self, units: MeasurementSystem) -> Self {
        self.units = units;
        self
    }

    pub fn with_critical_cell_limit(mut self, limit: usize) -> Self {
        self.critical_cell_limit = Some(limit);
        self
    }

    pub fn with_header(mut self, header: InspectionHeader) -> Self {
        self.header = Some(header);
        self
    }
}

/// Everything a presentation layer needs to draw and tabulate one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    /// Omitted when the request had no header or only blank fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<InspectionHeader>,
    pub policy: ZonePolicyKind,
    pub units: MeasurementSystem,
    pub field_rows: usize,
    pub field_cols: usize,
    /// Dense field; unmeasured cells hold `-1`
    pub field: ExpandedField,
    pub expansion: ExpansionFactors,
    pub summary: ThicknessSummary,
    /// Zone rows in policy order
    pub zones: Vec<ZoneStatistics>,
    /// Aggregate row over all measured cells
    pub total: ZoneStatistics,
    /// Critical cells, thinnest first, truncated to the requested limit
    pub critical_cells: Vec<CriticalCell>,
    /// Number of critical cells before truncation
    pub critical_cell_count: usize,
    /// Binary threshold after clamping, binary policy only
    pub effective_threshold: Option<f64>,
    pub warnings: Vec<AnalysisWarning>,
}

impl AnalysisReport {
    /// Statistics row for a zone
    pub fn zone(&self, name: &str) -> Option<&ZoneStatistics> {
        self.zones.iter().find(|z| z.name == name)
    }

    /// True when any warning was raised
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run one analysis.
///
/// Geometry and policy are validated before any work is done. Recoverable
/// conditions are returned in [`AnalysisReport::warnings`].
pub fn analyze(request: &AnalysisRequest) -> Result<AnalysisReport> {
    request.geometry.validate()?;
    request.policy.validate()?;

    let expander = GridExpander::new(request.geometry);
    let field = expander.expand(&request.source)?;
    let classification = ZoneClassifier::new(request.policy.clone()).classify(&field)?;

    let aggregator = StatisticsAggregator::new(request.units);
    let (zones, mut critical_cells) = aggregator.aggregate(&field, &classification);
    let total = aggregator.total(&field);
    let summary = aggregator.summarize(&field);

    let critical_cell_count = critical_cells.len();
    if let Some(limit) = request.critical_cell_limit {
        critical_cells.truncate(limit);
    }

    for warning in &classification.warnings {
        warn!("{}", warning);
    }
    info!(
        "Analyzed {}x{} field under {} policy: {} measured cells, {} critical",
        field.rows(),
        field.cols(),
        classification.policy,
        summary.valid_cells,
        critical_cell_count
    );

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        header: request.header.clone().filter(|h| !h.is_empty()),
        policy: classification.policy,
        units: request.units,
        field_rows: field.rows(),
        field_cols: field.cols(),
        expansion: expander.factors(),
        summary,
        zones,
        total,
        critical_cells,
        critical_cell_count,
        effective_threshold: classification.effective_threshold,
        warnings: classification.warnings,
        field,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use thickmap_core::{Error, ReferenceThickness};

    fn request(policy: ZonePolicyConfig) -> AnalysisRequest {
        let source = SourceMatrix::from_rows(vec![vec![9.0, 12.0], vec![14.0, 16.0]]).unwrap();
        AnalysisRequest::new(source, GeometryParams::new(4.0, 1.0, 1.0, 2.0), policy)
    }

    #[test]
    fn test_analyze_report_shape() {
        let report = analyze(&request(ZonePolicyConfig::three_zone(13.0, 15.0))).unwrap();

        assert_eq!(report.policy, ZonePolicyKind::ThreeZone);
        assert_eq!((report.field_rows, report.field_cols), (4, 25));
        assert_eq!(report.summary.valid_cells, 4);
        assert_eq!(report.total.cell_count, 4);
        assert_eq!(report.zone("Red").unwrap().cell_count, 2);
        assert_eq!(report.critical_cell_count, 2);
        assert_eq!(report.critical_cells[0].value, 9.0);
        assert!(report.effective_threshold.is_none());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_critical_cell_limit() {
        let req = request(ZonePolicyConfig::three_zone(13.0, 15.0)).with_critical_cell_limit(1);
        let report = analyze(&req).unwrap();
        assert_eq!(report.critical_cells.len(), 1);
        assert_eq!(report.critical_cell_count, 2);
    }

    #[test]
    fn test_clamp_warning_is_reported() {
        let policy = ZonePolicyConfig::binary(ReferenceThickness::Nominal(20.0), 95.0);
        let report = analyze(&request(policy)).unwrap();
        assert_eq!(report.effective_threshold, Some(16.0));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_policy_fails_before_expansion() {
        let mut req = request(ZonePolicyConfig::fixed_range(20.0, 10.0));
        let err = analyze(&req).unwrap_err();
        assert!(err.is_policy_error());

        req.geometry.outer_diameter = 0.0;
        let err = analyze(&req).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let json = r#"{
            "source": [[10.0, 12.0]],
            "geometry": {"outer_diameter": 4.0, "test_area": 1.0, "height": 1.0, "total_height": 2.0},
            "policy": {"kind": "three_zone", "threshold_thickness": 15.0, "nominal_thickness": 18.0}
        }"#;
        let req: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.units, MeasurementSystem::Metric);
        assert!(req.critical_cell_limit.is_none());
        assert!(req.header.is_none());
    }

    #[test]
    fn test_header_is_echoed_into_report() {
        let header = InspectionHeader {
            report_no: Some("UT-0042".to_string()),
            part_name: Some("Stripper column shell".to_string()),
            calibration_due_date: NaiveDate::from_ymd_opt(2027, 1, 31),
            ..InspectionHeader::default()
        };
        let req = request(ZonePolicyConfig::three_zone(13.0, 15.0)).with_header(header.clone());
        let report = analyze(&req).unwrap();
        assert_eq!(report.header.as_ref(), Some(&header));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["header"]["report_no"], "UT-0042");
        assert_eq!(json["header"]["calibration_due_date"], "2027-01-31");
    }

    #[test]
    fn test_blank_header_is_dropped() {
        let req = request(ZonePolicyConfig::three_zone(13.0, 15.0))
            .with_header(InspectionHeader::default());
        let report = analyze(&req).unwrap();
        assert!(report.header.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("header").is_none());
    }
}
