use thickmap_core::{
    ExpandedField, GeometryParams, MeasurementSystem, ReferenceThickness, SourceMatrix,
    ZonePolicyConfig, SENTINEL,
};
use thickmap_engine::{
    analyze, expand, AnalysisRequest, AnalysisWarning, StatisticsAggregator, ZoneClassifier,
};

fn scenario_source() -> SourceMatrix {
    SourceMatrix::from_rows(vec![vec![10.0, 12.0], vec![14.0, 16.0]]).unwrap()
}

fn scenario_geometry() -> GeometryParams {
    GeometryParams::new(4.0, 1.0, 1.0, 2.0)
}

#[test]
fn test_expansion_of_two_by_two_patch() {
    let field = expand(&scenario_source(), &scenario_geometry()).unwrap();

    assert_eq!((field.rows(), field.cols()), (4, 25));
    assert_eq!(field.grid().row(0)[..2], [10.0, 12.0]);
    assert_eq!(field.grid().row(1)[..2], [14.0, 16.0]);
    for (row, col, value) in field.grid().cells() {
        if row >= 2 || col >= 2 {
            assert_eq!(*value, SENTINEL, "cell ({}, {})", row, col);
        }
    }
    assert_eq!(field.sentinel_count(), 4 * 25 - 4);
}

#[test]
fn test_three_zone_even_split() {
    let field = ExpandedField::from_rows(vec![vec![14.0, 16.0, 19.0]]).unwrap();
    let classification = ZoneClassifier::new(ZonePolicyConfig::three_zone(15.0, 18.0))
        .classify(&field)
        .unwrap();

    let assigned: Vec<_> = (0..3)
        .map(|col| classification.zone_at(0, col).map(|z| z.name.as_str()))
        .collect();
    assert_eq!(assigned, vec![Some("Red"), Some("Yellow"), Some("Green")]);

    let (zones, _) = StatisticsAggregator::default().aggregate(&field, &classification);
    for zone in &zones {
        assert!((zone.coverage_ratio - 1.0 / 3.0).abs() < 1e-12, "{}", zone.name);
    }
}

#[test]
fn test_fixed_range_first_zone() {
    let field = ExpandedField::from_rows(vec![vec![12.0]]).unwrap();
    let classification = ZoneClassifier::new(ZonePolicyConfig::fixed_range(10.0, 20.0))
        .classify(&field)
        .unwrap();

    let zone = classification.zone_at(0, 0).unwrap();
    assert_eq!(zone.name, "Zone 1");
    assert_eq!(zone.bounds.describe(MeasurementSystem::Metric), "10.00–12.50 mm");

    let (zones, critical) = StatisticsAggregator::default().aggregate(&field, &classification);
    let zone_1 = zones.iter().find(|z| z.name == "Zone 1").unwrap();
    assert!(zone_1.bounds_description.contains("10.00–12.50"));
    assert_eq!(zone_1.coverage_ratio, 1.0);
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].zone_name, "Zone 1");
}

#[test]
fn test_full_pipeline_binary_clamp() {
    let request = AnalysisRequest::new(
        scenario_source(),
        scenario_geometry(),
        ZonePolicyConfig::binary(ReferenceThickness::Nominal(20.0), 90.0),
    );
    let report = analyze(&request).unwrap();

    assert_eq!(report.effective_threshold, Some(16.0));
    assert_eq!(
        report.warnings,
        vec![AnalysisWarning::ThresholdClamped {
            requested: 18.0,
            clamped: 16.0
        }]
    );
    assert_eq!(report.zone("Red").unwrap().cell_count, 3);
    assert_eq!(report.zone("Blue").unwrap().cell_count, 1);

    let values: Vec<f64> = report.critical_cells.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![10.0, 12.0, 14.0]);
    assert!((report.critical_cells[1].angle_degrees - 14.4).abs() < 1e-9);
}

#[test]
fn test_report_serializes_to_json() {
    let request = AnalysisRequest::new(
        scenario_source(),
        scenario_geometry(),
        ZonePolicyConfig::three_zone(15.0, 18.0),
    );
    let report = analyze(&request).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["policy"], "three_zone");
    assert_eq!(json["zones"].as_array().unwrap().len(), 3);
    assert_eq!(json["total"]["cell_count"], 4);
}

#[test]
fn test_imperial_report_keeps_entered_values() {
    let source = SourceMatrix::from_rows(vec![vec![0.35, 0.42], vec![0.46, 0.5]]).unwrap();
    let request = AnalysisRequest::new(
        source,
        scenario_geometry(),
        ZonePolicyConfig::three_zone(0.4, 0.45),
    )
    .with_units(MeasurementSystem::Imperial);
    let report = analyze(&request).unwrap();

    let red = report.zone("Red").unwrap();
    assert_eq!(red.bounds_description, "< 0.40 in");
    assert_eq!(red.average_value, 0.35);
    assert_eq!(report.zone("Green").unwrap().bounds_description, "≥ 0.45 in");
    assert_eq!(report.critical_cells[0].value, 0.35);
    assert_eq!(report.summary.min, 0.35);
    assert_eq!(report.summary.max, 0.5);
    assert_eq!(report.units, MeasurementSystem::Imperial);
}
