use proptest::prelude::*;
use std::f64::consts::PI;
use thickmap_core::{
    is_measured, GeometryError, GeometryParams, NormalizedBand, ReferenceThickness, SourceMatrix,
    ZonePolicyConfig, SENTINEL,
};
use thickmap_engine::{
    analyze, expand, AnalysisRequest, AnalysisWarning, StatisticsAggregator, ZoneClassifier,
};

fn source_rows() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(1.0f64..40.0, cols), rows)
    })
}

fn geometry() -> impl Strategy<Value = GeometryParams> {
    (1.0f64..20.0, 1.0f64..10.0, 1.0f64..5.0, 1.0f64..4.0).prop_map(|(d, area, height, k)| {
        GeometryParams::new(d, area, height, height * k)
    })
}

fn policy() -> impl Strategy<Value = ZonePolicyConfig> {
    prop_oneof![
        (5.0f64..50.0, 0.0f64..=100.0)
            .prop_map(|(r, p)| ZonePolicyConfig::binary(ReferenceThickness::Nominal(r), p)),
        (0.0f64..=100.0)
            .prop_map(|p| ZonePolicyConfig::binary(ReferenceThickness::ObservedMinimum, p)),
        (1.0f64..40.0, 0.0f64..20.0)
            .prop_map(|(t, gap)| ZonePolicyConfig::three_zone(t, t + gap)),
        (1.0f64..30.0, 0.5f64..20.0, 1usize..8)
            .prop_map(|(min, span, n)| ZonePolicyConfig::fixed_range_with_zones(min, min + span, n)),
        Just(ZonePolicyConfig::normalized(vec![
            NormalizedBand::new("Low", 0.25),
            NormalizedBand::new("Mid", 0.75),
            NormalizedBand::new("High", 1.0),
        ])),
    ]
}

proptest! {
    #[test]
    fn expanded_dims_follow_geometry(rows in source_rows(), geometry in geometry()) {
        let source = SourceMatrix::from_rows(rows.clone()).unwrap();
        let expected_rows = (geometry.total_height / geometry.height * rows.len() as f64).floor() as usize;
        let expected_cols =
            (PI * geometry.outer_diameter / geometry.test_area * rows[0].len() as f64).floor() as usize;

        match expand(&source, &geometry) {
            Ok(field) => {
                prop_assert_eq!((field.rows(), field.cols()), (expected_rows, expected_cols));
                for (r, c, value) in field.grid().cells() {
                    if r < rows.len() && c < rows[0].len() {
                        prop_assert_eq!(*value, rows[r][c]);
                    } else {
                        prop_assert_eq!(*value, SENTINEL);
                    }
                }
            }
            Err(err) => {
                prop_assert!(expected_rows == 0 || expected_cols == 0);
                prop_assert!(matches!(err, GeometryError::EmptyOutput { .. }), "unexpected error {}", err);
            }
        }
    }

    #[test]
    fn every_measured_cell_in_exactly_one_zone(
        rows in source_rows(),
        geometry in geometry(),
        policy in policy(),
    ) {
        let source = SourceMatrix::from_rows(rows).unwrap();
        let Ok(field) = expand(&source, &geometry) else {
            return Ok(());
        };
        let classification = ZoneClassifier::new(policy).classify(&field).unwrap();

        for (r, c, value) in field.grid().cells() {
            let hits = classification
                .zones
                .iter()
                .filter(|z| z.mask.get(r, c).copied().unwrap_or(false))
                .count();
            let expected = if is_measured(*value) { 1 } else { 0 };
            prop_assert_eq!(hits, expected, "cell ({}, {}) = {}", r, c, value);
        }

        let (zones, critical) = StatisticsAggregator::default().aggregate(&field, &classification);
        let sum: f64 = zones.iter().map(|z| z.coverage_ratio).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9, "coverage sums to {}", sum);
        prop_assert!(critical.windows(2).all(|w| w[0].value <= w[1].value));
    }

    #[test]
    fn binary_threshold_never_exceeds_data(
        rows in source_rows(),
        reference in 5.0f64..80.0,
        percentage in 0.0f64..=100.0,
    ) {
        let source = SourceMatrix::from_rows(rows.clone()).unwrap();
        let max = rows.iter().flatten().copied().fold(f64::MIN, f64::max);
        let request = AnalysisRequest::new(
            source,
            GeometryParams::new(4.0, 1.0, 1.0, 1.0),
            ZonePolicyConfig::binary(ReferenceThickness::Nominal(reference), percentage),
        );
        let report = analyze(&request).unwrap();
        let requested = reference * (percentage / 100.0);
        let threshold = report.effective_threshold.unwrap();

        if requested > max {
            prop_assert_eq!(threshold, max);
            prop_assert!(
                matches!(report.warnings.as_slice(), [AnalysisWarning::ThresholdClamped { .. }]),
                "warnings: {:?}",
                report.warnings
            );
        } else {
            prop_assert_eq!(threshold, requested);
            prop_assert!(report.warnings.is_empty());
        }
    }
}
