use tempfile::TempDir;
use thickmap_core::{InspectionHeader, NormalizedBand, ReferenceThickness, ZonePolicyConfig};
use thickmap_settings::{InspectionConfig, ReportSettings, SettingsError};

fn sample_config() -> InspectionConfig {
    InspectionConfig {
        policy: ZonePolicyConfig::binary(ReferenceThickness::Nominal(20.0), 87.5),
        report: ReportSettings {
            critical_cell_limit: Some(10),
            flip_vertical: true,
        },
        header: InspectionHeader {
            report_no: Some("UT-0042".to_string()),
            make: Some("Olympus".to_string()),
            model: Some("38DL Plus".to_string()),
            serial_no: Some("SN-9917".to_string()),
            inspection_date: "2026-10-12".parse().ok(),
            ..InspectionHeader::default()
        },
        ..InspectionConfig::default()
    }
}

#[test]
fn test_json_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("inspection.json");

    let config = sample_config();
    config.save_to_file(&path).expect("Failed to save config");
    let loaded = InspectionConfig::load_from_file(&path).expect("Failed to load config");

    assert_eq!(loaded, config);
}

#[test]
fn test_toml_round_trip_with_header() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("inspection.toml");

    let config = sample_config();
    assert!(config.header.inspection_date.is_some());
    config.save_to_file(&path).expect("Failed to save config");
    let loaded = InspectionConfig::load_from_file(&path).expect("Failed to load config");

    assert_eq!(loaded.header, config.header);
}

#[test]
fn test_toml_round_trip_with_bands() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("inspection.toml");

    let config = InspectionConfig {
        policy: ZonePolicyConfig::normalized(vec![
            NormalizedBand::new("Thin", 0.3),
            NormalizedBand::new("Nominal", 1.0),
        ]),
        ..InspectionConfig::default()
    };
    config.save_to_file(&path).expect("Failed to save config");
    assert!(path.exists());

    let loaded = InspectionConfig::load_from_file(&path).expect("Failed to load config");
    assert_eq!(loaded, config);
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("inspection.yaml");

    let err = InspectionConfig::default().save_to_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
    assert!(!path.exists());
}

#[test]
fn test_invalid_file_is_rejected_on_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("inspection.json");
    std::fs::write(
        &path,
        r#"{
            "geometry": {"outer_diameter": 100.0, "test_area": 5.0, "height": 50.0, "total_height": 10.0},
            "policy": {"kind": "three_zone", "threshold_thickness": 15.0, "nominal_thickness": 18.0}
        }"#,
    )
    .expect("Failed to write file");

    let err = InspectionConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Invalid(_)));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = InspectionConfig::load_from_file(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(_)));
}
