use stackalign_core::align::EdgeFilter;
use stackalign_core::error::StackAlignError;
use stackalign_core::pipeline::config::AlignConfig;
use stackalign_core::pipeline::PipelineStage;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_config() {
    let config = AlignConfig::default();
    assert_eq!(config.x_axis, None);
    assert_eq!(config.y_axis, None);
    assert!(!config.use_reference);
    assert!(!config.sobel_filter);
    assert_eq!(config.upsample_factor, 1);
    assert_eq!(config.reference_frame, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_edge_filter_follows_sobel_flag() {
    let mut config = AlignConfig::default();
    assert_eq!(config.edge_filter(), EdgeFilter::None);
    config.sobel_filter = true;
    assert_eq!(config.edge_filter(), EdgeFilter::Sobel);
}

#[test]
fn test_edge_filter_display() {
    assert_eq!(format!("{}", EdgeFilter::None), "None");
    assert_eq!(format!("{}", EdgeFilter::Sobel), "Sobel");
}

#[test]
fn test_pipeline_stage_display() {
    assert_eq!(format!("{}", PipelineStage::EstimatingShifts), "Estimating shifts");
    assert_eq!(format!("{}", PipelineStage::Cropping), "Cropping");
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_toml_round_trip() {
    let config = AlignConfig {
        x_axis: Some("map_x".into()),
        y_axis: Some("map_y".into()),
        use_reference: true,
        sobel_filter: true,
        upsample_factor: 20,
        reference_frame: 3,
    };
    let text = config.to_toml_string().unwrap();
    assert_eq!(AlignConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_unset_axes_are_not_written() {
    let text = AlignConfig::default().to_toml_string().unwrap();
    assert!(!text.contains("x_axis"));
    assert!(text.contains("upsample_factor = 1"));
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = AlignConfig::from_toml_str("sobel_filter = true\n").unwrap();
    assert!(config.sobel_filter);
    assert_eq!(config.upsample_factor, 1);
    assert_eq!(config.x_axis, None);
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(AlignConfig::from_toml_str("").unwrap(), AlignConfig::default());
}

#[test]
fn test_zero_upsample_factor_is_rejected() {
    let err = AlignConfig::from_toml_str("upsample_factor = 0\n").unwrap_err();
    assert!(matches!(err, StackAlignError::InvalidConfig(_)));
}

#[test]
fn test_malformed_toml_is_rejected() {
    let err = AlignConfig::from_toml_str("upsample_factor = \"many\"\n").unwrap_err();
    assert!(matches!(err, StackAlignError::Toml(_)));
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("align.toml");

    let config = AlignConfig {
        x_axis: Some("x".into()),
        upsample_factor: 100,
        ..AlignConfig::default()
    };
    config.save(&path).unwrap();
    assert_eq!(AlignConfig::load(&path).unwrap(), config);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = AlignConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, StackAlignError::Io(_)));
}
