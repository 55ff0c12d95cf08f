mod common;

use ndarray::Array2;

use stackalign_core::align::EdgeFilter;
use stackalign_core::frame::Shift;
use stackalign_core::pipeline::config::AlignConfig;
use stackalign_core::pipeline::{AlignWarning, NoOpReporter, StackAligner};
use stackalign_core::table::{MetaColumn, Table};

use common::{blob_stack, table_from_stack, X_NAME, Y_NAME};

const OFFSETS: [(f64, f64); 3] = [(0.0, 0.0), (1.0, 2.0), (-2.0, 0.0)];

fn aligner_with(config: AlignConfig) -> StackAligner {
    let mut aligner = StackAligner::new(config);
    aligner.set_data(Some(table_from_stack(&blob_stack(32, 32, &OFFSETS))));
    aligner
}

#[test]
fn test_axes_default_to_first_two_metas() {
    let aligner = aligner_with(AlignConfig::default());
    assert_eq!(
        aligner.resolve_axes(),
        Some((X_NAME.to_string(), Y_NAME.to_string()))
    );
}

#[test]
fn test_configured_axes_win() {
    let aligner = aligner_with(AlignConfig {
        x_axis: Some(Y_NAME.into()),
        ..AlignConfig::default()
    });
    // x is taken from the config, y still falls back to the second meta.
    assert_eq!(
        aligner.resolve_axes(),
        Some((Y_NAME.to_string(), Y_NAME.to_string()))
    );
}

#[test]
fn test_single_meta_is_used_for_both_axes() {
    let table = Table::new(
        vec![0.0],
        Array2::zeros((3, 1)),
        vec![MetaColumn::new("position", vec![0.0, 1.0, 2.0])],
    )
    .unwrap();
    let mut aligner = StackAligner::default();
    aligner.set_data(Some(table));
    assert_eq!(
        aligner.resolve_axes(),
        Some(("position".to_string(), "position".to_string()))
    );
}

#[test]
fn test_no_axes_without_metas() {
    let table = Table::new(vec![0.0], Array2::zeros((3, 1)), Vec::new()).unwrap();
    let mut aligner = StackAligner::default();
    aligner.set_data(Some(table));
    assert_eq!(aligner.resolve_axes(), None);
    assert!(aligner.params().is_none());
    assert!(aligner.commit(&NoOpReporter).unwrap().is_none());
}

#[test]
fn test_no_data_gives_no_output() {
    let aligner = StackAligner::default();
    assert!(aligner.data().is_none());
    assert!(aligner.commit(&NoOpReporter).unwrap().is_none());
}

#[test]
fn test_reference_frame_is_clamped() {
    let aligner = aligner_with(AlignConfig {
        reference_frame: 10,
        ..AlignConfig::default()
    });
    assert_eq!(aligner.resolve_reference_frame(), 2);

    let output = aligner.commit(&NoOpReporter).unwrap().unwrap();
    assert_eq!(output.shifts[2], Shift::default());
}

#[test]
fn test_params_follow_config() {
    let aligner = aligner_with(AlignConfig {
        sobel_filter: true,
        upsample_factor: 8,
        reference_frame: 1,
        ..AlignConfig::default()
    });
    let params = aligner.params().unwrap();
    assert_eq!(params.filter, EdgeFilter::Sobel);
    assert_eq!(params.upsample_factor, 8);
    assert_eq!(params.reference_frame, 1);
}

#[test]
fn test_missing_reference_warns_and_uses_data() {
    let aligner = aligner_with(AlignConfig {
        use_reference: true,
        ..AlignConfig::default()
    });
    assert_eq!(aligner.warnings(), vec![AlignWarning::MissingReference]);
    assert_eq!(
        AlignWarning::MissingReference.to_string(),
        "Missing reference: Reference is not connected. Using data only."
    );
    assert!(aligner.active_tracking().is_none());

    let output = aligner.commit(&NoOpReporter).unwrap().unwrap();
    assert_eq!(output.shifts[1], Shift::new(-1.0, -2.0));
}

#[test]
fn test_reference_ignored_unless_enabled() {
    let mut aligner = aligner_with(AlignConfig::default());
    aligner.set_reference(Some(table_from_stack(&blob_stack(32, 32, &[(0.0, 0.0); 3]))));
    assert!(aligner.warnings().is_empty());
    assert!(aligner.active_tracking().is_none());

    let output = aligner.commit(&NoOpReporter).unwrap().unwrap();
    assert_eq!(output.shifts[2], Shift::new(2.0, 0.0));

    aligner.config.use_reference = true;
    assert!(aligner.active_tracking().is_some());
    let tracked = aligner.commit(&NoOpReporter).unwrap().unwrap();
    assert!(tracked.shifts.iter().all(Shift::is_zero));
}

#[test]
fn test_invalid_config_fails_commit() {
    let aligner = aligner_with(AlignConfig {
        upsample_factor: 0,
        ..AlignConfig::default()
    });
    assert!(aligner.commit(&NoOpReporter).is_err());
}
