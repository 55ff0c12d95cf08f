use tracing::{info, warn};

use crate::align::{align_stack_with_shifts, calculate_stack_shifts};
use crate::crop::CropWindow;
use crate::error::{Result, StackAlignError};
use crate::frame::Hypercube;
use crate::hypercube::{build_table, get_hypercube};
use crate::table::Table;

use super::config::StackParams;
use super::types::{AlignOutput, NoOpReporter, PipelineStage, ProgressReporter};

/// Align and crop the image stack stored in `data`.
///
/// Shifts are estimated on `tracking` when given (it must have the same frame
/// count as `data`), otherwise on `data` itself, and always applied to `data`.
pub fn process_stack(
    data: &Table,
    params: &StackParams,
    tracking: Option<&Table>,
) -> Result<AlignOutput> {
    process_stack_reported(data, params, tracking, &NoOpReporter)
}

/// [`process_stack`] with progress reporting.
pub fn process_stack_reported(
    data: &Table,
    params: &StackParams,
    tracking: Option<&Table>,
    reporter: &dyn ProgressReporter,
) -> Result<AlignOutput> {
    if params.upsample_factor == 0 {
        return Err(StackAlignError::InvalidConfig(
            "upsample factor must be at least 1".into(),
        ));
    }
    if data.frame_count() == 0 {
        return Err(StackAlignError::EmptyStack);
    }

    reporter.begin_stage(PipelineStage::Extracting, None);
    let cube = extract_checked(data, params)?;
    let tracking_cube = match tracking {
        Some(reference) => {
            if reference.frame_count() != data.frame_count() {
                return Err(StackAlignError::WrongReference(
                    "Reference data must have the same number of frames as the input data."
                        .into(),
                ));
            }
            Some(extract_checked(reference, params)?)
        }
        None => None,
    };
    reporter.finish_stage();

    let frames = cube.frame_count();
    info!(
        frames,
        height = cube.height(),
        width = cube.width(),
        tracking = tracking_cube.is_some(),
        upsample = params.upsample_factor,
        filter = %params.filter,
        reference_frame = params.reference_frame,
        "Registering image stack"
    );

    reporter.begin_stage(PipelineStage::EstimatingShifts, Some(frames));
    let shift_source = tracking_cube.as_ref().unwrap_or(&cube);
    let shifts = calculate_stack_shifts(
        shift_source.data.view(),
        params.reference_frame,
        params.filter,
        params.upsample_factor,
        |done| reporter.advance(done),
    )?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Shifting, Some(frames));
    let aligned = align_stack_with_shifts(cube.data.view(), &shifts)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Cropping, None);
    let crop = CropWindow::from_shifts(&shifts, cube.height(), cube.width());
    if crop.is_empty() {
        warn!(
            ?crop,
            "Shifts leave no region common to all frames; output is empty"
        );
    }
    let cropped = crop.apply(aligned.view());
    let table = build_table(
        cropped.view(),
        &data.frame_axis,
        &crop.x_coords(&cube.x),
        &crop.y_coords(&cube.y),
        &params.x_axis,
        &params.y_axis,
    )?;
    reporter.finish_stage();

    info!(
        crop_rows = crop.height(),
        crop_cols = crop.width(),
        output_rows = table.row_count(),
        "Stack aligned and cropped"
    );

    Ok(AlignOutput {
        shifts,
        crop,
        table,
    })
}

/// Build the hypercube for `table` and reject it if any sample is missing.
fn extract_checked(table: &Table, params: &StackParams) -> Result<Hypercube> {
    let cube = get_hypercube(table, &params.x_axis, &params.y_axis)?;
    let nans = cube.nan_count();
    if nans > 0 {
        return Err(StackAlignError::NanInsideHypercube(nans));
    }
    Ok(cube)
}
