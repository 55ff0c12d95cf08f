use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::{Array2, Array3, ArrayView3, Axis};
use rayon::prelude::*;
use tracing::debug;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::{Result, StackAlignError};
use crate::frame::Shift;

use super::filter::EdgeFilter;
use super::interpolate::shift_fill;
use super::phase_correlation::register_translation;

/// Compute the shift of every frame in `stack` relative to `reference_idx`.
///
/// Both the reference and each frame go through `filter` before correlation.
/// The reference frame itself is not correlated and always gets `(0, 0)`.
/// `on_frame_done` receives the number of frames processed so far.
pub fn calculate_stack_shifts<F>(
    stack: ArrayView3<'_, f32>,
    reference_idx: usize,
    filter: EdgeFilter,
    upsample_factor: usize,
    on_frame_done: F,
) -> Result<Vec<Shift>>
where
    F: Fn(usize) + Send + Sync,
{
    let total = stack.dim().0;
    if total == 0 {
        return Err(StackAlignError::EmptyStack);
    }
    if reference_idx >= total {
        return Err(StackAlignError::FrameIndexOutOfRange {
            index: reference_idx,
            total,
        });
    }

    let base = filter.apply(stack.index_axis(Axis(0), reference_idx));
    let counter = AtomicUsize::new(0);

    let estimate = |i: usize| -> Result<Shift> {
        let shift = if i == reference_idx {
            Shift::default()
        } else {
            let frame = filter.apply(stack.index_axis(Axis(0), i));
            register_translation(base.view(), frame.view(), upsample_factor)?
        };
        debug!(frame = i, dy = shift.dy, dx = shift.dx, "Frame shift estimated");
        let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
        on_frame_done(done);
        Ok(shift)
    };

    let results: Vec<Result<Shift>> = if total >= PARALLEL_FRAME_THRESHOLD {
        (0..total).into_par_iter().map(estimate).collect()
    } else {
        (0..total).map(estimate).collect()
    };

    results.into_iter().collect()
}

/// Shift every frame by its own shift, filling uncovered margins with NaN.
pub fn align_stack_with_shifts(stack: ArrayView3<'_, f32>, shifts: &[Shift]) -> Result<Array3<f32>> {
    let total = stack.dim().0;
    if shifts.len() != total {
        return Err(StackAlignError::ShapeMismatch(format!(
            "{} shifts given for {} frames",
            shifts.len(),
            total
        )));
    }

    let shift_one = |i: usize| shift_fill(stack.index_axis(Axis(0), i), shifts[i], f32::NAN);
    let shifted: Vec<Array2<f32>> = if total >= PARALLEL_FRAME_THRESHOLD {
        (0..total).into_par_iter().map(shift_one).collect()
    } else {
        (0..total).map(shift_one).collect()
    };

    let mut aligned = Array3::<f32>::zeros(stack.raw_dim());
    for (mut out, frame) in aligned.axis_iter_mut(Axis(0)).zip(&shifted) {
        out.assign(frame);
    }
    Ok(aligned)
}

/// Estimate shifts against `reference_idx` and apply them to the same stack.
pub fn align_stack(
    stack: ArrayView3<'_, f32>,
    reference_idx: usize,
    filter: EdgeFilter,
    upsample_factor: usize,
) -> Result<(Vec<Shift>, Array3<f32>)> {
    let shifts = calculate_stack_shifts(stack, reference_idx, filter, upsample_factor, |_| {})?;
    let aligned = align_stack_with_shifts(stack, &shifts)?;
    Ok((shifts, aligned))
}
