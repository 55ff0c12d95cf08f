use crate::consts::{LINSPACE_MIN_DIFF_DIVISOR, LINSPACE_STEP_TOLERANCE};
use crate::frame::AxisRange;

/// Find an evenly spaced grid that matches the given coordinates.
///
/// Coordinates may be inexact and some grid positions may be missing, so the
/// step is the mean of the consecutive differences close to the smallest
/// non-negligible one. The minimum and maximum values are kept as limits.
/// NaN values are ignored; returns `None` when nothing is left.
pub fn values_to_linspace(values: &[f64]) -> Option<AxisRange> {
    let mut vals: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if vals.is_empty() {
        return None;
    }
    vals.sort_by(f64::total_cmp);
    vals.dedup();

    let first = vals[0];
    let last = vals[vals.len() - 1];
    if vals.len() == 1 {
        return Some(AxisRange::new(first, first, 1));
    }

    let min_abs_diff = (last - first) / (vals.len() as f64 * LINSPACE_MIN_DIFF_DIVISOR);
    let diffs: Vec<f64> = vals
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&d| d > min_abs_diff)
        .collect();
    let first_valid = *diffs.first()?;

    let steps: Vec<f64> = diffs
        .into_iter()
        .filter(|&d| d < first_valid * LINSPACE_STEP_TOLERANCE)
        .collect();
    let step = steps.iter().sum::<f64>() / steps.len() as f64;
    let count = ((last - first) / step).round_ties_even() as usize + 1;

    Some(AxisRange::new(first, last, count))
}

/// Map a coordinate onto its grid index. NaN coordinates have no index.
pub fn index_value(value: f64, range: &AxisRange) -> Option<i64> {
    if value.is_nan() {
        return None;
    }
    let position = (value - range.start) / range.step();
    Some(position.round_ties_even() as i64)
}
