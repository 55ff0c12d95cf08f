use ndarray::{Array2, Array3};
use tracing::debug;

use crate::error::{Result, StackAlignError};
use crate::frame::{AxisRange, Hypercube};
use crate::table::{MetaColumn, Table};

use super::linspace::{index_value, values_to_linspace};

/// Reshape a flattened table into a (frame, row, col) hypercube.
///
/// Rows of the cube follow `y_axis` and columns follow `x_axis`. Grid cells
/// not covered by any table row are left as NaN; rows whose coordinates are
/// NaN are skipped. Two rows on the same grid cell are an `InvalidAxis` error.
pub fn get_hypercube(table: &Table, x_axis: &str, y_axis: &str) -> Result<Hypercube> {
    let x_col = axis_column(table, x_axis)?;
    let y_col = axis_column(table, y_axis)?;

    let x_range =
        values_to_linspace(&x_col.values).ok_or_else(|| StackAlignError::InvalidAxis("x".into()))?;
    let y_range =
        values_to_linspace(&y_col.values).ok_or_else(|| StackAlignError::InvalidAxis("y".into()))?;

    let frames = table.frame_count();
    let mut data = Array3::<f32>::from_elem((frames, y_range.count, x_range.count), f32::NAN);
    let mut filled = Array2::<bool>::from_elem((y_range.count, x_range.count), false);

    for (row, samples) in table.values.outer_iter().enumerate() {
        let (Some(xi), Some(yi)) = (
            index_value(x_col.values[row], &x_range),
            index_value(y_col.values[row], &y_range),
        ) else {
            continue;
        };
        let xi = grid_index(xi, &x_range, x_axis)?;
        let yi = grid_index(yi, &y_range, y_axis)?;
        if std::mem::replace(&mut filled[[yi, xi]], true) {
            return Err(StackAlignError::InvalidAxis(format!(
                "row {row} repeats the position ({x_axis}, {y_axis}) = ({}, {}) of an earlier row",
                x_col.values[row], y_col.values[row]
            )));
        }
        for (frame, &value) in samples.iter().enumerate() {
            data[[frame, yi, xi]] = value;
        }
    }

    debug!(
        frames,
        rows = y_range.count,
        cols = x_range.count,
        "Hypercube assembled"
    );

    Ok(Hypercube::new(data, x_range, y_range))
}

fn axis_column<'a>(table: &'a Table, name: &str) -> Result<&'a MetaColumn> {
    table
        .meta(name)
        .ok_or_else(|| StackAlignError::InvalidAxis(format!("'{name}' is not a table variable")))
}

fn grid_index(index: i64, range: &AxisRange, axis: &str) -> Result<usize> {
    if index < 0 || index as usize >= range.count {
        return Err(StackAlignError::InvalidAxis(format!(
            "values of '{axis}' do not form a regular grid"
        )));
    }
    Ok(index as usize)
}
