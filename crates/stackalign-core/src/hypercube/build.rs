use ndarray::{Array2, ArrayView3};

use crate::error::{Result, StackAlignError};
use crate::table::{MetaColumn, Table};

/// Flatten a (frame, row, col) stack back into a table.
///
/// Rows are emitted row-major (y outer, x inner). `x_coords` and `y_coords`
/// give the physical coordinate of every column and row of the stack and are
/// stored as meta columns named `x_name` and `y_name`.
pub fn build_table(
    cube: ArrayView3<'_, f32>,
    frame_axis: &[f64],
    x_coords: &[f64],
    y_coords: &[f64],
    x_name: &str,
    y_name: &str,
) -> Result<Table> {
    let (frames, height, width) = cube.dim();
    if x_coords.len() != width || y_coords.len() != height {
        return Err(StackAlignError::ShapeMismatch(format!(
            "stack is {width}x{height} but got {} x and {} y coordinates",
            x_coords.len(),
            y_coords.len()
        )));
    }

    let rows = height * width;
    let mut values = Array2::<f32>::zeros((rows, frames));
    let mut xs = Vec::with_capacity(rows);
    let mut ys = Vec::with_capacity(rows);

    for (yi, &y) in y_coords.iter().enumerate() {
        for (xi, &x) in x_coords.iter().enumerate() {
            let row = yi * width + xi;
            for frame in 0..frames {
                values[[row, frame]] = cube[[frame, yi, xi]];
            }
            xs.push(x);
            ys.push(y);
        }
    }

    let metas = if x_name == y_name {
        vec![MetaColumn::new(x_name, xs)]
    } else {
        vec![MetaColumn::new(x_name, xs), MetaColumn::new(y_name, ys)]
    };

    Table::new(frame_axis.to_vec(), values, metas)
}
