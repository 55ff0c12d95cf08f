//! JSON storage for tables and shift curves.
//!
//! Missing samples and coordinates are written as `null`, since JSON has no NaN.

use std::path::Path;

use ndarray::Array2;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StackAlignError};
use crate::frame::Shift;
use crate::table::{MetaColumn, Table};

#[derive(Serialize, Deserialize)]
struct TableFile {
    frame_axis: Vec<f64>,
    metas: Vec<MetaColumnFile>,
    /// One entry per table row, one value per frame.
    values: Vec<Vec<Option<f32>>>,
}

#[derive(Serialize, Deserialize)]
struct MetaColumnFile {
    name: String,
    values: Vec<Option<f64>>,
}

/// One point of the shift curves, numbered from 1 like the frames shown to users.
#[derive(Serialize, Deserialize)]
struct ShiftRecord {
    frame: usize,
    dy: f64,
    dx: f64,
}

fn nan_to_none<T: Float>(v: T) -> Option<T> {
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

fn none_to_nan<T: Float>(v: Option<T>) -> T {
    v.unwrap_or_else(T::nan)
}

pub fn table_to_json(table: &Table) -> Result<String> {
    let file = TableFile {
        frame_axis: table.frame_axis.clone(),
        metas: table
            .metas
            .iter()
            .map(|m| MetaColumnFile {
                name: m.name.clone(),
                values: m.values.iter().copied().map(nan_to_none).collect(),
            })
            .collect(),
        values: table
            .values
            .outer_iter()
            .map(|row| row.iter().copied().map(nan_to_none).collect())
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

pub fn table_from_json(s: &str) -> Result<Table> {
    let file: TableFile = serde_json::from_str(s)?;
    let frames = file.frame_axis.len();
    let rows = file.values.len();

    let mut values = Array2::<f32>::zeros((rows, frames));
    for (r, row) in file.values.into_iter().enumerate() {
        if row.len() != frames {
            return Err(StackAlignError::ShapeMismatch(format!(
                "row {r} has {} values, expected {frames}",
                row.len()
            )));
        }
        for (f, v) in row.into_iter().enumerate() {
            values[[r, f]] = none_to_nan(v);
        }
    }

    let metas = file
        .metas
        .into_iter()
        .map(|m| MetaColumn::new(m.name, m.values.into_iter().map(none_to_nan).collect()))
        .collect();

    Table::new(file.frame_axis, values, metas)
}

pub fn load_table(path: &Path) -> Result<Table> {
    table_from_json(&std::fs::read_to_string(path)?)
}

pub fn save_table(table: &Table, path: &Path) -> Result<()> {
    std::fs::write(path, table_to_json(table)?)?;
    Ok(())
}

/// Write the per-frame shift curves as a JSON array.
pub fn save_shifts(shifts: &[Shift], path: &Path) -> Result<()> {
    let records: Vec<ShiftRecord> = shifts
        .iter()
        .enumerate()
        .map(|(i, s)| ShiftRecord {
            frame: i + 1,
            dy: s.dy,
            dx: s.dx,
        })
        .collect();
    std::fs::write(path, serde_json::to_string_pretty(&records)?)?;
    Ok(())
}

pub fn load_shifts(path: &Path) -> Result<Vec<Shift>> {
    let records: Vec<ShiftRecord> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    Ok(records.into_iter().map(|r| Shift::new(r.dy, r.dx)).collect())
}
