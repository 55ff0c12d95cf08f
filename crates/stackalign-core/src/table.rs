use ndarray::Array2;

use crate::error::{Result, StackAlignError};

/// A continuous per-row variable, such as a spatial coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct MetaColumn {
    pub name: String,
    pub values: Vec<f64>,
}

impl MetaColumn {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Flattened image stack: one row per pixel position, one column per frame.
///
/// `frame_axis` holds the physical value identifying each frame column
/// (energy, wavenumber, time...). Spatial coordinates live in `metas`.
#[derive(Clone, Debug)]
pub struct Table {
    pub frame_axis: Vec<f64>,
    /// Sample values, shape = (rows, frames). Missing samples are NaN.
    pub values: Array2<f32>,
    pub metas: Vec<MetaColumn>,
}

impl Table {
    pub fn new(frame_axis: Vec<f64>, values: Array2<f32>, metas: Vec<MetaColumn>) -> Result<Self> {
        let (rows, frames) = values.dim();
        if frame_axis.len() != frames {
            return Err(StackAlignError::ShapeMismatch(format!(
                "frame axis has {} values but table has {} frame columns",
                frame_axis.len(),
                frames
            )));
        }
        if let Some(meta) = metas.iter().find(|m| m.values.len() != rows) {
            return Err(StackAlignError::ShapeMismatch(format!(
                "meta column '{}' has {} values but table has {} rows",
                meta.name,
                meta.values.len(),
                rows
            )));
        }
        Ok(Self {
            frame_axis,
            values,
            metas,
        })
    }

    pub fn row_count(&self) -> usize {
        self.values.nrows()
    }

    pub fn frame_count(&self) -> usize {
        self.values.ncols()
    }

    pub fn meta(&self, name: &str) -> Option<&MetaColumn> {
        self.metas.iter().find(|m| m.name == name)
    }

    pub fn meta_names(&self) -> impl Iterator<Item = &str> {
        self.metas.iter().map(|m| m.name.as_str())
    }
}
