use ndarray::{Array1, Array3, ArrayView2};
use serde::{Deserialize, Serialize};

/// Translation that moves a frame onto its reference.
///
/// Positive values move the frame down (`dy`) and right (`dx`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub dy: f64,
    pub dx: f64,
}

impl Shift {
    pub fn new(dy: f64, dx: f64) -> Self {
        Self { dy, dx }
    }

    pub fn is_zero(&self) -> bool {
        self.dy == 0.0 && self.dx == 0.0
    }
}

/// Evenly spaced physical coordinates along one spatial axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
}

impl AxisRange {
    pub fn new(start: f64, stop: f64, count: usize) -> Self {
        Self { start, stop, count }
    }

    /// Distance between neighbouring grid positions (1 for a single-point axis).
    pub fn step(&self) -> f64 {
        if self.count <= 1 {
            1.0
        } else {
            (self.stop - self.start) / (self.count - 1) as f64
        }
    }

    /// Coordinates of every grid position, equivalent to `linspace(start, stop, count)`.
    pub fn values(&self) -> Array1<f64> {
        Array1::linspace(self.start, self.stop, self.count)
    }
}

/// Dense image stack laid out as (frame, row, col).
///
/// Rows follow the y axis and columns follow the x axis.
#[derive(Clone, Debug)]
pub struct Hypercube {
    pub data: Array3<f32>,
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Hypercube {
    pub fn new(data: Array3<f32>, x: AxisRange, y: AxisRange) -> Self {
        Self { data, x, y }
    }

    pub fn frame_count(&self) -> usize {
        self.data.dim().0
    }

    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    pub fn frame(&self, index: usize) -> ArrayView2<'_, f32> {
        self.data.index_axis(ndarray::Axis(0), index)
    }

    /// Number of NaN samples anywhere in the stack.
    pub fn nan_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_nan()).count()
    }
}
