#![allow(dead_code)]

use std::sync::Mutex;

use ndarray::{Array2, Array3, Axis};

use stackalign_core::hypercube::build_table;
use stackalign_core::pipeline::{PipelineStage, ProgressReporter};
use stackalign_core::table::Table;

pub const X_NAME: &str = "map_x";
pub const Y_NAME: &str = "map_y";

/// A few Gaussian blobs (sigma = 2 px) translated by `(dy, dx)`.
///
/// Values are evaluated analytically, so sub-pixel translations are exact.
pub fn blob_scene(h: usize, w: usize, dy: f64, dx: f64) -> Array2<f32> {
    let blobs = [
        (0.30, 0.35, 1.0),
        (0.62, 0.58, 0.6),
        (0.45, 0.25, 0.8),
        (0.70, 0.75, 0.5),
        (0.35, 0.68, 0.7),
    ];
    let sigma2 = 2.0 * 2.0 * 2.0;
    Array2::from_shape_fn((h, w), |(r, c)| {
        blobs
            .iter()
            .map(|&(fy, fx, amp)| {
                let cy = fy * h as f64 + dy;
                let cx = fx * w as f64 + dx;
                let d2 = (r as f64 - cy).powi(2) + (c as f64 - cx).powi(2);
                amp * (-d2 / sigma2).exp()
            })
            .sum::<f64>() as f32
    })
}

/// Stack of blob scenes, one per shift.
pub fn blob_stack(h: usize, w: usize, offsets: &[(f64, f64)]) -> Array3<f32> {
    let frames: Vec<Array2<f32>> = offsets
        .iter()
        .map(|&(dy, dx)| blob_scene(h, w, dy, dx))
        .collect();
    stack_frames(&frames)
}

pub fn stack_frames(frames: &[Array2<f32>]) -> Array3<f32> {
    let (h, w) = frames[0].dim();
    let mut cube = Array3::<f32>::zeros((frames.len(), h, w));
    for (mut out, frame) in cube.axis_iter_mut(Axis(0)).zip(frames) {
        out.assign(frame);
    }
    cube
}

/// Flatten a stack into a table with integer pixel coordinates.
pub fn table_from_stack(cube: &Array3<f32>) -> Table {
    let (frames, h, w) = cube.dim();
    let frame_axis: Vec<f64> = (0..frames).map(|f| 700.0 + 5.0 * f as f64).collect();
    let xs: Vec<f64> = (0..w).map(|x| x as f64).collect();
    let ys: Vec<f64> = (0..h).map(|y| y as f64).collect();
    build_table(cube.view(), &frame_axis, &xs, &ys, X_NAME, Y_NAME).expect("build table")
}

pub fn shift_error(estimated: (f64, f64), expected: (f64, f64)) -> f64 {
    ((estimated.0 - expected.0).powi(2) + (estimated.1 - expected.1).powi(2)).sqrt()
}

/// Records which pipeline stages were started.
#[derive(Default)]
pub struct StageRecorder {
    pub stages: Mutex<Vec<PipelineStage>>,
}

impl StageRecorder {
    pub fn started(&self, stage: PipelineStage) -> bool {
        self.stages.lock().unwrap().contains(&stage)
    }
}

impl ProgressReporter for StageRecorder {
    fn begin_stage(&self, stage: PipelineStage, _total_items: Option<usize>) {
        self.stages.lock().unwrap().push(stage);
    }
}
