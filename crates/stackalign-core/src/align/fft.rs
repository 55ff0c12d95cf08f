use std::sync::Arc;

use ndarray::{Array2, ArrayView2, ArrayViewMut1, Axis};
use num_complex::Complex;
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// 2D FFT of real data: row-wise FFT, then column-wise FFT.
pub fn fft2d_forward(data: ArrayView2<'_, f32>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = data.mapv(|v| Complex::new(v as f64, 0.0));
    let parallel = h * w >= PARALLEL_PIXEL_THRESHOLD;

    // Iterating over axis 0 visits rows, over axis 1 visits columns.
    transform_lanes(&mut result, Axis(0), &fft_row, parallel);
    transform_lanes(&mut result, Axis(1), &fft_col, parallel);

    result
}

/// 2D inverse FFT, returning the real part normalized by `1/(h*w)`.
pub fn ifft2d_inverse(data: &Array2<Complex<f64>>) -> Array2<f64> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = data.clone();
    let parallel = h * w >= PARALLEL_PIXEL_THRESHOLD;

    transform_lanes(&mut work, Axis(1), &ifft_col, parallel);
    transform_lanes(&mut work, Axis(0), &ifft_row, parallel);

    let scale = 1.0 / (h * w) as f64;
    work.mapv(|v| v.re * scale)
}

fn transform_lanes(
    data: &mut Array2<Complex<f64>>,
    axis: Axis,
    fft: &Arc<dyn Fft<f64>>,
    parallel: bool,
) {
    if parallel {
        data.axis_iter_mut(axis)
            .into_par_iter()
            .for_each(|lane| transform_lane(lane, fft.as_ref()));
    } else {
        data.axis_iter_mut(axis)
            .for_each(|lane| transform_lane(lane, fft.as_ref()));
    }
}

fn transform_lane(mut lane: ArrayViewMut1<'_, Complex<f64>>, fft: &dyn Fft<f64>) {
    let mut buffer = lane.to_vec();
    fft.process(&mut buffer);
    for (dst, src) in lane.iter_mut().zip(buffer) {
        *dst = src;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn forward_then_inverse_restores_input() {
        let data = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let restored = ifft2d_inverse(&fft2d_forward(data.view()));
        for (a, b) in data.iter().zip(restored.iter()) {
            assert!((*a as f64 - b).abs() < 1e-9);
        }
    }

    #[test]
    fn dc_term_is_sum() {
        let data = Array2::<f32>::from_elem((4, 4), 0.5);
        let spectrum = fft2d_forward(data.view());
        assert!((spectrum[[0, 0]].re - 8.0).abs() < 1e-9);
        assert!(spectrum[[1, 2]].norm() < 1e-9);
    }
}
