use ndarray::{Array2, ArrayView2};
use num_complex::Complex;

use crate::consts::CROSS_POWER_EPSILON;
use crate::error::{Result, StackAlignError};
use crate::frame::Shift;

use super::fft::{fft2d_forward, ifft2d_inverse};
use super::upsampled::refine_upsampled;

/// Estimate the translation that moves `target` onto `reference` using FFT
/// phase correlation.
///
/// With `upsample_factor == 1` the result has integer-pixel precision; larger
/// factors refine the peak to `1 / upsample_factor` pixels with an upsampled
/// DFT around the coarse peak.
pub fn register_translation(
    reference: ArrayView2<'_, f32>,
    target: ArrayView2<'_, f32>,
    upsample_factor: usize,
) -> Result<Shift> {
    let (h, w) = reference.dim();
    let (th, tw) = target.dim();
    if h != th || w != tw {
        return Err(StackAlignError::ShapeMismatch(format!(
            "Array size mismatch: {}x{} vs {}x{}",
            w, h, tw, th
        )));
    }
    if upsample_factor == 0 {
        return Err(StackAlignError::InvalidConfig(
            "upsample factor must be at least 1".into(),
        ));
    }

    let ref_fft = fft2d_forward(reference);
    let tgt_fft = fft2d_forward(target);
    let cross_power = normalized_cross_power(&ref_fft, &tgt_fft);
    let correlation = ifft2d_inverse(&cross_power);

    let (peak_row, peak_col, _) = find_peak(&correlation);
    let coarse = Shift::new(wrap_peak(peak_row, h), wrap_peak(peak_col, w));

    let shift = if upsample_factor == 1 {
        coarse
    } else {
        refine_upsampled(&cross_power, coarse, upsample_factor)
    };

    // A length-1 axis carries no translation information.
    Ok(Shift::new(
        if h == 1 { 0.0 } else { shift.dy },
        if w == 1 { 0.0 } else { shift.dx },
    ))
}

pub(crate) fn normalized_cross_power(
    ref_fft: &Array2<Complex<f64>>,
    tgt_fft: &Array2<Complex<f64>>,
) -> Array2<Complex<f64>> {
    let mut result = Array2::<Complex<f64>>::zeros(ref_fft.raw_dim());
    ndarray::Zip::from(&mut result)
        .and(ref_fft)
        .and(tgt_fft)
        .for_each(|out, &r, &t| {
            let cross = r * t.conj();
            let mag = cross.norm();
            *out = if mag > CROSS_POWER_EPSILON {
                cross / mag
            } else {
                Complex::new(0.0, 0.0)
            };
        });
    result
}

pub(crate) fn find_peak(data: &Array2<f64>) -> (usize, usize, f64) {
    let mut best = (0, 0, f64::NEG_INFINITY);
    for ((row, col), &val) in data.indexed_iter() {
        if val > best.2 {
            best = (row, col, val);
        }
    }
    best
}

/// Convert a correlation peak index to a signed offset (handle wrap-around).
fn wrap_peak(peak: usize, len: usize) -> f64 {
    if peak > len / 2 {
        peak as f64 - len as f64
    } else {
        peak as f64
    }
}
