use ndarray::{s, Array2, ArrayView2, ArrayViewMut1, Axis};

use crate::consts::SPLINE_EDGE_PADDING;
use crate::frame::Shift;

/// Pole of the cubic B-spline prefilter.
const CUBIC_POLE: f64 = -0.267_949_192_431_122_7;

/// Shift a frame by the given offset using cubic B-spline interpolation.
///
/// Samples outside the frame take the value of the nearest edge pixel, so the
/// result never contains NaN for finite input. Use [`shift_fill`] to mark the
/// uncovered margins explicitly. Whole-pixel shifts copy samples unchanged.
pub fn shift_frame(frame: ArrayView2<'_, f32>, shift: Shift) -> Array2<f32> {
    let (h, w) = frame.dim();
    if h == 0 || w == 0 {
        return frame.to_owned();
    }
    if shift.dy.fract() == 0.0 && shift.dx.fract() == 0.0 {
        return shift_whole_pixels(frame, shift.dy as i64, shift.dx as i64);
    }

    let coeffs = spline_coefficients(frame);
    let rows: Vec<SplineTaps> = (0..h)
        .map(|r| SplineTaps::at(r as f64 - shift.dy, h))
        .collect();
    let cols: Vec<SplineTaps> = (0..w)
        .map(|c| SplineTaps::at(c as f64 - shift.dx, w))
        .collect();

    Array2::from_shape_fn((h, w), |(r, c)| rows[r].sample(&cols[c], &coeffs) as f32)
}

/// Shift a frame and overwrite positions with no source data with `fill`.
///
/// The margin width is the shift rounded half-to-even, taken from the top/left
/// edge for positive shifts and from the bottom/right edge for negative ones.
pub fn shift_fill(frame: ArrayView2<'_, f32>, shift: Shift, fill: f32) -> Array2<f32> {
    let mut aligned = shift_frame(frame, shift);
    let (h, w) = aligned.dim();

    let (top, bottom) = margin_bounds(shift.dy, h);
    aligned.slice_mut(s![..top, ..]).fill(fill);
    aligned.slice_mut(s![bottom.., ..]).fill(fill);

    let (left, right) = margin_bounds(shift.dx, w);
    aligned.slice_mut(s![.., ..left]).fill(fill);
    aligned.slice_mut(s![.., right..]).fill(fill);

    aligned
}

/// Whole-pixel extent of a shift, rounded half-to-even.
pub fn rounded_shift(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// `(end of leading margin, start of trailing margin)` for one axis.
fn margin_bounds(shift: f64, len: usize) -> (usize, usize) {
    let s = rounded_shift(shift);
    let len_i = len as i64;
    let leading = s.clamp(0, len_i) as usize;
    let trailing = (len_i + s).clamp(0, len_i) as usize;
    (leading, trailing)
}

fn shift_whole_pixels(frame: ArrayView2<'_, f32>, dy: i64, dx: i64) -> Array2<f32> {
    let (h, w) = frame.dim();
    let source = |i: usize, d: i64, len: usize| (i as i64 - d).clamp(0, len as i64 - 1) as usize;
    Array2::from_shape_fn((h, w), |(r, c)| frame[[source(r, dy, h), source(c, dx, w)]])
}

/// Cubic B-spline coefficients of the frame, with `SPLINE_EDGE_PADDING`
/// edge-repeated pixels on every side.
fn spline_coefficients(frame: ArrayView2<'_, f32>) -> Array2<f64> {
    let (h, w) = frame.dim();
    let pad = SPLINE_EDGE_PADDING as isize;
    let clamp = |i: usize, len: usize| (i as isize - pad).clamp(0, len as isize - 1) as usize;

    let mut coeffs = Array2::from_shape_fn(
        (h + 2 * SPLINE_EDGE_PADDING, w + 2 * SPLINE_EDGE_PADDING),
        |(r, c)| frame[[clamp(r, h), clamp(c, w)]] as f64,
    );
    coeffs.axis_iter_mut(Axis(0)).for_each(prefilter_lane);
    coeffs.axis_iter_mut(Axis(1)).for_each(prefilter_lane);
    coeffs
}

fn prefilter_lane(mut lane: ArrayViewMut1<'_, f64>) {
    let mut buffer = lane.to_vec();
    bspline_prefilter(&mut buffer);
    for (dst, src) in lane.iter_mut().zip(buffer) {
        *dst = src;
    }
}

/// In-place recursive cubic B-spline prefilter with mirror boundaries
/// (Unser, Aldroubi & Eden, 1993).
fn bspline_prefilter(c: &mut [f64]) {
    let n = c.len();
    if n < 2 {
        return;
    }
    let z = CUBIC_POLE;
    let gain = (1.0 - z) * (1.0 - 1.0 / z);
    for v in c.iter_mut() {
        *v *= gain;
    }

    c[0] = mirror_causal_init(c, z);
    for k in 1..n {
        c[k] += z * c[k - 1];
    }

    c[n - 1] = (z / (z * z - 1.0)) * (c[n - 1] + z * c[n - 2]);
    for k in (0..n - 1).rev() {
        c[k] = z * (c[k + 1] - c[k]);
    }
}

/// Initial value of the causal pass for a mirror-symmetric extension.
fn mirror_causal_init(c: &[f64], z: f64) -> f64 {
    let n = c.len();
    let zn = z.powi(n as i32 - 1);
    let z2n = zn * zn;

    let mut sum = c[0] + zn * c[n - 1];
    let mut z_fwd = z;
    let mut z_back = z2n / z;
    for &v in &c[1..n - 1] {
        sum += (z_fwd + z_back) * v;
        z_fwd *= z;
        z_back /= z;
    }
    sum / (1.0 - z2n)
}

/// The four coefficients and weights that contribute at one coordinate.
struct SplineTaps {
    first: usize,
    weights: [f64; 4],
}

impl SplineTaps {
    /// Taps for `pos` in frame coordinates, clamped to the frame.
    fn at(pos: f64, len: usize) -> Self {
        let pos = pos.max(0.0).min((len - 1) as f64) + SPLINE_EDGE_PADDING as f64;
        let base = pos.floor();
        Self {
            first: base as usize - 1,
            weights: cubic_bspline_weights(pos - base),
        }
    }

    fn sample(&self, cols: &SplineTaps, coeffs: &Array2<f64>) -> f64 {
        let mut acc = 0.0;
        for (i, wy) in self.weights.iter().enumerate() {
            let row = self.first + i;
            for (j, wx) in cols.weights.iter().enumerate() {
                acc += wy * wx * coeffs[[row, cols.first + j]];
            }
        }
        acc
    }
}

fn cubic_bspline_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    let u = 1.0 - t;
    [
        u * u * u / 6.0,
        (4.0 - 6.0 * t2 + 3.0 * t3) / 6.0,
        (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) / 6.0,
        t3 / 6.0,
    ]
}
