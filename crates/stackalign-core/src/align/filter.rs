//! Optional pre-filtering applied to frames before correlation.
//!
//! Correlating a Sobel derivative instead of raw intensities emphasizes edges,
//! which helps when frames differ in overall brightness.

use ndarray::{Array2, ArrayView2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeFilter {
    #[default]
    None,
    Sobel,
}

impl EdgeFilter {
    pub fn from_sobel_flag(sobel: bool) -> Self {
        if sobel {
            Self::Sobel
        } else {
            Self::None
        }
    }

    pub fn apply(&self, frame: ArrayView2<'_, f32>) -> Array2<f32> {
        match self {
            Self::None => frame.to_owned(),
            Self::Sobel => sobel_rows(frame),
        }
    }
}

impl std::fmt::Display for EdgeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Sobel => write!(f, "Sobel"),
        }
    }
}

/// Signed Sobel derivative across rows (the y axis), smoothed along columns.
///
/// Borders repeat the edge pixel, which for a 3x3 kernel is the same as
/// mirroring about the edge.
///
///   G = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]]
pub fn sobel_rows(data: ArrayView2<'_, f32>) -> Array2<f32> {
    let (h, w) = data.dim();
    if h == 0 || w == 0 {
        return Array2::zeros((h, w));
    }

    let at = |r: isize, c: isize| -> f64 {
        let r = r.clamp(0, h as isize - 1) as usize;
        let c = c.clamp(0, w as isize - 1) as usize;
        data[[r, c]] as f64
    };
    let smoothed = |r: isize, c: isize| at(r, c - 1) + 2.0 * at(r, c) + at(r, c + 1);

    Array2::from_shape_fn((h, w), |(row, col)| {
        let (r, c) = (row as isize, col as isize);
        (smoothed(r + 1, c) - smoothed(r - 1, c)) as f32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_image_has_no_edges() {
        let data = Array2::<f32>::from_elem((5, 5), 0.7);
        let edges = sobel_rows(data.view());
        assert!(edges.iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn horizontal_edge_gives_signed_response() {
        let data = Array2::from_shape_fn((6, 5), |(r, _)| if r >= 3 { 1.0f32 } else { 0.0 });
        let edges = sobel_rows(data.view());
        assert!((edges[[2, 2]] - 4.0).abs() < 1e-6);
        assert!((edges[[3, 2]] - 4.0).abs() < 1e-6);
        assert!(edges[[0, 2]].abs() < 1e-6);
        assert!(edges[[5, 4]].abs() < 1e-6);

        let flipped = data.mapv(|v| 1.0 - v);
        assert!((sobel_rows(flipped.view())[[2, 2]] + 4.0).abs() < 1e-6);
    }

    #[test]
    fn vertical_edge_is_ignored() {
        let data = Array2::from_shape_fn((5, 6), |(_, c)| if c >= 3 { 1.0f32 } else { 0.0 });
        let edges = sobel_rows(data.view());
        assert!(edges.iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn ramp_gives_constant_derivative() {
        // d/dr of 3r is 3; the kernel weighs it by 2 * (1 + 2 + 1).
        let data = Array2::from_shape_fn((5, 4), |(r, _)| 3.0 * r as f32);
        let edges = sobel_rows(data.view());
        assert!((edges[[2, 1]] - 24.0).abs() < 1e-5);
        // Repeated edge row halves the difference at the border.
        assert!((edges[[0, 1]] - 12.0).abs() < 1e-5);
    }

    #[test]
    fn none_filter_is_identity() {
        let data = Array2::from_shape_fn((3, 4), |(r, c)| (r * 4 + c) as f32);
        assert_eq!(EdgeFilter::None.apply(data.view()), data);
    }
}
