use ndarray::{s, Array3, ArrayView3};

use crate::align::interpolate::rounded_shift;
use crate::frame::{AxisRange, Shift};

/// Rectangle that is valid (not NaN-filled) in every shifted frame.
///
/// Bounds are half-open: rows `row_start..row_end`, cols `col_start..col_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropWindow {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl CropWindow {
    /// The whole `height` x `width` frame.
    pub fn full(height: usize, width: usize) -> Self {
        Self {
            row_start: 0,
            row_end: height,
            col_start: 0,
            col_end: width,
        }
    }

    /// Intersection of the valid regions left by `shifts` on frames of the
    /// given size.
    ///
    /// The largest positive shift on an axis removes that many leading
    /// pixels; the most negative one removes trailing pixels.
    pub fn from_shifts(shifts: &[Shift], height: usize, width: usize) -> Self {
        let (row_start, row_end) = valid_span(shifts.iter().map(|s| s.dy), height);
        let (col_start, col_end) = valid_span(shifts.iter().map(|s| s.dx), width);
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    pub fn height(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn width(&self) -> usize {
        self.col_end - self.col_start
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// Cut the window out of every frame of a (frame, row, col) stack.
    pub fn apply(&self, stack: ArrayView3<'_, f32>) -> Array3<f32> {
        stack
            .slice(s![.., self.row_start..self.row_end, self.col_start..self.col_end])
            .to_owned()
    }

    /// Physical x coordinates of the retained columns.
    pub fn x_coords(&self, x: &AxisRange) -> Vec<f64> {
        x.values()
            .slice(s![self.col_start..self.col_end])
            .to_vec()
    }

    /// Physical y coordinates of the retained rows.
    pub fn y_coords(&self, y: &AxisRange) -> Vec<f64> {
        y.values()
            .slice(s![self.row_start..self.row_end])
            .to_vec()
    }
}

fn valid_span(values: impl Iterator<Item = f64>, len: usize) -> (usize, usize) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0, len);
    }

    let len_i = len as i64;
    let start = rounded_shift(max).clamp(0, len_i);
    let end = (len_i + rounded_shift(min)).clamp(start, len_i);
    (start as usize, end as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_shifts_keep_everything() {
        let window = CropWindow::from_shifts(&[Shift::default(); 3], 4, 6);
        assert_eq!(window, CropWindow::full(4, 6));
    }

    #[test]
    fn opposite_shifts_trim_both_edges() {
        let shifts = [Shift::new(0.0, 0.0), Shift::new(2.0, -1.0), Shift::new(-1.0, 3.0)];
        let window = CropWindow::from_shifts(&shifts, 5, 5);
        assert_eq!((window.row_start, window.row_end), (2, 4));
        assert_eq!((window.col_start, window.col_end), (3, 4));
        assert_eq!((window.height(), window.width()), (2, 1));
    }

    #[test]
    fn shifts_beyond_frame_give_empty_window() {
        let shifts = [Shift::new(4.0, 0.0), Shift::new(-4.0, 0.0)];
        let window = CropWindow::from_shifts(&shifts, 5, 5);
        assert!(window.is_empty());
        assert_eq!(window.height(), 0);
        assert_eq!(window.width(), 5);
    }

    #[test]
    fn coordinates_follow_window() {
        let window = CropWindow {
            row_start: 1,
            row_end: 3,
            col_start: 2,
            col_end: 4,
        };
        let x = AxisRange::new(10.0, 14.0, 5);
        let y = AxisRange::new(0.0, 1.5, 4);
        assert_eq!(window.x_coords(&x), vec![12.0, 13.0]);
        assert_eq!(window.y_coords(&y), vec![0.5, 1.0]);
    }
}
