use ndarray::Array2;

use crate::frame::DisplayFrame;

/// Magnify a display frame by an integer factor using nearest-neighbor
/// sampling.
///
/// Pixels become `factor`x`factor` blocks; no interpolation, so the
/// discrete structure of the data stays visible and no sub-pixel precision
/// is implied. A factor of 1 (or 0) returns the frame unchanged.
pub fn upscale(frame: &DisplayFrame, factor: usize) -> DisplayFrame {
    if factor <= 1 {
        return frame.clone();
    }
    let (h, w) = frame.data.dim();
    let data = Array2::from_shape_fn((h * factor, w * factor), |(r, c)| {
        frame.data[[r / factor, c / factor]]
    });
    DisplayFrame::new(data)
}
