use ndarray::{array, Array2};

use stackalign_core::display::upscale;
use stackalign_core::frame::DisplayFrame;

#[test]
fn test_upscale_produces_constant_blocks() {
    let frame = DisplayFrame::new(array![[1u8, 2], [3, 4]]);
    let scaled = upscale(&frame, 3);

    assert_eq!(scaled.width(), 6);
    assert_eq!(scaled.height(), 6);

    for r in 0..3 {
        for c in 0..3 {
            assert_eq!(scaled.data[[r, c]], 1, "top-left block at ({r},{c})");
            assert_eq!(scaled.data[[r, c + 3]], 2, "top-right block at ({r},{c})");
            assert_eq!(scaled.data[[r + 3, c]], 3, "bottom-left block at ({r},{c})");
            assert_eq!(scaled.data[[r + 3, c + 3]], 4, "bottom-right block at ({r},{c})");
        }
    }
}

#[test]
fn test_upscale_never_interpolates() {
    // A lone bright pixel must stay a hard-edged block; any interpolation
    // would introduce intermediate values.
    let mut data = Array2::zeros((4, 4));
    data[[1, 2]] = 255u8;
    let scaled = upscale(&DisplayFrame::new(data), 4);

    let bright = scaled.data.iter().filter(|&&v| v == 255).count();
    let dark = scaled.data.iter().filter(|&&v| v == 0).count();
    assert_eq!(bright, 16);
    assert_eq!(bright + dark, 16 * 16);
}

#[test]
fn test_upscale_factor_one_is_identity() {
    let frame = DisplayFrame::new(array![[7u8, 9], [11, 13]]);
    assert_eq!(upscale(&frame, 1), frame);
    assert_eq!(upscale(&frame, 0), frame);
}
