mod common;

use ndarray::Array2;

use common::{write_gray16_tiff, write_gray8_tiff, write_rgb8_tiff};
use stackalign_core::error::StackAlignError;
use stackalign_core::frame::DisplayFrame;
use stackalign_core::io::stack_io::{export_stack, load_stack};

#[test]
fn test_export_load_roundtrip_is_byte_exact() {
    let page_a = Array2::from_shape_fn((6, 8), |(r, c)| (r * 8 + c) as u8);
    let page_b = Array2::from_shape_fn((6, 8), |(r, c)| (255 - (r * 8 + c)) as u8);
    let frames = vec![
        DisplayFrame::new(page_a.clone()),
        DisplayFrame::new(page_b.clone()),
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.tif");
    export_stack(&frames, &path).unwrap();

    let loaded = load_stack(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.width(), 8);
    assert_eq!(loaded.height(), 6);

    for r in 0..6 {
        for c in 0..8 {
            assert_eq!(loaded.get(0).unwrap().data[[r, c]], page_a[[r, c]] as f32);
            assert_eq!(loaded.get(1).unwrap().data[[r, c]], page_b[[r, c]] as f32);
        }
    }
}

#[test]
fn test_single_frame_exports_as_one_page_stack() {
    let frames = vec![DisplayFrame::new(Array2::from_elem((4, 4), 128u8))];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single.tif");
    export_stack(&frames, &path).unwrap();

    let loaded = load_stack(&path).unwrap();
    assert_eq!(loaded.len(), 1, "single frame stays a one-page stack");
    assert_eq!(loaded.get(0).unwrap().data[[2, 2]], 128.0);
}

#[test]
fn test_mismatched_page_dimensions_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mismatched.tif");
    write_gray8_tiff(
        &path,
        &[Array2::zeros((4, 4)), Array2::zeros((6, 6))],
    );

    let err = load_stack(&path).unwrap_err();
    assert!(
        matches!(err, StackAlignError::InvalidStack(_)),
        "expected InvalidStack, got {err:?}"
    );
}

#[test]
fn test_rgb_pages_collapse_by_channel_mean() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rgb.tif");
    // Every pixel (30, 60, 90): channel mean 60, not the luma value ~55.
    let page: Vec<u8> = [30u8, 60, 90].repeat(4 * 4);
    write_rgb8_tiff(&path, 4, 4, &[page]);

    let loaded = load_stack(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(0).unwrap().data[[1, 3]], 60.0);
}

#[test]
fn test_gray16_preserves_full_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep.tif");
    let mut page = Array2::from_elem((4, 4), 1000u16);
    page[[0, 0]] = 0;
    page[[3, 3]] = 65535;
    write_gray16_tiff(&path, &[page]);

    let loaded = load_stack(&path).unwrap();
    let frame = loaded.get(0).unwrap();
    assert_eq!(frame.original_bit_depth, 16);
    assert_eq!(frame.data[[0, 0]], 0.0);
    assert_eq!(frame.data[[1, 1]], 1000.0);
    assert_eq!(frame.data[[3, 3]], 65535.0);
}

#[test]
fn test_garbage_container_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.tif");
    std::fs::write(&path, b"not a tiff at all").unwrap();

    let err = load_stack(&path).unwrap_err();
    assert!(matches!(err, StackAlignError::InvalidStack(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_stack(std::path::Path::new("/definitely/not/here.tif")).unwrap_err();
    assert!(matches!(err, StackAlignError::Io(_)));
}

#[test]
fn test_export_empty_stack_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = export_stack(&[], &dir.path().join("empty.tif")).unwrap_err();
    assert!(matches!(err, StackAlignError::Export(_)));
}

#[test]
fn test_export_into_missing_directory_is_export_error() {
    let frames = vec![DisplayFrame::new(Array2::zeros((2, 2)))];
    let err = export_stack(&frames, std::path::Path::new("/no/such/dir/out.tif")).unwrap_err();
    assert!(matches!(err, StackAlignError::Export(_)));
}

#[test]
fn test_png_falls_back_to_single_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.png");
    let img = image::GrayImage::from_fn(8, 4, |x, y| image::Luma([(x + y * 8) as u8]));
    img.save(&path).unwrap();

    let loaded = load_stack(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.width(), 8);
    assert_eq!(loaded.height(), 4);
    assert_eq!(loaded.get(0).unwrap().data[[2, 5]], 21.0);
}
