use std::path::Path;
use std::sync::Mutex;

use ndarray::Array2;
use tiff::encoder::{colortype, TiffEncoder};

use stackalign_core::error::{Result, StackAlignError};
use stackalign_core::frame::{Frame, Stack};
use stackalign_core::registration::{RegistrationEngine, TransformKind};

/// Frame filled with a single value.
pub fn constant_frame(height: usize, width: usize, value: f32) -> Frame {
    Frame::new(Array2::from_elem((height, width), value), 8)
}

/// Frame whose samples form a horizontal ramp `base + column`.
pub fn gradient_frame(height: usize, width: usize, base: f32) -> Frame {
    let data = Array2::from_shape_fn((height, width), |(_, c)| base + c as f32);
    Frame::new(data, 8)
}

/// 8-bit page with a two-column bright block at `block_col`, dim elsewhere.
/// The block position tags the page so ordering survives the pipeline.
pub fn marker_page(height: usize, width: usize, block_col: usize) -> Array2<u8> {
    Array2::from_shape_fn((height, width), |(_, c)| {
        if c == block_col || c == block_col + 1 {
            200
        } else {
            10
        }
    })
}

pub fn stack_of(frames: Vec<Frame>) -> Stack {
    Stack::from_frames(frames).expect("valid test stack")
}

/// Write a multi-page 8-bit grayscale TIFF.
pub fn write_gray8_tiff(path: &Path, pages: &[Array2<u8>]) {
    let file = std::fs::File::create(path).expect("create test TIFF");
    let mut encoder = TiffEncoder::new(file).expect("start test TIFF");
    for page in pages {
        let (h, w) = page.dim();
        let samples: Vec<u8> = page.iter().copied().collect();
        encoder
            .write_image::<colortype::Gray8>(w as u32, h as u32, &samples)
            .expect("write test page");
    }
}

/// Write a multi-page 16-bit grayscale TIFF.
pub fn write_gray16_tiff(path: &Path, pages: &[Array2<u16>]) {
    let file = std::fs::File::create(path).expect("create test TIFF");
    let mut encoder = TiffEncoder::new(file).expect("start test TIFF");
    for page in pages {
        let (h, w) = page.dim();
        let samples: Vec<u16> = page.iter().copied().collect();
        encoder
            .write_image::<colortype::Gray16>(w as u32, h as u32, &samples)
            .expect("write test page");
    }
}

/// Write a multi-page 8-bit RGB TIFF from interleaved channel data.
pub fn write_rgb8_tiff(path: &Path, width: usize, height: usize, pages: &[Vec<u8>]) {
    let file = std::fs::File::create(path).expect("create test TIFF");
    let mut encoder = TiffEncoder::new(file).expect("start test TIFF");
    for page in pages {
        assert_eq!(page.len(), width * height * 3, "interleaved RGB page size");
        encoder
            .write_image::<colortype::RGB8>(width as u32, height as u32, page)
            .expect("write test page");
    }
}

/// Engine that records the (reference, moving) top-left sample pairs and
/// transform kind of every request, returning the moving frame unchanged.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<(f32, f32, TransformKind)>>,
}

impl RegistrationEngine for RecordingEngine {
    fn estimate_and_apply(
        &self,
        reference: &Frame,
        moving: &Frame,
        kind: TransformKind,
    ) -> Result<Frame> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push((reference.data[[0, 0]], moving.data[[0, 0]], kind));
        Ok(moving.clone())
    }
}

/// Engine that fails every request.
pub struct FailingEngine;

impl RegistrationEngine for FailingEngine {
    fn estimate_and_apply(
        &self,
        _reference: &Frame,
        _moving: &Frame,
        _kind: TransformKind,
    ) -> Result<Frame> {
        Err(StackAlignError::Registration(
            "engine did not converge".into(),
        ))
    }
}
