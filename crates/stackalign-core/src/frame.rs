use ndarray::Array2;

use crate::error::{Result, StackAlignError};

/// A single raw grayscale frame.
///
/// Pixel values are f32 in the source's original decoded range (0..255 for
/// 8-bit input, 0..65535 for 16-bit). Registration consumes raw frames
/// untouched; only the normalizer produces display data.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// An 8-bit frame ready for preview or export.
///
/// Produced by the normalizer (and magnified by the upscaler); never fed
/// back into registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<u8>,
}

impl DisplayFrame {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Ordered sequence of same-sized frames.
///
/// Frame index is the addressing key used throughout; order is preserved
/// from loading through registration to export.
#[derive(Clone, Debug)]
pub struct Stack {
    frames: Vec<Frame>,
    width: usize,
    height: usize,
}

impl Stack {
    /// Build a stack from decoded frames, validating that there is at
    /// least one frame and all frames share the same nonzero dimensions.
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self> {
        let first = frames
            .first()
            .ok_or_else(|| StackAlignError::InvalidStack("container holds no frames".into()))?;
        let (width, height) = (first.width(), first.height());
        if width == 0 || height == 0 {
            return Err(StackAlignError::InvalidStack(format!(
                "degenerate frame dimensions {width}x{height}"
            )));
        }
        for (i, frame) in frames.iter().enumerate() {
            if frame.width() != width || frame.height() != height {
                return Err(StackAlignError::InvalidStack(format!(
                    "frame {i} is {}x{}, expected {width}x{height}",
                    frame.width(),
                    frame.height()
                )));
            }
        }
        Ok(Self {
            frames,
            width,
            height,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Frame at `index`, or `FrameIndexOutOfRange`.
    pub fn get(&self, index: usize) -> Result<&Frame> {
        self.frames
            .get(index)
            .ok_or(StackAlignError::FrameIndexOutOfRange {
                index,
                total: self.frames.len(),
            })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}
