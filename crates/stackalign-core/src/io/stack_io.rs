use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::DynamicImage;
use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::ColorType;
use tracing::debug;

use crate::error::{Result, StackAlignError};
use crate::frame::{DisplayFrame, Frame, Stack};

/// Decode a multi-frame container into an ordered stack of raw frames.
///
/// TIFF files are read directory by directory; any other raster `image`
/// can open is treated as a single-frame stack. Three-channel sources
/// collapse to grayscale by averaging the channels (a deliberate plain
/// mean, not a luma weighting). Sample values keep their original decoded
/// range; no normalization happens at load time.
pub fn load_stack(path: &Path) -> Result<Stack> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff") => {
            load_tiff_stack(path)
        }
        _ => load_single_image(path),
    }
}

fn load_tiff_stack(path: &Path) -> Result<Stack> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)
        .map_err(|e| StackAlignError::InvalidStack(format!("failed to open TIFF container: {e}")))?;

    let mut frames = Vec::new();
    loop {
        frames.push(decode_page(&mut decoder, frames.len())?);
        if !decoder.more_images() {
            break;
        }
        decoder.next_image().map_err(|e| {
            StackAlignError::InvalidStack(format!(
                "failed to advance to page {}: {e}",
                frames.len()
            ))
        })?;
    }

    debug!(frames = frames.len(), path = %path.display(), "Decoded TIFF stack");
    Stack::from_frames(frames)
}

fn decode_page(decoder: &mut Decoder<File>, page: usize) -> Result<Frame> {
    let invalid = |msg: String| StackAlignError::InvalidStack(msg);

    let (w, h) = decoder
        .dimensions()
        .map_err(|e| invalid(format!("page {page} has no readable dimensions: {e}")))?;
    let color = decoder
        .colortype()
        .map_err(|e| invalid(format!("page {page} has no readable color type: {e}")))?;
    let pixels = decoder
        .read_image()
        .map_err(|e| invalid(format!("failed to decode page {page}: {e}")))?;

    let (w, h) = (w as usize, h as usize);
    match (color, pixels) {
        (ColorType::Gray(8), DecodingResult::U8(buf)) => {
            gray_frame(buf.iter().map(|&v| v as f32), w, h, 8, page)
        }
        (ColorType::Gray(16), DecodingResult::U16(buf)) => {
            gray_frame(buf.iter().map(|&v| v as f32), w, h, 16, page)
        }
        (ColorType::RGB(8), DecodingResult::U8(buf)) => {
            rgb_frame(buf.iter().map(|&v| v as f32), w, h, 8, page)
        }
        (ColorType::RGB(16), DecodingResult::U16(buf)) => {
            rgb_frame(buf.iter().map(|&v| v as f32), w, h, 16, page)
        }
        (color, _) => Err(invalid(format!(
            "page {page} has unsupported TIFF layout {color:?}"
        ))),
    }
}

fn gray_frame(
    samples: impl Iterator<Item = f32>,
    width: usize,
    height: usize,
    bit_depth: u8,
    page: usize,
) -> Result<Frame> {
    let data: Vec<f32> = samples.collect();
    let arr = Array2::from_shape_vec((height, width), data).map_err(|_| {
        StackAlignError::InvalidStack(format!("page {page} sample count does not match {width}x{height}"))
    })?;
    Ok(Frame::new(arr, bit_depth))
}

fn rgb_frame(
    samples: impl Iterator<Item = f32>,
    width: usize,
    height: usize,
    bit_depth: u8,
    page: usize,
) -> Result<Frame> {
    let interleaved: Vec<f32> = samples.collect();
    if interleaved.len() != width * height * 3 {
        return Err(StackAlignError::InvalidStack(format!(
            "page {page} sample count does not match {width}x{height} RGB"
        )));
    }
    let gray: Vec<f32> = interleaved
        .chunks_exact(3)
        .map(|px| (px[0] + px[1] + px[2]) / 3.0)
        .collect();
    let arr = Array2::from_shape_vec((height, width), gray)
        .expect("channel-collapsed buffer matches dimensions");
    Ok(Frame::new(arr, bit_depth))
}

/// Single-page fallback for non-TIFF rasters: one frame, same grayscale
/// collapse rule as the multi-page path.
fn load_single_image(path: &Path) -> Result<Stack> {
    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => StackAlignError::Io(io),
        other => StackAlignError::InvalidStack(format!("failed to decode raster: {other}")),
    })?;
    let frame = match img {
        DynamicImage::ImageLuma8(gray) => {
            let (w, h) = gray.dimensions();
            let data: Vec<f32> = gray.into_raw().into_iter().map(|v| v as f32).collect();
            Frame::new(
                Array2::from_shape_vec((h as usize, w as usize), data)
                    .expect("decoded buffer matches dimensions"),
                8,
            )
        }
        DynamicImage::ImageLuma16(gray) => {
            let (w, h) = gray.dimensions();
            let data: Vec<f32> = gray.into_raw().into_iter().map(|v| v as f32).collect();
            Frame::new(
                Array2::from_shape_vec((h as usize, w as usize), data)
                    .expect("decoded buffer matches dimensions"),
                16,
            )
        }
        DynamicImage::ImageRgb16(rgb) => {
            let (w, h) = rgb.dimensions();
            let gray: Vec<f32> = rgb
                .into_raw()
                .chunks_exact(3)
                .map(|px| (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0)
                .collect();
            Frame::new(
                Array2::from_shape_vec((h as usize, w as usize), gray)
                    .expect("channel-collapsed buffer matches dimensions"),
                16,
            )
        }
        other => {
            // Anything else (RGBA, LumaA, ...) flattens through 8-bit RGB.
            let rgb = other.to_rgb8();
            let (w, h) = rgb.dimensions();
            let gray: Vec<f32> = rgb
                .into_raw()
                .chunks_exact(3)
                .map(|px| (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0)
                .collect();
            Frame::new(
                Array2::from_shape_vec((h as usize, w as usize), gray)
                    .expect("channel-collapsed buffer matches dimensions"),
                8,
            )
        }
    };
    debug!(path = %path.display(), "Decoded single-frame raster");
    Stack::from_frames(vec![frame])
}

/// Serialize normalized display frames as a multi-page 8-bit grayscale
/// TIFF (minisblack photometric), one page per frame in stack order.
///
/// A single frame becomes a one-page file, keeping the artifact format
/// uniform across alignment modes.
pub fn export_stack(frames: &[DisplayFrame], path: &Path) -> Result<()> {
    if frames.is_empty() {
        return Err(StackAlignError::Export(
            "refusing to export an empty stack".into(),
        ));
    }

    let file = File::create(path).map_err(|e| {
        StackAlignError::Export(format!("failed to create artifact at {}: {e}", path.display()))
    })?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))
        .map_err(|e| StackAlignError::Export(format!("failed to start TIFF artifact: {e}")))?;

    for (i, frame) in frames.iter().enumerate() {
        let (h, w) = frame.data.dim();
        let samples: Vec<u8> = frame.data.iter().copied().collect();
        encoder
            .write_image::<colortype::Gray8>(w as u32, h as u32, &samples)
            .map_err(|e| StackAlignError::Export(format!("failed to write page {i}: {e}")))?;
    }

    debug!(frames = frames.len(), path = %path.display(), "Exported TIFF stack");
    Ok(())
}
