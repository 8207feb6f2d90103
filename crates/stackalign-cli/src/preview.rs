use std::fs;
use std::path::Path;

use anyhow::Result;
use image::GrayImage;
use stackalign_core::frame::DisplayFrame;
use stackalign_core::session::{AlignmentMode, BrowseTarget, SessionStore};

/// Dump every published session frame as an 8-bit grayscale PNG.
///
/// Files are named `source_NNN.png` / `result_NNN.png` in browse order.
/// Returns the number of files written.
pub fn write_previews(store: &SessionStore, mode: AlignmentMode, dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir)?;

    let mut written = 0;
    for (target, prefix) in [
        (BrowseTarget::Source, "source"),
        (BrowseTarget::Result, "result"),
    ] {
        let mut index = 0;
        while let Some(frame) = store.browse(mode, target, index) {
            save_png(&frame, &dir.join(format!("{prefix}_{index:03}.png")))?;
            written += 1;
            index += 1;
        }
    }
    Ok(written)
}

fn save_png(frame: &DisplayFrame, path: &Path) -> Result<()> {
    let (w, h) = (frame.width(), frame.height());
    let pixels: Vec<u8> = frame.data.iter().copied().collect();
    let img =
        GrayImage::from_raw(w as u32, h as u32, pixels).expect("buffer size matches dimensions");
    img.save(path)?;
    Ok(())
}
