use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use stackalign_core::io::stack_io::load_stack;

#[derive(Args)]
pub struct InfoArgs {
    /// Input stack container
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let stack = load_stack(&args.file)?;
    let bit_depth = stack.get(0)?.original_bit_depth;

    println!("File:        {}", args.file.display());
    println!("Frames:      {}", stack.len());
    println!("Dimensions:  {}x{}", stack.width(), stack.height());
    println!("Bit depth:   {}", bit_depth);

    let frame_bytes = stack.width() * stack.height() * (bit_depth as usize).div_ceil(8);
    let total_mb = (frame_bytes * stack.len()) as f64 / (1024.0 * 1024.0);
    println!("Data size:   {:.1} MB", total_mb);

    Ok(())
}
