use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use stackalign_core::consts::{DEFAULT_CLIP_HIGH_PERCENTILE, DEFAULT_CLIP_LOW_PERCENTILE};
use stackalign_core::io::stack_io::{export_stack, load_stack};
use stackalign_core::normalize::{normalize_stack, NormalizeConfig};

#[derive(Args)]
pub struct NormalizeArgs {
    /// Input stack container
    pub input: PathBuf,

    /// Output artifact path
    #[arg(short, long, default_value = "normalized.tif")]
    pub output: PathBuf,

    /// Lower clip percentile
    #[arg(long, default_value_t = DEFAULT_CLIP_LOW_PERCENTILE)]
    pub low: f32,

    /// Upper clip percentile
    #[arg(long, default_value_t = DEFAULT_CLIP_HIGH_PERCENTILE)]
    pub high: f32,
}

pub fn run(args: &NormalizeArgs) -> Result<()> {
    let config = NormalizeConfig {
        low_percentile: args.low,
        high_percentile: args.high,
        ..NormalizeConfig::default()
    };
    config.validate()?;

    let stack = load_stack(&args.input)?;
    let frames = normalize_stack(&stack, &config);
    export_stack(&frames, &args.output)?;

    println!(
        "Normalized {} frames -> {}",
        frames.len(),
        args.output.display()
    );
    Ok(())
}
