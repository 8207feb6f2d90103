use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use stackalign_core::pipeline::config::AlignConfig;
use stackalign_core::pipeline::{
    align_frame_to_frame, align_intra_stack, align_stack_to_stack, AlignmentResult, IntraReference,
};
use stackalign_core::registration::{PassthroughEngine, TransformKind};
use stackalign_core::session::{AlignmentMode, SessionStore};

use crate::preview::write_previews;

#[derive(Subcommand)]
pub enum AlignCommand {
    /// Align every frame of a stack to a reference frame from the same or
    /// an external stack
    Intra(IntraArgs),
    /// Align every frame of a moving stack to the first frame of a
    /// reference stack
    Stacks(StacksArgs),
    /// Align one frame of a stack to another frame of the same stack
    Frames(FramesArgs),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TransformArg {
    Translation,
    RigidBody,
    ScaledRotation,
    Affine,
    Bilinear,
}

impl From<TransformArg> for TransformKind {
    fn from(arg: TransformArg) -> Self {
        match arg {
            TransformArg::Translation => TransformKind::Translation,
            TransformArg::RigidBody => TransformKind::RigidBody,
            TransformArg::ScaledRotation => TransformKind::ScaledRotation,
            TransformArg::Affine => TransformKind::Affine,
            TransformArg::Bilinear => TransformKind::Bilinear,
        }
    }
}

#[derive(Args)]
pub struct CommonArgs {
    /// Transform family to request from the registration engine
    #[arg(long, value_enum)]
    pub transform: Option<TransformArg>,

    /// TOML file with alignment options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output artifact path
    #[arg(short, long, default_value = "aligned.tif")]
    pub output: PathBuf,

    /// Directory for PNG previews of the published session frames
    #[arg(long)]
    pub preview_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct IntraArgs {
    /// Input stack container
    pub stack: PathBuf,

    /// Reference frame index within the input stack
    #[arg(long, default_value_t = 0)]
    pub reference: usize,

    /// External reference container (overrides --reference)
    #[arg(long)]
    pub external_ref: Option<PathBuf>,

    /// Frame index within the external reference container
    #[arg(long, default_value_t = 0, requires = "external_ref")]
    pub external_index: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct StacksArgs {
    /// Reference stack container
    pub reference: PathBuf,

    /// Moving stack container
    pub moving: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct FramesArgs {
    /// Input stack container
    pub stack: PathBuf,

    /// Reference frame index
    #[arg(long, default_value_t = 0)]
    pub reference: usize,

    /// Moving frame index
    #[arg(long, default_value_t = 0)]
    pub moving: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn run(cmd: &AlignCommand) -> Result<()> {
    match cmd {
        AlignCommand::Intra(args) => run_intra(args),
        AlignCommand::Stacks(args) => run_stacks(args),
        AlignCommand::Frames(args) => run_frames(args),
    }
}

fn run_intra(args: &IntraArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let reference = match &args.external_ref {
        Some(path) => IntraReference::External {
            path: path.clone(),
            index: args.external_index,
        },
        None => IntraReference::Primary(args.reference),
    };

    let store = SessionStore::new();
    let result = with_spinner("Aligning stack", || {
        align_intra_stack(
            &store,
            &PassthroughEngine,
            &config,
            &args.stack,
            &reference,
            &args.common.output,
        )
    })?;
    report(&store, AlignmentMode::IntraStack, &result, &args.common)
}

fn run_stacks(args: &StacksArgs) -> Result<()> {
    let config = load_config(&args.common)?;

    let store = SessionStore::new();
    let result = with_spinner("Aligning stacks", || {
        align_stack_to_stack(
            &store,
            &PassthroughEngine,
            &config,
            &args.reference,
            &args.moving,
            &args.common.output,
        )
    })?;
    report(&store, AlignmentMode::StackToStack, &result, &args.common)
}

fn run_frames(args: &FramesArgs) -> Result<()> {
    let config = load_config(&args.common)?;

    let store = SessionStore::new();
    let result = with_spinner("Aligning frame", || {
        align_frame_to_frame(
            &store,
            &PassthroughEngine,
            &config,
            &args.stack,
            args.reference,
            args.moving,
            &args.common.output,
        )
    })?;
    report(&store, AlignmentMode::FrameToFrame, &result, &args.common)
}

/// Build the run config: TOML file if given, CLI transform flag on top.
fn load_config(common: &CommonArgs) -> Result<AlignConfig> {
    let mut config = match &common.config {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => AlignConfig::default(),
    };
    if let Some(transform) = common.transform {
        config.transform = transform.into();
    }
    Ok(config)
}

fn with_spinner<T>(
    message: &'static str,
    f: impl FnOnce() -> stackalign_core::error::Result<T>,
) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    Ok(result?)
}

fn report(
    store: &SessionStore,
    mode: AlignmentMode,
    result: &AlignmentResult,
    common: &CommonArgs,
) -> Result<()> {
    let (sources, results) = store.frame_counts(mode);

    println!("Engine:          passthrough (no registration backend linked)");
    println!("Aligned frames:  {}", result.aligned.len());
    println!("Artifact:        {}", result.artifact.display());
    println!("Session frames:  {sources} source / {results} result");

    if let Some(dir) = &common.preview_dir {
        let written = write_previews(store, mode, dir)?;
        println!("Previews:        {written} files in {}", dir.display());
    }
    Ok(())
}
