use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::info;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::display::upscale;
use crate::error::Result;
use crate::frame::{DisplayFrame, Frame, Stack};
use crate::io::stack_io::{export_stack, load_stack};
use crate::normalize::{normalize_frame, normalize_stack};
use crate::registration::RegistrationEngine;
use crate::resolve::{
    resolve_frame_to_frame, resolve_intra, resolve_stack_to_stack, ReferenceSource,
};
use crate::session::{AlignmentMode, SessionState, SessionStore};

use super::config::AlignConfig;

/// Output of one alignment run: the raw aligned frames in moving order,
/// and the path of the exported artifact.
#[derive(Debug)]
pub struct AlignmentResult {
    pub aligned: Vec<Frame>,
    pub artifact: PathBuf,
}

/// Reference selection for an intra-stack run, over not-yet-loaded inputs.
#[derive(Clone, Debug)]
pub enum IntraReference {
    /// Frame of the primary stack itself.
    Primary(usize),
    /// Frame of a separate reference container.
    External { path: PathBuf, index: usize },
}

/// Align every frame of a stack against a reference frame chosen from the
/// stack itself or from an external container.
///
/// On success the intra-stack session is replaced with the run's display
/// frames and artifact path; on any failure the session keeps its
/// previous contents untouched.
pub fn align_intra_stack(
    store: &SessionStore,
    engine: &dyn RegistrationEngine,
    config: &AlignConfig,
    stack_path: &Path,
    reference: &IntraReference,
    output: &Path,
) -> Result<AlignmentResult> {
    config.validate()?;

    let primary = load_stack(stack_path)?;
    info!(frames = primary.len(), path = %stack_path.display(), "Loaded primary stack");

    let (reference_frame, moving) = match reference {
        IntraReference::Primary(index) => {
            resolve_intra(&primary, ReferenceSource::Internal(*index))?
        }
        IntraReference::External { path, index } => {
            let external = load_stack(path)?;
            info!(frames = external.len(), path = %path.display(), "Loaded external reference stack");
            resolve_intra(&primary, ReferenceSource::External(&external, *index))?
        }
    };

    let aligned = register_frames(engine, config, &reference_frame, &moving)?;
    finish_run(
        store,
        AlignmentMode::IntraStack,
        config,
        &primary,
        aligned,
        output,
        true,
    )
}

/// Align every frame of a moving stack to the first frame of a reference
/// stack.
pub fn align_stack_to_stack(
    store: &SessionStore,
    engine: &dyn RegistrationEngine,
    config: &AlignConfig,
    reference_path: &Path,
    moving_path: &Path,
    output: &Path,
) -> Result<AlignmentResult> {
    config.validate()?;

    let reference_stack = load_stack(reference_path)?;
    let moving_stack = load_stack(moving_path)?;
    info!(
        reference_frames = reference_stack.len(),
        moving_frames = moving_stack.len(),
        "Loaded reference and moving stacks"
    );

    let (reference, moving) = resolve_stack_to_stack(&reference_stack, &moving_stack)?;
    let aligned = register_frames(engine, config, &reference, &moving)?;
    finish_run(
        store,
        AlignmentMode::StackToStack,
        config,
        &reference_stack,
        aligned,
        output,
        true,
    )
}

/// Align a single frame of a stack to another frame of the same stack.
pub fn align_frame_to_frame(
    store: &SessionStore,
    engine: &dyn RegistrationEngine,
    config: &AlignConfig,
    stack_path: &Path,
    ref_index: usize,
    mov_index: usize,
    output: &Path,
) -> Result<AlignmentResult> {
    config.validate()?;

    let stack = load_stack(stack_path)?;
    info!(frames = stack.len(), path = %stack_path.display(), "Loaded stack");

    let (reference, moving) = resolve_frame_to_frame(&stack, ref_index, mov_index)?;
    let aligned = register_frames(engine, config, &reference, &moving)?;
    // Frame-to-frame sources browse at native size.
    finish_run(
        store,
        AlignmentMode::FrameToFrame,
        config,
        &stack,
        aligned,
        output,
        false,
    )
}

/// Request one transform per moving frame and collect the aligned frames
/// in moving order.
///
/// Frames share no mutable state, so above the threshold the engine calls
/// fan out across the Rayon pool; collection re-synchronizes results by
/// original frame index either way. The first engine failure aborts the
/// whole run.
fn register_frames(
    engine: &dyn RegistrationEngine,
    config: &AlignConfig,
    reference: &Frame,
    moving: &[Frame],
) -> Result<Vec<Frame>> {
    info!(
        frames = moving.len(),
        transform = %config.transform,
        "Registering moving frames"
    );

    if moving.len() >= PARALLEL_FRAME_THRESHOLD {
        let results: Vec<Result<Frame>> = moving
            .par_iter()
            .map(|frame| engine.estimate_and_apply(reference, frame, config.transform))
            .collect();
        results.into_iter().collect()
    } else {
        moving
            .iter()
            .map(|frame| engine.estimate_and_apply(reference, frame, config.transform))
            .collect()
    }
}

/// Normalize, export and publish: the tail shared by all three modes.
///
/// Runs only after registration succeeded for every moving frame, so a
/// failed run never touches the session. The exported artifact holds the
/// un-upscaled normalized frames; upscaling applies to the published
/// preview frames only.
fn finish_run(
    store: &SessionStore,
    mode: AlignmentMode,
    config: &AlignConfig,
    source: &Stack,
    aligned: Vec<Frame>,
    output: &Path,
    upscale_sources: bool,
) -> Result<AlignmentResult> {
    let display_aligned: Vec<DisplayFrame> = aligned
        .iter()
        .map(|frame| normalize_frame(frame, &config.normalize))
        .collect();

    export_stack(&display_aligned, output)?;
    info!(
        frames = display_aligned.len(),
        artifact = %output.display(),
        "Exported aligned stack"
    );

    let mut sources = normalize_stack(source, &config.normalize);
    if upscale_sources {
        sources = sources
            .iter()
            .map(|frame| upscale(frame, config.upscale_factor))
            .collect();
    }
    let results: Vec<DisplayFrame> = display_aligned
        .iter()
        .map(|frame| upscale(frame, config.upscale_factor))
        .collect();

    store.publish(
        mode,
        SessionState {
            sources,
            results,
            artifact: Some(output.to_path_buf()),
        },
    );
    info!(mode = ?mode, "Published session state");

    Ok(AlignmentResult {
        aligned,
        artifact: output.to_path_buf(),
    })
}
