use crate::error::Result;
use crate::frame::{Frame, Stack};

/// Where the reference frame of an intra-stack run comes from.
///
/// An explicit variant instead of a checkbox plus optional file: either an
/// index into the primary stack itself, or a frame of a separately loaded
/// external stack.
#[derive(Clone, Copy, Debug)]
pub enum ReferenceSource<'a> {
    /// Reference frame taken from the primary stack.
    Internal(usize),
    /// Reference frame taken from an external stack.
    External(&'a Stack, usize),
}

/// Resolve reference and moving frames for an intra-stack run.
///
/// Moving frames are every frame of the primary stack, the reference
/// included; aligning the reference to itself is the trivial case.
pub fn resolve_intra(primary: &Stack, source: ReferenceSource<'_>) -> Result<(Frame, Vec<Frame>)> {
    let reference = match source {
        ReferenceSource::Internal(index) => primary.get(index)?.clone(),
        ReferenceSource::External(stack, index) => stack.get(index)?.clone(),
    };
    Ok((reference, primary.frames().to_vec()))
}

/// Resolve for a stack-to-stack run.
///
/// The reference is always the first frame of the reference stack; later
/// reference frames are displayed for browsing but never registered
/// against. Moving frames are every frame of the moving stack.
pub fn resolve_stack_to_stack(reference: &Stack, moving: &Stack) -> Result<(Frame, Vec<Frame>)> {
    Ok((reference.get(0)?.clone(), moving.frames().to_vec()))
}

/// Resolve for a frame-to-frame run: one reference frame and one moving
/// frame out of the same stack.
pub fn resolve_frame_to_frame(
    stack: &Stack,
    ref_index: usize,
    mov_index: usize,
) -> Result<(Frame, Vec<Frame>)> {
    let reference = stack.get(ref_index)?.clone();
    let moving = vec![stack.get(mov_index)?.clone()];
    Ok((reference, moving))
}
