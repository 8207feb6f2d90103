use std::path::PathBuf;
use std::sync::Mutex;

use crate::frame::DisplayFrame;

/// The three alignment workflows, each with its own session slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlignmentMode {
    IntraStack,
    StackToStack,
    FrameToFrame,
}

impl AlignmentMode {
    pub const ALL: [AlignmentMode; 3] = [
        AlignmentMode::IntraStack,
        AlignmentMode::StackToStack,
        AlignmentMode::FrameToFrame,
    ];

    fn slot(self) -> usize {
        match self {
            Self::IntraStack => 0,
            Self::StackToStack => 1,
            Self::FrameToFrame => 2,
        }
    }
}

/// Which published sequence a browse read targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseTarget {
    /// Normalized source frames as loaded, before alignment.
    Source,
    /// Normalized frames produced by the last alignment run.
    Result,
}

/// Frames and artifact path published by the most recent successful run
/// of one mode. Replaced wholesale on publish; never holds a partial run.
#[derive(Debug, Default)]
pub struct SessionState {
    pub sources: Vec<DisplayFrame>,
    pub results: Vec<DisplayFrame>,
    pub artifact: Option<PathBuf>,
}

/// Per-mode session slots shared between the orchestrator (sole writer)
/// and browsing reads.
///
/// One mutex per mode serializes publishes; a publish swaps in a complete
/// snapshot, so a reader sees either the previous run or the new one,
/// never a mix. The last completed run wins.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: [Mutex<SessionState>; 3],
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, mode: AlignmentMode) -> &Mutex<SessionState> {
        &self.slots[mode.slot()]
    }

    /// Replace the mode's session with a complete new state.
    pub(crate) fn publish(&self, mode: AlignmentMode, state: SessionState) {
        *self.slot(mode).lock().expect("session mutex poisoned") = state;
    }

    /// Clear the mode's session. Browsing afterwards reports no frame.
    pub fn reset(&self, mode: AlignmentMode) {
        self.publish(mode, SessionState::default());
    }

    /// Read frame `index` of the chosen sequence.
    ///
    /// Out-of-range indices and empty sessions yield `None`; browsing is a
    /// best-effort read of current state, never an error surface.
    pub fn browse(
        &self,
        mode: AlignmentMode,
        target: BrowseTarget,
        index: usize,
    ) -> Option<DisplayFrame> {
        let state = self.slot(mode).lock().expect("session mutex poisoned");
        let sequence = match target {
            BrowseTarget::Source => &state.sources,
            BrowseTarget::Result => &state.results,
        };
        sequence.get(index).cloned()
    }

    /// Path of the last exported artifact for the mode, if any.
    pub fn artifact(&self, mode: AlignmentMode) -> Option<PathBuf> {
        self.slot(mode)
            .lock()
            .expect("session mutex poisoned")
            .artifact
            .clone()
    }

    /// Published (source, result) sequence lengths for the mode.
    pub fn frame_counts(&self, mode: AlignmentMode) -> (usize, usize) {
        let state = self.slot(mode).lock().expect("session mutex poisoned");
        (state.sources.len(), state.results.len())
    }
}
