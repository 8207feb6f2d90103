use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::Frame;

/// Geometric transform family the registration engine is asked to fit.
///
/// The set is closed. Unknown names are rejected at every boundary (CLI
/// parsing, config deserialization); `RigidBody` is the default only
/// where a kind is genuinely absent, never a fallback for a typo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformKind {
    Translation,
    #[default]
    RigidBody,
    ScaledRotation,
    Affine,
    Bilinear,
}

impl TransformKind {
    pub const ALL: [TransformKind; 5] = [
        TransformKind::Translation,
        TransformKind::RigidBody,
        TransformKind::ScaledRotation,
        TransformKind::Affine,
        TransformKind::Bilinear,
    ];
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation => write!(f, "translation"),
            Self::RigidBody => write!(f, "rigid body"),
            Self::ScaledRotation => write!(f, "scaled rotation"),
            Self::Affine => write!(f, "affine"),
            Self::Bilinear => write!(f, "bilinear"),
        }
    }
}

/// Capability interface to the external registration engine.
///
/// `estimate_and_apply` fits a transform of the requested kind mapping
/// `moving` onto `reference` and returns the transformed moving frame.
/// Implementations must be deterministic for fixed inputs and `Send +
/// Sync` so one engine can serve the frame-parallel registration fan-out.
/// Failures (non-convergence, numerical breakdown) surface as
/// [`crate::error::StackAlignError::Registration`] and are never retried.
pub trait RegistrationEngine: Send + Sync {
    fn estimate_and_apply(
        &self,
        reference: &Frame,
        moving: &Frame,
        kind: TransformKind,
    ) -> Result<Frame>;
}

/// Engine that applies no transform at all.
///
/// Every moving frame comes back unchanged. This is the unit engine for
/// exercising the pipeline when no registration backend is wired in; real
/// engines are supplied by downstream crates through the trait.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughEngine;

impl RegistrationEngine for PassthroughEngine {
    fn estimate_and_apply(
        &self,
        _reference: &Frame,
        moving: &Frame,
        _kind: TransformKind,
    ) -> Result<Frame> {
        Ok(moving.clone())
    }
}
