use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_UPSCALE_FACTOR;
use crate::error::{Result, StackAlignError};
use crate::normalize::NormalizeConfig;
use crate::registration::TransformKind;

/// Options shared by every alignment run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Transform family requested from the registration engine.
    #[serde(default)]
    pub transform: TransformKind,
    /// Display normalization parameters.
    #[serde(default)]
    pub normalize: NormalizeConfig,
    /// Nearest-neighbor magnification applied to published preview frames.
    #[serde(default = "default_upscale_factor")]
    pub upscale_factor: usize,
}

fn default_upscale_factor() -> usize {
    DEFAULT_UPSCALE_FACTOR
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            transform: TransformKind::default(),
            normalize: NormalizeConfig::default(),
            upscale_factor: DEFAULT_UPSCALE_FACTOR,
        }
    }
}

impl AlignConfig {
    /// Reject configurations the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.upscale_factor == 0 {
            return Err(StackAlignError::Config(
                "upscale factor must be at least 1".into(),
            ));
        }
        self.normalize.validate()
    }
}
