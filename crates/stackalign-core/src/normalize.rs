use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CLIP_HIGH_PERCENTILE, DEFAULT_CLIP_LOW_PERCENTILE, DEFAULT_NORMALIZE_EPSILON,
    DISPLAY_MAX,
};
use crate::error::{Result, StackAlignError};
use crate::frame::{DisplayFrame, Frame, Stack};

/// Percentile clipping parameters for display normalization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Lower clip percentile in [0, 100].
    #[serde(default = "default_low_percentile")]
    pub low_percentile: f32,
    /// Upper clip percentile in [0, 100].
    #[serde(default = "default_high_percentile")]
    pub high_percentile: f32,
    /// Damping added to the clipped range before rescaling.
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,
}

fn default_low_percentile() -> f32 {
    DEFAULT_CLIP_LOW_PERCENTILE
}
fn default_high_percentile() -> f32 {
    DEFAULT_CLIP_HIGH_PERCENTILE
}
fn default_epsilon() -> f32 {
    DEFAULT_NORMALIZE_EPSILON
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            low_percentile: DEFAULT_CLIP_LOW_PERCENTILE,
            high_percentile: DEFAULT_CLIP_HIGH_PERCENTILE,
            epsilon: DEFAULT_NORMALIZE_EPSILON,
        }
    }
}

impl NormalizeConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.low_percentile)
            || !(0.0..=100.0).contains(&self.high_percentile)
        {
            return Err(StackAlignError::Config(format!(
                "clip percentiles must lie in [0, 100], got {} and {}",
                self.low_percentile, self.high_percentile
            )));
        }
        if self.low_percentile > self.high_percentile {
            return Err(StackAlignError::Config(format!(
                "lower clip percentile {} exceeds upper {}",
                self.low_percentile, self.high_percentile
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(StackAlignError::Config(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Map one raw frame into the 8-bit display range.
///
/// Samples are clipped to the [low, high] percentile band of the frame's
/// own distribution, then rescaled linearly so the clipped minimum lands
/// on 0 and the clipped maximum on 255. A frame whose clipped range is
/// zero comes out all-zero instead of dividing by the vanishing range;
/// a tiny-but-nonzero range is damped toward zero by the epsilon term.
///
/// Clipping per frame keeps brightness stable across frames with uneven
/// illumination and stops a single hot pixel from dominating the stretch.
pub fn normalize_frame(frame: &Frame, config: &NormalizeConfig) -> DisplayFrame {
    let (lo, hi) = percentile_band(&frame.data, config.low_percentile, config.high_percentile);
    let clipped = frame.data.mapv(|v| v.clamp(lo, hi));

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in clipped.iter() {
        min = min.min(v);
        max = max.max(v);
    }
    let range = max - min;

    let data = if range > 0.0 {
        let denom = range + config.epsilon;
        clipped.mapv(|v| ((v - min) / denom * DISPLAY_MAX).round() as u8)
    } else {
        Array2::zeros(clipped.dim())
    };
    DisplayFrame::new(data)
}

/// Normalize every frame of a stack independently.
pub fn normalize_stack(stack: &Stack, config: &NormalizeConfig) -> Vec<DisplayFrame> {
    stack
        .frames()
        .iter()
        .map(|frame| normalize_frame(frame, config))
        .collect()
}

fn percentile_band(data: &Array2<f32>, low: f32, high: f32) -> (f32, f32) {
    let mut sorted: Vec<f32> = data.iter().copied().collect();
    if sorted.is_empty() {
        return (0.0, 0.0);
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    (
        percentile_sorted(&sorted, low),
        percentile_sorted(&sorted, high),
    )
}

/// Percentile over pre-sorted samples, linear interpolation between the
/// two nearest ranks.
fn percentile_sorted(sorted: &[f32], q: f32) -> f32 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (n - 1) as f32 * q / 100.0;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let t = rank - lo as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * t
}
