/// Lower percentile of the per-frame sample distribution used as the clip
/// floor before display rescaling.
pub const DEFAULT_CLIP_LOW_PERCENTILE: f32 = 1.0;

/// Upper percentile of the per-frame sample distribution used as the clip
/// ceiling before display rescaling.
pub const DEFAULT_CLIP_HIGH_PERCENTILE: f32 = 99.0;

/// Damping term added to the clipped range before rescaling, so a frame
/// with a vanishing-but-nonzero spread maps to (near) zero instead of
/// amplified noise.
pub const DEFAULT_NORMALIZE_EPSILON: f32 = 1e-8;

/// Maximum sample value of the 8-bit display range.
pub const DISPLAY_MAX: f32 = 255.0;

/// Default nearest-neighbor magnification factor for published preview
/// frames.
pub const DEFAULT_UPSCALE_FACTOR: usize = 3;

/// Minimum moving-frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;
