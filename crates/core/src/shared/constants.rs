/// Canonical analysis size for portrait frames (height > width).
pub const CANONICAL_PORTRAIT: (u32, u32) = (720, 1280);

/// Canonical analysis size for landscape and square frames.
pub const CANONICAL_LANDSCAPE: (u32, u32) = (1280, 720);

/// Default absolute floor on the (shifted) edge-energy signal.
pub const MIN_EDGE_ENERGY: i32 = 4_000_000;

/// Bias added to both the signal and the base threshold before comparison.
/// It cancels out of the base-threshold comparison but not out of the
/// [`MIN_EDGE_ENERGY`] floor, which applies to the shifted signal.
pub const EDGE_ENERGY_BIAS: i32 = 6_118_750;

/// Base blur threshold on the raw packed-pixel signal.
pub const BASE_EDGE_THRESHOLD: i32 = -6_118_750;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
