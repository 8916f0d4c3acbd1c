use std::collections::TryReserveError;

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ResampleError {
    #[error("source frame has zero width or height")]
    EmptySource,
    #[error("target size {0}x{1} is empty")]
    EmptyTarget(u32, u32),
    #[error("failed to allocate resample buffer: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Resizes a frame to an exact target size.
///
/// Sharpness analysis injects this seam so tests can observe the canonical
/// target size and force failures; production code uses nearest-neighbor
/// resampling, since a smoothing filter would itself depress the measured
/// edge energy.
pub trait ImageResampler: Send + Sync {
    fn resize(&self, frame: &Frame, width: u32, height: u32) -> Result<Frame, ResampleError>;
}
