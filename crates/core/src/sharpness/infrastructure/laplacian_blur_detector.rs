use std::collections::TryReserveError;

use crate::shared::constants::{
    BASE_EDGE_THRESHOLD, CANONICAL_LANDSCAPE, CANONICAL_PORTRAIT, EDGE_ENERGY_BIAS,
};
use crate::shared::frame::Frame;
use crate::sharpness::domain::blur_detector::{BlurDetector, BlurVerdict};
use crate::sharpness::domain::resampler::{ImageResampler, ResampleError};

/// Packed ARGB value of opaque black, the smallest signal a fully opaque
/// edge map can produce.
const OPAQUE_BLACK: i32 = -16_777_216;

#[derive(Debug)]
enum SharpnessFault {
    Resample(ResampleError),
    Alloc(TryReserveError),
}

impl From<ResampleError> for SharpnessFault {
    fn from(e: ResampleError) -> Self {
        SharpnessFault::Resample(e)
    }
}

impl From<TryReserveError> for SharpnessFault {
    fn from(e: TryReserveError) -> Self {
        SharpnessFault::Alloc(e)
    }
}

/// Classifies frames by the peak response of a Laplacian edge filter.
///
/// The frame is first resampled to a canonical size (720x1280 for portrait,
/// 1280x720 otherwise) so the thresholds are resolution-independent, then
/// converted to grayscale and run through a 3x3 Laplacian clamped to u8. The
/// edge map is expanded back to RGBA and the maximum packed ARGB integer
/// across all pixels is the scalar edge-energy signal.
///
/// Taking the max of packed-color integers instead of the variance of raw
/// Laplacian magnitudes is unusual, but the threshold constants are
/// calibrated against exactly this reduction. Do not swap in a variance
/// score without re-deriving the thresholds on real calibration images.
pub struct LaplacianBlurDetector {
    resampler: Box<dyn ImageResampler>,
}

impl LaplacianBlurDetector {
    pub fn new(resampler: Box<dyn ImageResampler>) -> Self {
        Self { resampler }
    }

    fn edge_energy(&self, frame: &Frame) -> Result<i32, SharpnessFault> {
        let (width, height) = if frame.height() > frame.width() {
            CANONICAL_PORTRAIT
        } else {
            CANONICAL_LANDSCAPE
        };

        let resized = self.resampler.resize(frame, width, height)?;
        let gray = super::grayscale::to_luminance(&resized)?;
        drop(resized);
        let edges = super::laplacian::laplacian_u8(&gray)?;
        drop(gray);

        let rgba = expand_to_rgba(&edges)?;
        drop(edges);

        let mut max_packed = OPAQUE_BLACK;
        for packed in rgba.packed_argb() {
            if packed > max_packed {
                max_packed = packed;
            }
        }
        Ok(max_packed)
    }
}

impl BlurDetector for LaplacianBlurDetector {
    fn classify(&self, frame: &Frame, min_edge_energy: i32) -> BlurVerdict {
        let signal = match self.edge_energy(frame) {
            Ok(signal) => signal,
            Err(fault) => {
                // Fail open: keep the frame rather than drop user content
                // on a degenerate input or an allocation failure.
                log::debug!("sharpness check inconclusive ({fault:?}), keeping frame");
                return BlurVerdict::Sharp;
            }
        };

        let shifted_signal = signal + EDGE_ENERGY_BIAS;
        let shifted_threshold = BASE_EDGE_THRESHOLD + EDGE_ENERGY_BIAS;

        log::debug!(
            "frame {}: {}x{} edge energy raw={signal} shifted={shifted_signal} \
             base={shifted_threshold} floor={min_edge_energy}",
            frame.index(),
            frame.width(),
            frame.height(),
        );

        if shifted_signal <= shifted_threshold || shifted_signal < min_edge_energy {
            BlurVerdict::Blurred
        } else {
            BlurVerdict::Sharp
        }
    }
}

/// Expands a grayscale edge map to an opaque RGBA frame (r = g = b = v,
/// a = 255), the representation whose packed pixel values the reduction
/// scans.
fn expand_to_rgba(gray: &Frame) -> Result<Frame, TryReserveError> {
    let mut data = Vec::new();
    data.try_reserve_exact(gray.data().len() * 4)?;
    for &v in gray.data() {
        data.extend_from_slice(&[v, v, v, 255]);
    }
    Ok(Frame::new(
        data,
        gray.width(),
        gray.height(),
        4,
        gray.index(),
    ))
}
