use crate::shared::frame::Frame;

/// Outcome of a sharpness check on a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurVerdict {
    Sharp,
    Blurred,
}

impl BlurVerdict {
    pub fn is_sharp(self) -> bool {
        self == BlurVerdict::Sharp
    }
}

/// Decides whether a decoded frame is too blurred to contribute detail to a
/// stitched panorama.
///
/// The verdict is a pure function of the frame's pixel content and the
/// detector's configuration: no history is kept across calls, the caller's
/// frame is never mutated or retained, and calls on different frames may run
/// concurrently.
///
/// On degenerate input (resample failure, allocation failure of an
/// intermediate buffer) implementations fail open and report [`Sharp`]:
/// an ambiguous frame is kept rather than silently dropping user content.
///
/// [`Sharp`]: BlurVerdict::Sharp
pub trait BlurDetector: Send + Sync {
    /// Classifies `frame`. `min_edge_energy` is an absolute floor on the
    /// shifted edge-energy signal, applied on top of the detector's base
    /// threshold.
    fn classify(&self, frame: &Frame, min_edge_energy: i32) -> BlurVerdict;
}
