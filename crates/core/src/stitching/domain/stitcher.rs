use crate::shared::frame::Frame;

/// Composition mode passed through to the stitching engine.
///
/// `Panorama` assumes the camera rotated around a fixed point; `Scans`
/// assumes flat translated captures (document scanning).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StitchMode {
    Panorama,
    Scans,
}

/// Composes a set of sharp frames into a single output image.
///
/// The engine itself is an external collaborator (typically an OpenCV-class
/// stitcher); this crate only prepares its input. Implementations receive
/// frames that have already passed the sharpness filter, in caller order,
/// and return either the composed frame or a diagnostic error. A stitch
/// failure is the one error in the pipeline that is surfaced to the user.
pub trait ImageStitcher: Send {
    fn stitch(
        &mut self,
        frames: &[Frame],
        mode: StitchMode,
    ) -> Result<Frame, Box<dyn std::error::Error>>;
}
