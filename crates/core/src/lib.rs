//! Panorama source-frame preparation.
//!
//! Decodes candidate photos (or samples frames from a video), rejects
//! blurred frames with a Laplacian edge-energy filter, and hands the
//! surviving sharp frames to a caller-supplied stitching engine.

pub mod pipeline;
pub mod sharpness;
pub mod shared;
pub mod stitching;
pub mod video;
