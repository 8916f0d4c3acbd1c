pub mod blur_detector;
pub mod resampler;
