pub mod grayscale;
pub mod laplacian;
pub mod laplacian_blur_detector;
pub mod nearest_resampler;
