use crate::shared::frame::Frame;
use crate::sharpness::domain::resampler::{ImageResampler, ResampleError};

/// Nearest-neighbor resampling (no smoothing filter).
///
/// Each target pixel copies the source pixel at the floor-mapped coordinate.
/// Works for any channel count; the whole pixel is copied.
pub struct NearestResampler;

impl ImageResampler for NearestResampler {
    fn resize(&self, frame: &Frame, width: u32, height: u32) -> Result<Frame, ResampleError> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(ResampleError::EmptySource);
        }
        if width == 0 || height == 0 {
            return Err(ResampleError::EmptyTarget(width, height));
        }

        let ch = frame.channels() as usize;
        let src_w = frame.width() as usize;
        let src = frame.data();

        let mut data = Vec::new();
        data.try_reserve_exact(width as usize * height as usize * ch)?;

        for y in 0..height as usize {
            let sy = y * frame.height() as usize / height as usize;
            let src_row = sy * src_w * ch;
            for x in 0..width as usize {
                let sx = x * src_w / width as usize;
                let px = src_row + sx * ch;
                data.extend_from_slice(&src[px..px + ch]);
            }
        }

        Ok(Frame::new(data, width, height, frame.channels(), frame.index()))
    }
}
