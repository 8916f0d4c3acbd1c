use std::path::Path;

use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes frames to image files via the `image` crate.
///
/// Accepts RGBA and single-channel grayscale frames; anything else is an
/// error.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        match frame.channels() {
            4 => {
                let img =
                    image::RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
                        .ok_or("frame buffer does not match its dimensions")?;
                // JPEG has no alpha channel; flatten before saving.
                let lossy = matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("jpg") | Some("jpeg")
                );
                if lossy {
                    image::DynamicImage::ImageRgba8(img).to_rgb8().save(path)?;
                } else {
                    img.save(path)?;
                }
            }
            1 => {
                let img =
                    image::GrayImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
                        .ok_or("frame buffer does not match its dimensions")?;
                img.save(path)?;
            }
            ch => return Err(format!("unsupported channel count: {ch}").into()),
        }
        Ok(())
    }
}
