use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

/// Decodes video frames via ffmpeg-next (libavformat + libavcodec),
/// keeping only a sampled subset.
///
/// Panorama stitching wants a handful of well-spaced frames, not every
/// frame of a capture pan. `sample_fps` selects how many frames per second
/// of video time survive: the sampler keeps every Nth decoded frame, with
/// `N = round(native_fps / sample_fps)` (minimum 1). A `sample_fps` of 0
/// keeps everything. Kept frames are converted to RGBA and re-indexed
/// sequentially.
pub struct FfmpegFrameSampler {
    input_ctx: Option<ffmpeg_next::format::context::Input>,
    video_stream_index: usize,
    metadata: Option<VideoMetadata>,
    sample_fps: f64,
}

// Safety: FfmpegFrameSampler is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegFrameSampler {}

impl FfmpegFrameSampler {
    pub fn new() -> Self {
        Self {
            input_ctx: None,
            video_stream_index: 0,
            metadata: None,
            sample_fps: 0.0,
        }
    }

    /// Keep roughly `fps` frames per second of video time.
    pub fn with_sample_fps(mut self, fps: f64) -> Self {
        self.sample_fps = fps;
        self
    }

    /// Decoded-frame stride implied by the native and sampling rates.
    fn sample_interval(&self) -> usize {
        let native_fps = self.metadata.as_ref().map(|m| m.fps).unwrap_or(0.0);
        sample_interval(native_fps, self.sample_fps)
    }
}

impl Default for FfmpegFrameSampler {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_interval(native_fps: f64, sample_fps: f64) -> usize {
    if sample_fps <= 0.0 || native_fps <= 0.0 {
        return 1;
    }
    ((native_fps / sample_fps).round() as usize).max(1)
}

impl VideoReader for FfmpegFrameSampler {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("No video stream found")?;

        let video_stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        };

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            fps,
            total_frames: stream.frames() as usize,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };

        self.video_stream_index = video_stream_index;
        self.metadata = Some(metadata.clone());
        self.input_ctx = Some(ictx);

        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let interval = self.sample_interval();
        let Some(ictx) = self.input_ctx.as_mut() else {
            return Box::new(std::iter::once(Err("FfmpegFrameSampler: not opened".into())));
        };

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .unwrap();
        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(stream.parameters()).unwrap();
        let decoder = codec_ctx.decoder().video().unwrap();

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .unwrap();

        Box::new(SampledFrameIter {
            ictx,
            decoder,
            scaler,
            width,
            height,
            video_stream_index: self.video_stream_index,
            interval,
            decoded_count: 0,
            emitted_count: 0,
            flushing: false,
            done: false,
        })
    }

    fn close(&mut self) {
        self.input_ctx = None;
        self.metadata = None;
    }
}

/// Lazy iterator that decodes frames one at a time and drops the ones the
/// sampling stride skips, so the whole video is never buffered in memory.
struct SampledFrameIter<'a> {
    ictx: &'a mut ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    width: u32,
    height: u32,
    video_stream_index: usize,
    interval: usize,
    decoded_count: usize,
    emitted_count: usize,
    flushing: bool,
    done: bool,
}

impl SampledFrameIter<'_> {
    /// Pulls the next decoded frame from the codec, if one is ready, and
    /// applies the sampling stride to it.
    fn try_receive(&mut self) -> Option<Result<Frame, Box<dyn std::error::Error>>> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let keep = self.decoded_count % self.interval == 0;
            self.decoded_count += 1;
            if !keep {
                continue;
            }

            let mut rgba_frame = ffmpeg_next::util::frame::video::Video::empty();
            if let Err(e) = self.scaler.run(&decoded, &mut rgba_frame) {
                return Some(Err(Box::new(e)));
            }

            let pixels = extract_rgba_pixels(&rgba_frame, self.width, self.height);
            let frame = Frame::new(pixels, self.width, self.height, 4, self.emitted_count);
            self.emitted_count += 1;
            return Some(Ok(frame));
        }
        None
    }
}

impl Iterator for SampledFrameIter<'_> {
    type Item = Result<Frame, Box<dyn std::error::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(result) = self.try_receive() {
            return Some(result);
        }

        if self.flushing {
            self.done = true;
            return None;
        }

        loop {
            let Some((stream, packet)) = self.ictx.packets().next() else {
                let _ = self.decoder.send_eof();
                self.flushing = true;
                if let Some(result) = self.try_receive() {
                    return Some(result);
                }
                self.done = true;
                return None;
            };

            if stream.index() != self.video_stream_index {
                continue;
            }

            if self.decoder.send_packet(&packet).is_err() {
                continue;
            }

            if let Some(result) = self.try_receive() {
                return Some(result);
            }
        }
    }
}

/// Copies pixel data from an ffmpeg frame into a contiguous RGBA buffer.
///
/// ffmpeg rows may carry padding bytes (stride > width*4); this strips the
/// padding to produce a tightly-packed buffer.
fn extract_rgba_pixels(
    rgba_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgba_frame.stride(0);
    let data = rgba_frame.data(0);
    let w = width as usize;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(w * h * 4);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + w * 4]);
    }
    pixels
}
