use std::path::{Path, PathBuf};

use crate::pipeline::select_sharp_frames_use_case::SelectSharpFramesUseCase;
use crate::shared::frame::Frame;
use crate::stitching::domain::stitcher::{ImageStitcher, StitchMode};
use crate::video::domain::image_writer::ImageWriter;

/// Counts reported back to the caller after a stitch run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StitchSummary {
    pub kept: usize,
    pub blurred: usize,
    pub unreadable: usize,
}

/// Full pipeline: decode → reject blurred frames → stitch → write.
///
/// Selection is silent about individual rejections (they are only logged);
/// a stitch failure is the one error surfaced to the caller, per-input
/// problems never are.
pub struct StitchImagesUseCase {
    selector: SelectSharpFramesUseCase,
    stitcher: Box<dyn ImageStitcher>,
    writer: Box<dyn ImageWriter>,
}

impl StitchImagesUseCase {
    pub fn new(
        selector: SelectSharpFramesUseCase,
        stitcher: Box<dyn ImageStitcher>,
        writer: Box<dyn ImageWriter>,
    ) -> Self {
        Self {
            selector,
            stitcher,
            writer,
        }
    }

    pub fn execute(
        &mut self,
        inputs: &[PathBuf],
        mode: StitchMode,
        output: &Path,
    ) -> Result<StitchSummary, Box<dyn std::error::Error>> {
        let report = self.selector.execute(inputs);
        let summary = StitchSummary {
            kept: report.kept.len(),
            blurred: report.blurred.len(),
            unreadable: report.unreadable.len(),
        };

        if report.kept.is_empty() {
            return Err("no sharp frames left to stitch".into());
        }

        let frames: Vec<Frame> = report.kept.into_iter().map(|(_, frame)| frame).collect();
        let composed = self.stitcher.stitch(&frames, mode)?;
        self.writer.write(output, &composed)?;

        log::info!(
            "stitched {} frames into {} ({} blurred, {} unreadable)",
            summary.kept,
            output.display(),
            summary.blurred,
            summary.unreadable
        );
        Ok(summary)
    }
}
