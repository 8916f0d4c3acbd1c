use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;
use crate::sharpness::domain::blur_detector::{BlurDetector, BlurVerdict};
use crate::video::domain::video_reader::VideoReader;

/// Per-batch outcome of sharp-frame selection.
#[derive(Debug, Default)]
pub struct SelectionReport {
    /// Inputs that decoded and passed the sharpness filter, in input order.
    pub kept: Vec<(PathBuf, Frame)>,
    /// Inputs rejected as blurred.
    pub blurred: Vec<PathBuf>,
    /// Inputs that could not be decoded.
    pub unreadable: Vec<PathBuf>,
}

impl SelectionReport {
    pub fn total(&self) -> usize {
        self.kept.len() + self.blurred.len() + self.unreadable.len()
    }
}

/// Batch filter: decode each input, classify it, keep the sharp ones.
///
/// A single bad input never aborts the batch: decode failures are logged
/// and recorded as unreadable, blurred frames are recorded and dropped,
/// and processing continues with the remaining inputs.
pub struct SelectSharpFramesUseCase {
    reader: Box<dyn VideoReader>,
    detector: Box<dyn BlurDetector>,
    min_edge_energy: i32,
}

impl SelectSharpFramesUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        detector: Box<dyn BlurDetector>,
        min_edge_energy: i32,
    ) -> Self {
        Self {
            reader,
            detector,
            min_edge_energy,
        }
    }

    pub fn execute(&mut self, inputs: &[PathBuf]) -> SelectionReport {
        let mut report = SelectionReport::default();

        for path in inputs {
            match self.decode(path) {
                Ok(frame) => match self.detector.classify(&frame, self.min_edge_energy) {
                    BlurVerdict::Sharp => report.kept.push((path.clone(), frame)),
                    BlurVerdict::Blurred => {
                        log::info!("rejecting blurred frame: {}", path.display());
                        report.blurred.push(path.clone());
                    }
                },
                Err(e) => {
                    log::warn!("skipping unreadable input {}: {e}", path.display());
                    report.unreadable.push(path.clone());
                }
            }
        }

        log::info!(
            "selection: {} kept, {} blurred, {} unreadable",
            report.kept.len(),
            report.blurred.len(),
            report.unreadable.len()
        );
        report
    }

    fn decode(&mut self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        self.reader.open(path)?;
        let frame = self
            .reader
            .frames()
            .next()
            .ok_or("no frames in input")??;
        self.reader.close();
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::video_metadata::VideoMetadata;
    use std::collections::HashMap;

    // --- Stubs ---

    /// Reader serving preset frames keyed by path; unknown paths fail.
    struct StubReader {
        frames: HashMap<PathBuf, Frame>,
        current: Option<Frame>,
    }

    impl StubReader {
        fn new(frames: HashMap<PathBuf, Frame>) -> Self {
            Self {
                frames,
                current: None,
            }
        }
    }

    impl VideoReader for StubReader {
        fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            let frame = self
                .frames
                .get(path)
                .cloned()
                .ok_or_else(|| format!("decode failed: {}", path.display()))?;
            let meta = VideoMetadata {
                width: frame.width(),
                height: frame.height(),
                fps: 0.0,
                total_frames: 1,
                codec: String::new(),
                source_path: Some(path.to_path_buf()),
            };
            self.current = Some(frame);
            Ok(meta)
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.current.take().into_iter().map(Ok))
        }

        fn close(&mut self) {
            self.current = None;
        }
    }

    /// Classifies a frame as blurred when its first byte is zero.
    struct FirstByteDetector;

    impl BlurDetector for FirstByteDetector {
        fn classify(&self, frame: &Frame, _min_edge_energy: i32) -> BlurVerdict {
            if frame.data()[0] == 0 {
                BlurVerdict::Blurred
            } else {
                BlurVerdict::Sharp
            }
        }
    }

    // --- Helpers ---

    fn frame_with_marker(marker: u8) -> Frame {
        let mut data = vec![128u8; 4 * 4 * 4];
        data[0] = marker;
        Frame::new(data, 4, 4, 4, 0)
    }

    fn use_case(frames: HashMap<PathBuf, Frame>) -> SelectSharpFramesUseCase {
        SelectSharpFramesUseCase::new(
            Box::new(StubReader::new(frames)),
            Box::new(FirstByteDetector),
            0,
        )
    }

    // --- Tests ---

    #[test]
    fn test_keeps_sharp_frames_in_input_order() {
        let inputs = vec![
            PathBuf::from("a.png"),
            PathBuf::from("b.png"),
            PathBuf::from("c.png"),
        ];
        let frames: HashMap<_, _> = inputs
            .iter()
            .map(|p| (p.clone(), frame_with_marker(1)))
            .collect();

        let report = use_case(frames).execute(&inputs);

        assert_eq!(report.kept.len(), 3);
        let order: Vec<_> = report.kept.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(order, inputs);
        assert!(report.blurred.is_empty());
        assert!(report.unreadable.is_empty());
    }

    #[test]
    fn test_blurred_frames_are_dropped() {
        let inputs = vec![PathBuf::from("sharp.png"), PathBuf::from("blurry.png")];
        let mut frames = HashMap::new();
        frames.insert(inputs[0].clone(), frame_with_marker(1));
        frames.insert(inputs[1].clone(), frame_with_marker(0));

        let report = use_case(frames).execute(&inputs);

        assert_eq!(report.kept.len(), 1);
        assert_eq!(report.kept[0].0, inputs[0]);
        assert_eq!(report.blurred, vec![inputs[1].clone()]);
    }

    #[test]
    fn test_unreadable_input_does_not_abort_batch() {
        let inputs = vec![
            PathBuf::from("missing.png"),
            PathBuf::from("ok.png"),
        ];
        let mut frames = HashMap::new();
        frames.insert(inputs[1].clone(), frame_with_marker(1));

        let report = use_case(frames).execute(&inputs);

        assert_eq!(report.unreadable, vec![inputs[0].clone()]);
        assert_eq!(report.kept.len(), 1);
        assert_eq!(report.kept[0].0, inputs[1]);
    }

    #[test]
    fn test_empty_batch() {
        let report = use_case(HashMap::new()).execute(&[]);
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_report_total_accounts_for_every_input() {
        let inputs = vec![
            PathBuf::from("sharp.png"),
            PathBuf::from("blurry.png"),
            PathBuf::from("missing.png"),
        ];
        let mut frames = HashMap::new();
        frames.insert(inputs[0].clone(), frame_with_marker(1));
        frames.insert(inputs[1].clone(), frame_with_marker(0));

        let report = use_case(frames).execute(&inputs);

        assert_eq!(report.total(), 3);
    }
}
