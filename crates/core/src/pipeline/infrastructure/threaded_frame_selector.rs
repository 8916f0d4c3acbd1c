use crate::shared::frame::Frame;
use crate::sharpness::domain::blur_detector::{BlurDetector, BlurVerdict};

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// Classifies a batch of decoded frames across a caller-owned pool of
/// worker threads.
///
/// The pool is an explicit handle with the lifetime of a single `select`
/// call, never hidden global state. Frames are pulled lazily from the
/// input iterator with bounded channels providing backpressure, so a large
/// batch is never fully resident beyond the channel capacity plus
/// in-flight work. Results are returned in input order.
pub struct ThreadedFrameSelector {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedFrameSelector {
    pub fn new(workers: usize) -> Result<Self, &'static str> {
        if workers < 1 {
            return Err("workers must be >= 1");
        }
        Ok(Self {
            workers,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        })
    }

    /// Runs `detector.classify` on every frame; verdicts come back paired
    /// with their frames, in the order the frames were supplied.
    pub fn select<I>(
        &self,
        frames: I,
        detector: &dyn BlurDetector,
        min_edge_energy: i32,
    ) -> Vec<(Frame, BlurVerdict)>
    where
        I: Iterator<Item = Frame> + Send,
    {
        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, Frame)>(self.channel_capacity);
        let (verdict_tx, verdict_rx) =
            crossbeam_channel::bounded::<(usize, Frame, BlurVerdict)>(self.channel_capacity);

        let mut results: Vec<(usize, Frame, BlurVerdict)> = Vec::new();

        std::thread::scope(|s| {
            for _ in 0..self.workers {
                let job_rx = job_rx.clone();
                let verdict_tx = verdict_tx.clone();
                s.spawn(move || {
                    for (seq, frame) in job_rx {
                        let verdict = detector.classify(&frame, min_edge_energy);
                        if verdict_tx.send((seq, frame, verdict)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(job_rx);
            drop(verdict_tx);

            // Feed on a dedicated thread so the main thread can drain
            // verdicts; with both channels bounded, feeding and draining
            // from the same thread would deadlock.
            s.spawn(move || {
                for (seq, frame) in frames.enumerate() {
                    if job_tx.send((seq, frame)).is_err() {
                        break;
                    }
                }
            });

            for result in verdict_rx {
                results.push(result);
            }
        });

        results.sort_by_key(|(seq, _, _)| *seq);
        results
            .into_iter()
            .map(|(_, frame, verdict)| (frame, verdict))
            .collect()
    }
}
