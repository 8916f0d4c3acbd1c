use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use panorama_core::pipeline::infrastructure::threaded_frame_selector::ThreadedFrameSelector;
use panorama_core::pipeline::select_sharp_frames_use_case::{
    SelectSharpFramesUseCase, SelectionReport,
};
use panorama_core::shared::constants::{IMAGE_EXTENSIONS, MIN_EDGE_ENERGY};
use panorama_core::shared::frame::Frame;
use panorama_core::sharpness::domain::blur_detector::BlurVerdict;
use panorama_core::sharpness::infrastructure::laplacian_blur_detector::LaplacianBlurDetector;
use panorama_core::sharpness::infrastructure::nearest_resampler::NearestResampler;
use panorama_core::stitching::domain::stitcher::StitchMode;
use panorama_core::video::domain::image_writer::ImageWriter;
use panorama_core::video::domain::video_reader::VideoReader;
use panorama_core::video::infrastructure::ffmpeg_sampler::FfmpegFrameSampler;
use panorama_core::video::infrastructure::image_file_reader::ImageFileReader;
use panorama_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Selects sharp source frames for panorama stitching.
///
/// Takes a set of photos, or a single video to sample frames from, rejects
/// the blurred ones, and writes the survivors to a directory ready for a
/// stitching engine.
#[derive(Parser)]
#[command(name = "panorama")]
struct Cli {
    /// Input image files, or a single video file.
    inputs: Vec<PathBuf>,

    /// Directory for the selected frames (required unless --list is used).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print a verdict per input instead of writing frames.
    #[arg(long)]
    list: bool,

    /// Absolute floor on the shifted edge-energy signal.
    #[arg(long, default_value_t = MIN_EDGE_ENERGY)]
    min_edge_energy: i32,

    /// Frames per second of video time to sample (video input only).
    #[arg(long, default_value = "1.0")]
    fps: f64,

    /// Worker threads for classification (1 = run synchronously).
    #[arg(long, default_value = "1")]
    jobs: usize,

    /// Stitch mode the selection is destined for: panorama or scans.
    #[arg(long, default_value = "panorama")]
    mode: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mode = parse_mode(&cli.mode);
    log::info!("selecting frames for {mode:?} stitching");

    if is_video_batch(&cli.inputs) {
        run_video(&cli)
    } else {
        run_images(&cli)
    }
}

fn build_detector() -> LaplacianBlurDetector {
    LaplacianBlurDetector::new(Box::new(NearestResampler))
}

fn run_images(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.jobs <= 1 {
        let mut use_case = SelectSharpFramesUseCase::new(
            Box::new(ImageFileReader::new()),
            Box::new(build_detector()),
            cli.min_edge_energy,
        );
        let report = use_case.execute(&cli.inputs);
        return emit_image_report(cli, report);
    }

    // Decode up front, classify across the worker pool.
    let mut reader = ImageFileReader::new();
    let mut decoded: Vec<(PathBuf, Frame)> = Vec::new();
    let mut report = SelectionReport::default();
    for path in &cli.inputs {
        match decode_one(&mut reader, path) {
            Ok(frame) => decoded.push((path.clone(), frame)),
            Err(e) => {
                log::warn!("skipping unreadable input {}: {e}", path.display());
                report.unreadable.push(path.clone());
            }
        }
    }

    let selector = ThreadedFrameSelector::new(cli.jobs)?;
    let detector = build_detector();
    let paths: Vec<PathBuf> = decoded.iter().map(|(p, _)| p.clone()).collect();
    let verdicts = selector.select(
        decoded.into_iter().map(|(_, f)| f),
        &detector,
        cli.min_edge_energy,
    );

    for (path, (frame, verdict)) in paths.into_iter().zip(verdicts) {
        match verdict {
            BlurVerdict::Sharp => report.kept.push((path, frame)),
            BlurVerdict::Blurred => report.blurred.push(path),
        }
    }
    emit_image_report(cli, report)
}

fn run_video(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = &cli.inputs[0];
    let mut sampler = FfmpegFrameSampler::new().with_sample_fps(cli.fps);
    let metadata = sampler.open(input)?;
    log::info!(
        "sampling {} ({}x{} @ {:.1} fps) at {:.1} fps",
        input.display(),
        metadata.width,
        metadata.height,
        metadata.fps,
        cli.fps
    );

    let mut frames: Vec<Frame> = Vec::new();
    for result in sampler.frames() {
        match result {
            Ok(frame) => frames.push(frame),
            Err(e) => log::warn!("skipping undecodable frame: {e}"),
        }
    }
    sampler.close();

    let selector = ThreadedFrameSelector::new(cli.jobs)?;
    let detector = build_detector();
    let verdicts = selector.select(frames.into_iter(), &detector, cli.min_edge_energy);

    if !cli.list {
        if let Some(out_dir) = &cli.out_dir {
            std::fs::create_dir_all(out_dir)?;
        }
    }

    let writer = ImageFileWriter::new();
    let mut kept = 0usize;
    let mut blurred = 0usize;
    for (frame, verdict) in verdicts {
        match verdict {
            BlurVerdict::Sharp => {
                if cli.list {
                    println!("sharp\tframe {}", frame.index());
                } else {
                    let out_dir = cli.out_dir.as_ref().ok_or("--out-dir is required")?;
                    let out = out_dir.join(format!("frame_{:04}.png", frame.index()));
                    writer.write(&out, &frame)?;
                }
                kept += 1;
            }
            BlurVerdict::Blurred => {
                if cli.list {
                    println!("blurred\tframe {}", frame.index());
                }
                blurred += 1;
            }
        }
    }

    log::info!("video selection: {kept} kept, {blurred} blurred");
    Ok(())
}

fn emit_image_report(cli: &Cli, report: SelectionReport) -> Result<(), Box<dyn std::error::Error>> {
    if cli.list {
        for (path, _) in &report.kept {
            println!("sharp\t{}", path.display());
        }
        for path in &report.blurred {
            println!("blurred\t{}", path.display());
        }
        for path in &report.unreadable {
            println!("unreadable\t{}", path.display());
        }
        return Ok(());
    }

    let out_dir = cli.out_dir.as_ref().ok_or("--out-dir is required")?;
    std::fs::create_dir_all(out_dir)?;
    let writer = ImageFileWriter::new();
    for (i, (path, frame)) in report.kept.iter().enumerate() {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("frame");
        let out = out_dir.join(format!("{i:04}_{stem}.png"));
        writer.write(&out, frame)?;
    }
    log::info!(
        "wrote {} sharp frames to {}",
        report.kept.len(),
        out_dir.display()
    );
    Ok(())
}

fn decode_one(
    reader: &mut ImageFileReader,
    path: &Path,
) -> Result<Frame, Box<dyn std::error::Error>> {
    reader.open(path)?;
    let frame = reader.frames().next().ok_or("no frames in input")??;
    reader.close();
    Ok(frame)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.inputs.is_empty() {
        return Err("at least one input file is required".into());
    }
    for path in &cli.inputs {
        if !path.exists() {
            return Err(format!("input file not found: {}", path.display()).into());
        }
    }
    if !cli.list && cli.out_dir.is_none() {
        return Err("--out-dir is required unless --list is used".into());
    }
    if cli.jobs == 0 {
        return Err("--jobs must be at least 1".into());
    }
    if cli.fps <= 0.0 {
        return Err(format!("--fps must be positive, got {}", cli.fps).into());
    }
    if cli.mode != "panorama" && cli.mode != "scans" {
        return Err(format!("mode must be 'panorama' or 'scans', got '{}'", cli.mode).into());
    }

    let videos = cli.inputs.iter().filter(|p| !is_image(p)).count();
    if videos > 1 {
        return Err("only one video input is supported".into());
    }
    if videos == 1 && cli.inputs.len() > 1 {
        return Err("cannot mix video and image inputs".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_video_batch(inputs: &[PathBuf]) -> bool {
    inputs.len() == 1 && !is_image(&inputs[0])
}

fn parse_mode(mode: &str) -> StitchMode {
    if mode == "scans" {
        StitchMode::Scans
    } else {
        StitchMode::Panorama
    }
}
