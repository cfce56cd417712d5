use std::path::Path;

use tracing::{debug, info};

use super::oscillator::{Parameters, SignalGenerator};
use super::pool::BufferPool;
use super::stream::{ProcessOutcome, StreamCallback};
use crate::config::RenderOptions;
use crate::error::Result;
use crate::ui::progress::RenderProgress;
use crate::utils::consts::{CHANNELS, SAMPLE_RATE, STRIDE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSummary {
    pub frames: u64,
    pub cycles: u64,
    /// Phase left in the oscillator after the last cycle
    pub final_phase: f64,
}

/// Drives the stream callback offline, appending every submitted buffer to a
/// 32-bit mono WAV file at `path`.
///
/// Each cycle requests `quantum` frames, except the last one which requests
/// only what is left.
pub fn render_to_wav(
    path: &Path,
    params: Parameters,
    seconds: f64,
    quantum: usize,
    progress: &RenderProgress,
) -> Result<RenderSummary> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let spec = hound::WavSpec {
        channels: CHANNELS as u16,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;

    let total_frames = (seconds * SAMPLE_RATE as f64).round() as u64;
    let mut callback =
        StreamCallback::sine(SignalGenerator::new(params, SAMPLE_RATE));
    let mut pool = BufferPool::new(1, quantum, STRIDE);

    let mut frames = 0u64;
    let mut cycles = 0u64;
    while frames < total_frames {
        pool.set_requested((total_frames - frames).min(quantum as u64));

        match callback.on_process(&mut pool) {
            ProcessOutcome::Submitted { frames: produced } => {
                frames += produced as u64;
                progress.advance(produced);
            }
            outcome => {
                debug!("render cycle {} skipped: {:?}", cycles, outcome);
            }
        }
        cycles += 1;

        while let Some(buffer) = pool.take_filled() {
            for sample in buffer.samples() {
                writer.write_sample(sample)?;
            }
            pool.recycle(buffer);
        }
    }
    writer.finalize()?;

    let summary = RenderSummary {
        frames,
        cycles,
        final_phase: callback.generator().phase(),
    };
    info!(
        "Rendered {} frames in {} cycles to {}",
        summary.frames,
        summary.cycles,
        path.display()
    );
    Ok(summary)
}

/// Renders with the options from the command line and a visible progress bar.
pub fn run(params: Parameters, options: &RenderOptions) -> Result<RenderSummary> {
    let total_frames = (options.seconds * SAMPLE_RATE as f64).round() as u64;
    let progress =
        RenderProgress::new(total_frames, &options.path.display().to_string())?;
    let summary = render_to_wav(
        &options.path,
        params,
        options.seconds,
        options.quantum,
        &progress,
    )?;
    progress.finish("done");
    Ok(summary)
}
