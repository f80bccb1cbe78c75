// ============================================================================
// vid2gif-core/src/conversion.rs
// ============================================================================
//
// CONVERSION: Running ffmpeg and Forwarding Progress
//
// `run_conversion` drives one ffmpeg process to completion on the calling
// thread and reports coarse `ConversionEvent`s through a callback.
// `Converter::start` runs the same thing on a background thread and hands the
// events to the front end over a channel, so the front end can keep drawing
// while it refuses new work.
//
// EVENT ORDER:
// Started once ffmpeg is running, then Progress events with increasing
// percentages, then exactly one of Finished or Failed. A job that cannot be
// started only produces Failed.

use crate::command::build_conversion_args;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegBinary, FfmpegProcess, FfmpegSpawner, SidecarSpawner};
use crate::progress::FfmpegEventHandler;
use crate::settings::GifSettings;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// ffmpeg's message when no frame reached the output.
///
/// The desktop tool this replaces reported such a run as a success. Here it
/// fails with `CoreError::EmptyOutput` on purpose, whatever ffmpeg's exit
/// status, since the resulting GIF has no frames.
pub const EMPTY_OUTPUT_MARKER: &str = "Output file is empty";

/// Everything needed to run one conversion.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub settings: GifSettings,
    /// Probed frame count of the input, used as the progress denominator.
    pub total_frames: u64,
}

/// Statistics about a finished conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub frames_processed: u64,
    pub elapsed: Duration,
    pub output_size: u64,
}

/// Messages sent from the conversion to the front end.
#[derive(Debug, Clone)]
pub enum ConversionEvent {
    Started { total_frames: u64 },
    Progress { frame: u64, percent: u8 },
    Finished(ConversionSummary),
    Failed(String),
}

/// Runs `job` to completion on the current thread.
///
/// `on_event` receives every `ConversionEvent`, including the final
/// `Finished` or `Failed`.
///
/// # Errors
///
/// * `CoreError::InvalidSettings` - the settings are out of range
/// * `CoreError::CommandStart` - ffmpeg could not be started
/// * `CoreError::EmptyOutput` - ffmpeg ran but encoded no frames
/// * `CoreError::ConversionFailed` - ffmpeg exited unsuccessfully
pub fn run_conversion<S, F>(
    spawner: &S,
    ffmpeg: &FfmpegBinary,
    job: &ConversionJob,
    mut on_event: F,
) -> CoreResult<ConversionSummary>
where
    S: FfmpegSpawner,
    F: FnMut(ConversionEvent),
{
    let result = execute(spawner, ffmpeg, job, &mut on_event);
    match &result {
        Ok(summary) => on_event(ConversionEvent::Finished(summary.clone())),
        Err(e) => on_event(ConversionEvent::Failed(e.to_string())),
    }
    result
}

fn execute<S, F>(
    spawner: &S,
    ffmpeg: &FfmpegBinary,
    job: &ConversionJob,
    on_event: &mut F,
) -> CoreResult<ConversionSummary>
where
    S: FfmpegSpawner,
    F: FnMut(ConversionEvent),
{
    job.settings.validate()?;

    if let Some(parent) = job.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    log::info!(
        "Converting {} -> {} ({} fps, width {})",
        job.input.display(),
        job.output.display(),
        job.settings.fps,
        job.settings.width
    );

    let args = build_conversion_args(&job.input, &job.output, &job.settings);
    let start_time = Instant::now();
    let mut process = spawner.spawn(ffmpeg, &args)?;
    on_event(ConversionEvent::Started {
        total_frames: job.total_frames,
    });

    let mut handler = FfmpegEventHandler::new(job.total_frames);
    process.handle_events(|event| {
        if let Some((frame, percent)) = handler.handle_event(event) {
            log::trace!("Converted frame {frame}/{} ({percent}%)", job.total_frames);
            on_event(ConversionEvent::Progress { frame, percent });
        }
        Ok(())
    })?;

    let status = process.wait()?;
    // ffmpeg may report an empty output with either exit status.
    if handler.stderr_contains(EMPTY_OUTPUT_MARKER) {
        log::warn!("ffmpeg encoded no frames for {}", job.input.display());
        return Err(CoreError::EmptyOutput);
    }
    if !status.success() {
        log::error!("ffmpeg exited with {status} for {}", job.input.display());
        return Err(CoreError::ConversionFailed {
            stderr: handler.stderr_tail(),
        });
    }

    let percent = handler.tracker_mut().finish();
    on_event(ConversionEvent::Progress {
        frame: handler.tracker().frames_processed(),
        percent,
    });

    let output_size = std::fs::metadata(&job.output).map(|m| m.len()).unwrap_or(0);
    let summary = ConversionSummary {
        input: job.input.clone(),
        output: job.output.clone(),
        frames_processed: handler.tracker().frames_processed(),
        elapsed: start_time.elapsed(),
        output_size,
    };
    log::info!(
        "Finished {} in {:.1}s",
        summary.output.display(),
        summary.elapsed.as_secs_f64()
    );
    Ok(summary)
}

// ============================================================================
// BACKGROUND WORKER
// ============================================================================

/// Starts conversions on a background thread.
#[derive(Debug, Clone)]
pub struct Converter<S = SidecarSpawner> {
    spawner: S,
    ffmpeg: FfmpegBinary,
}

impl Converter<SidecarSpawner> {
    #[must_use]
    pub fn new(ffmpeg: FfmpegBinary) -> Self {
        Self::with_spawner(SidecarSpawner, ffmpeg)
    }
}

impl<S> Converter<S>
where
    S: FfmpegSpawner + Clone + Send + 'static,
{
    #[must_use]
    pub fn with_spawner(spawner: S, ffmpeg: FfmpegBinary) -> Self {
        Self { spawner, ffmpeg }
    }

    /// Spawns a worker thread for `job` and returns immediately.
    pub fn start(&self, job: ConversionJob) -> CoreResult<ConversionHandle> {
        let (tx, rx) = mpsc::channel();
        let spawner = self.spawner.clone();
        let ffmpeg = self.ffmpeg.clone();

        let worker = thread::Builder::new()
            .name("vid2gif-conversion".to_string())
            .spawn(move || {
                // A dropped receiver only means nobody is listening any more.
                run_conversion(&spawner, &ffmpeg, &job, |event| {
                    let _ = tx.send(event);
                })
            })?;

        Ok(ConversionHandle { events: rx, worker })
    }
}

/// A running background conversion.
#[derive(Debug)]
pub struct ConversionHandle {
    events: Receiver<ConversionEvent>,
    worker: JoinHandle<CoreResult<ConversionSummary>>,
}

impl ConversionHandle {
    /// The event stream; it ends once the worker has exited.
    #[must_use]
    pub fn events(&self) -> &Receiver<ConversionEvent> {
        &self.events
    }

    /// Waits for the worker and returns its result.
    pub fn join(self) -> CoreResult<ConversionSummary> {
        self.worker.join().map_err(|_| CoreError::WorkerPanicked)?
    }
}
