//! Progress tracking for a running conversion.
//!
//! ffmpeg reports the number of frames written so far; the tracker turns
//! that into a percentage of the probed frame count. The percentage stays
//! below 100 until the process has exited successfully.

use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel as FfmpegLogLevel};
use std::collections::VecDeque;

/// Highest percentage reported while ffmpeg is still running.
pub const MAX_RUNNING_PERCENT: u8 = 99;

/// Number of stderr lines retained for error reports.
const STDERR_TAIL_LINES: usize = 40;

/// Maps frame counts to a monotonically increasing percentage.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total_frames: u64,
    last_frame: u64,
    last_percent: u8,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(total_frames: u64) -> Self {
        Self {
            total_frames,
            last_frame: 0,
            last_percent: 0,
        }
    }

    /// Records that `frame` frames have been written. Returns the new
    /// percentage if it increased.
    pub fn update(&mut self, frame: u64) -> Option<u8> {
        self.last_frame = self.last_frame.max(frame);
        let percent = self.percent_for(self.last_frame);
        if percent > self.last_percent {
            self.last_percent = percent;
            Some(percent)
        } else {
            None
        }
    }

    /// Marks the conversion as complete.
    pub fn finish(&mut self) -> u8 {
        self.last_percent = 100;
        100
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.last_percent
    }

    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.last_frame
    }

    fn percent_for(&self, frame: u64) -> u8 {
        if self.total_frames == 0 {
            return 0;
        }
        let percent = frame.saturating_mul(100) / self.total_frames;
        percent.min(u64::from(MAX_RUNNING_PERCENT)) as u8
    }
}

/// Consumes ffmpeg events: feeds progress to a `ProgressTracker`, re-logs
/// ffmpeg's own messages and keeps the tail of stderr for error reports.
#[derive(Debug)]
pub struct FfmpegEventHandler {
    tracker: ProgressTracker,
    stderr_tail: VecDeque<String>,
}

impl FfmpegEventHandler {
    #[must_use]
    pub fn new(total_frames: u64) -> Self {
        Self {
            tracker: ProgressTracker::new(total_frames),
            stderr_tail: VecDeque::with_capacity(STDERR_TAIL_LINES),
        }
    }

    /// Handles one event; returns `(frame, percent)` when the percentage moved.
    pub fn handle_event(&mut self, event: FfmpegEvent) -> Option<(u64, u8)> {
        match event {
            FfmpegEvent::Progress(progress) => {
                let frame = u64::from(progress.frame);
                self.tracker.update(frame).map(|percent| (frame, percent))
            }
            FfmpegEvent::Log(level, message) => {
                self.handle_log(&level, &message);
                None
            }
            FfmpegEvent::Error(message) => {
                log::debug!(target: "ffmpeg_log", "error: {message}");
                self.push_stderr(message);
                None
            }
            _ => None,
        }
    }

    fn handle_log(&mut self, level: &FfmpegLogLevel, message: &str) {
        let log_level = map_ffmpeg_log_level(level);
        // ffmpeg's info chatter is only interesting when debugging.
        if log_level == log::Level::Info {
            log::debug!(target: "ffmpeg_log", "{message}");
        } else {
            log::log!(target: "ffmpeg_log", log_level, "{message}");
        }
        self.push_stderr(message.to_string());
    }

    fn push_stderr(&mut self, line: String) {
        if self.stderr_tail.len() == STDERR_TAIL_LINES {
            self.stderr_tail.pop_front();
        }
        self.stderr_tail.push_back(line);
    }

    /// The retained stderr lines joined with newlines.
    #[must_use]
    pub fn stderr_tail(&self) -> String {
        self.stderr_tail
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn stderr_contains(&self, needle: &str) -> bool {
        self.stderr_tail.iter().any(|line| line.contains(needle))
    }

    pub fn tracker_mut(&mut self) -> &mut ProgressTracker {
        &mut self.tracker
    }

    #[must_use]
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }
}

fn map_ffmpeg_log_level(level: &FfmpegLogLevel) -> log::Level {
    match level {
        FfmpegLogLevel::Fatal | FfmpegLogLevel::Error => log::Level::Error,
        FfmpegLogLevel::Warning => log::Level::Warn,
        FfmpegLogLevel::Info => log::Level::Info,
        _ => log::Level::Trace,
    }
}
