// ============================================================================
// vid2gif-core/src/probe.rs
// ============================================================================
//
// PROBE: Video Metadata from ffmpeg Diagnostics
//
// Running `ffmpeg -i <file>` without an output prints the container and
// stream description on stderr and exits with an error. That text is scraped
// with regular expressions to recover resolution, frame rate and duration.
// The frame count is derived from duration and frame rate.
//
// Each field is recovered independently; a missing field is logged and left
// as `None` rather than failing the whole probe.

use crate::error::{CoreError, CoreResult, command_start_error};
use crate::external::FfmpegBinary;
use crate::utils::parse_ffmpeg_time;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::process::{Command, Stdio};

static FIRST_STREAM_RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Stream #0:0.*: Video:.* (\d+)x(\d+)").expect("valid regex"));

static ANY_STREAM_RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Stream #\d+:\d+.*: Video:.* (\d+)x(\d+)").expect("valid regex"));

static FPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*fps").expect("valid regex"));

static AVG_FRAME_RATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"avg_frame_rate=(\d+)/(\d+)").expect("valid regex"));

static DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Duration: (\d{2}:\d{2}:\d{2}\.\d{2})").expect("valid regex"));

/// Metadata recovered from ffmpeg's description of an input file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoInfo {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Frames per second as printed by ffmpeg (e.g. 29.97).
    pub frame_rate: Option<f64>,
    pub duration_secs: Option<f64>,
    /// `floor(duration_secs * frame_rate)`, only when both are known.
    pub total_frames: Option<u64>,
}

impl VideoInfo {
    /// True when nothing could be recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.frame_rate.is_none()
            && self.duration_secs.is_none()
    }

    /// "WIDTHxHEIGHT" when both dimensions are known.
    #[must_use]
    pub fn resolution_label(&self) -> Option<String> {
        Some(format!("{}x{}", self.width?, self.height?))
    }

    /// The frame count, which the conversion needs for progress reporting.
    pub fn require_total_frames(&self) -> CoreResult<u64> {
        self.total_frames.ok_or_else(|| {
            CoreError::MissingVideoInfo(
                "total frame count unknown (duration or frame rate missing)".to_string(),
            )
        })
    }

    /// Number of frames ffmpeg writes when resampling to `output_fps`.
    ///
    /// ffmpeg's `frame=` counter counts output frames, and the `fps` filter
    /// drops or duplicates frames to hit the requested rate, so this is the
    /// progress denominator rather than the source frame count.
    pub fn expected_output_frames(&self, output_fps: u32) -> CoreResult<u64> {
        let source_frames = self.require_total_frames()?;
        match self.duration_secs {
            Some(duration) => Ok((duration * f64::from(output_fps)) as u64),
            None => Ok(source_frames),
        }
    }
}

/// Extracts `VideoInfo` from the stderr text of `ffmpeg -i <file>`.
#[must_use]
pub fn parse_probe_output(output: &str) -> VideoInfo {
    let mut info = VideoInfo::default();

    let resolution = FIRST_STREAM_RESOLUTION
        .captures(output)
        .or_else(|| ANY_STREAM_RESOLUTION.captures(output));
    match resolution {
        Some(caps) => {
            info.width = caps[1].parse().ok();
            info.height = caps[2].parse().ok();
        }
        None => log::warn!("Could not extract resolution"),
    }

    info.frame_rate = parse_frame_rate(output);
    if info.frame_rate.is_none() {
        log::warn!("Could not extract frame rate");
    }

    info.duration_secs = DURATION
        .captures(output)
        .and_then(|caps| parse_ffmpeg_time(&caps[1]));

    match (info.duration_secs, info.frame_rate) {
        (Some(duration), Some(fps)) => info.total_frames = Some((duration * fps) as u64),
        _ => log::warn!("Could not calculate total frames"),
    }

    info
}

fn parse_frame_rate(output: &str) -> Option<f64> {
    if let Some(caps) = FPS.captures(output) {
        return caps[1].parse().ok();
    }

    let caps = AVG_FRAME_RATE.captures(output)?;
    let num: u64 = caps[1].parse().ok()?;
    let den: u64 = caps[2].parse().ok()?;
    if den == 0 {
        return None;
    }
    Some((num as f64 / den as f64 * 100.0).round() / 100.0)
}

/// Probes `input` by running `ffmpeg -hide_banner -i <input>` and scraping stderr.
///
/// # Errors
///
/// * `CoreError::InputNotFound` - `input` does not exist
/// * `CoreError::CommandStart` - ffmpeg could not be started
/// * `CoreError::ProbeFailed` - ffmpeg ran but none of the fields could be parsed
pub fn probe_video(ffmpeg: &FfmpegBinary, input: &Path) -> CoreResult<VideoInfo> {
    if !input.is_file() {
        return Err(CoreError::InputNotFound(input.display().to_string()));
    }

    log::debug!("Probing {} with {}", input.display(), ffmpeg.path().display());

    // Without an output file ffmpeg exits non-zero; only stderr matters here.
    let output = Command::new(ffmpeg.path())
        .arg("-hide_banner")
        .arg("-i")
        .arg(input)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| command_start_error("ffmpeg (probe)", e))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    log::trace!(target: "ffmpeg_log", "{stderr}");

    let info = parse_probe_output(&stderr);
    if info.is_empty() {
        // ffmpeg's last line already names the input.
        let last_line = stderr.lines().last().unwrap_or_default().trim();
        let reason = if last_line.is_empty() {
            format!("{}: no output from ffmpeg", input.display())
        } else {
            last_line.to_string()
        };
        return Err(CoreError::ProbeFailed(reason));
    }

    log::debug!("Probe result for {}: {:?}", input.display(), info);
    Ok(info)
}
