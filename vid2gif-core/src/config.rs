// ============================================================================
// vid2gif-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Conversion Configuration and Builder
//
// A `ConvertConfig` holds what the user chose before any input is known:
// which ffmpeg to run, where outputs go, and optional overrides for frame
// rate, width and scaling. Per-input values that are not overridden come
// from the probed source (see `settings::GifSettings::from_source`).
//
// KEY COMPONENTS:
// - ConvertConfig: resolved configuration
// - ConvertConfigBuilder: fluent construction with validation in `build`

use crate::conversion::ConversionJob;
use crate::discovery::suggest_output_path;
use crate::error::{CoreError, CoreResult};
use crate::external::FfmpegBinary;
use crate::probe::VideoInfo;
use crate::settings::{
    DEFAULT_FPS, DEFAULT_WIDTH, GifSettings, ScaleFlags, default_fps_for, default_width_for,
};
use std::path::{Path, PathBuf};

/// Configuration for one or more conversions.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// ffmpeg executable used for probing and converting
    pub ffmpeg: FfmpegBinary,

    /// Exact output file; only meaningful for a single input
    pub output_file: Option<PathBuf>,

    /// Directory for outputs; defaults to each input's directory
    pub output_dir: Option<PathBuf>,

    /// Output frame rate; defaults to the source frame rate
    pub fps: Option<u32>,

    /// Output width; defaults to the source width
    pub width: Option<u32>,

    pub scale_flags: ScaleFlags,

    /// Replace an existing output file (ffmpeg `-y`)
    pub overwrite: bool,
}

impl ConvertConfig {
    /// Combines the overrides with defaults derived from `info`.
    #[must_use]
    pub fn settings_for(&self, info: &VideoInfo) -> GifSettings {
        GifSettings::new(
            self.fps.unwrap_or_else(|| default_fps_for(info)),
            self.width.unwrap_or_else(|| default_width_for(info)),
        )
        .with_scale_flags(self.scale_flags)
    }

    /// Where the GIF for `input` is written.
    pub fn output_for(&self, input: &Path) -> CoreResult<PathBuf> {
        match &self.output_file {
            Some(path) => Ok(path.clone()),
            None => suggest_output_path(input, self.output_dir.as_deref()),
        }
    }

    /// Builds the conversion job for `input` from its probe result.
    ///
    /// # Errors
    ///
    /// * `CoreError::MissingVideoInfo` - the output frame count could not be determined
    /// * `CoreError::InvalidSettings` - the resulting settings are out of range
    /// * `CoreError::OutputExists` - the output exists and overwriting is disabled
    pub fn job_for(&self, input: &Path, info: &VideoInfo) -> CoreResult<ConversionJob> {
        let settings = self.settings_for(info);
        settings.validate()?;
        let total_frames = info.expected_output_frames(settings.fps)?;

        let output = self.output_for(input)?;
        if output == input {
            return Err(CoreError::PathError(format!(
                "Output would overwrite the input {}",
                input.display()
            )));
        }
        if !self.overwrite && output.exists() {
            return Err(CoreError::OutputExists(output.display().to_string()));
        }

        Ok(ConversionJob {
            input: input.to_path_buf(),
            output,
            settings,
            total_frames,
        })
    }
}

/// Builder for `ConvertConfig`.
///
/// # Examples
///
/// ```rust
/// use vid2gif_core::config::ConvertConfigBuilder;
///
/// let config = ConvertConfigBuilder::new()
///     .fps(15)
///     .width(480)
///     .output_dir("/tmp/gifs")
///     .build()
///     .unwrap();
/// assert_eq!(config.fps, Some(15));
/// ```
#[derive(Debug, Clone)]
pub struct ConvertConfigBuilder {
    ffmpeg_path: Option<PathBuf>,
    output_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    fps: Option<u32>,
    width: Option<u32>,
    scale_flags: ScaleFlags,
    overwrite: bool,
}

impl Default for ConvertConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertConfigBuilder {
    pub fn new() -> Self {
        Self {
            ffmpeg_path: None,
            output_file: None,
            output_dir: None,
            fps: None,
            width: None,
            scale_flags: ScaleFlags::default(),
            overwrite: true,
        }
    }

    /// Explicit ffmpeg executable; otherwise `VID2GIF_FFMPEG` or `ffmpeg` on PATH.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = Some(path.into());
        self
    }

    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn scale_flags(mut self, flags: ScaleFlags) -> Self {
        self.scale_flags = flags;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Validates explicit overrides and resolves the ffmpeg binary.
    pub fn build(self) -> CoreResult<ConvertConfig> {
        // Overrides are checked against the same bounds the settings use.
        GifSettings::new(
            self.fps.unwrap_or(DEFAULT_FPS),
            self.width.unwrap_or(DEFAULT_WIDTH),
        )
        .validate()?;

        if self.output_file.is_some() && self.output_dir.is_some() {
            return Err(CoreError::InvalidSettings(
                "an output file and an output directory cannot both be set".to_string(),
            ));
        }

        Ok(ConvertConfig {
            ffmpeg: FfmpegBinary::resolve(self.ffmpeg_path.as_deref()),
            output_file: self.output_file,
            output_dir: self.output_dir,
            fps: self.fps,
            width: self.width,
            scale_flags: self.scale_flags,
            overwrite: self.overwrite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hd_info() -> VideoInfo {
        VideoInfo {
            width: Some(1280),
            height: Some(720),
            frame_rate: Some(25.0),
            duration_secs: Some(4.0),
            total_frames: Some(100),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let config = ConvertConfigBuilder::new().build().unwrap();
        assert_eq!(config.fps, None);
        assert_eq!(config.width, None);
        assert!(config.overwrite);
        assert_eq!(config.scale_flags, ScaleFlags::Lanczos);
    }

    #[test]
    fn test_builder_rejects_invalid_fps() {
        assert!(ConvertConfigBuilder::new().fps(0).build().is_err());
        assert!(ConvertConfigBuilder::new().width(4).build().is_err());
    }

    #[test]
    fn test_builder_rejects_file_and_dir() {
        let result = ConvertConfigBuilder::new()
            .output_file("/tmp/a.gif")
            .output_dir("/tmp")
            .build();
        assert!(matches!(result, Err(CoreError::InvalidSettings(_))));
    }

    #[test]
    fn test_builder_explicit_ffmpeg() {
        let config = ConvertConfigBuilder::new()
            .ffmpeg_path("/opt/bin/ffmpeg")
            .build()
            .unwrap();
        assert_eq!(config.ffmpeg.path(), Path::new("/opt/bin/ffmpeg"));
    }

    #[test]
    fn test_settings_use_source_when_not_overridden() {
        let config = ConvertConfigBuilder::new().build().unwrap();
        assert_eq!(config.settings_for(&hd_info()), GifSettings::new(25, 1280));
        assert_eq!(
            config.settings_for(&VideoInfo::default()),
            GifSettings::new(DEFAULT_FPS, DEFAULT_WIDTH)
        );
    }

    #[test]
    fn test_settings_overrides_win() {
        let config = ConvertConfigBuilder::new()
            .fps(10)
            .width(320)
            .scale_flags(ScaleFlags::Bicubic)
            .build()
            .unwrap();
        let settings = config.settings_for(&hd_info());
        assert_eq!(settings.fps, 10);
        assert_eq!(settings.width, 320);
        assert_eq!(settings.scale_flags, ScaleFlags::Bicubic);
    }

    #[test]
    fn test_job_for_uses_output_dir() {
        let config = ConvertConfigBuilder::new().output_dir("/gifs").build().unwrap();
        let job = config.job_for(Path::new("/videos/a.mp4"), &hd_info()).unwrap();
        assert_eq!(job.output, PathBuf::from("/gifs/a.gif"));
        assert_eq!(job.total_frames, 100);
    }

    #[test]
    fn test_job_for_counts_output_frames() {
        let config = ConvertConfigBuilder::new().fps(10).build().unwrap();
        let job = config.job_for(Path::new("/videos/a.mp4"), &hd_info()).unwrap();
        // 4 s at 10 fps, not the 100 source frames
        assert_eq!(job.total_frames, 40);
    }

    #[test]
    fn test_job_for_requires_frame_count() {
        let config = ConvertConfigBuilder::new().build().unwrap();
        let info = VideoInfo {
            total_frames: None,
            ..hd_info()
        };
        assert!(matches!(
            config.job_for(Path::new("/videos/a.mp4"), &info),
            Err(CoreError::MissingVideoInfo(_))
        ));
    }

    #[test]
    fn test_job_for_refuses_to_overwrite_input() {
        let config = ConvertConfigBuilder::new()
            .output_file("/videos/a.mp4")
            .build()
            .unwrap();
        assert!(matches!(
            config.job_for(Path::new("/videos/a.mp4"), &hd_info()),
            Err(CoreError::PathError(_))
        ));
    }

    #[test]
    fn test_job_for_respects_no_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("a.gif");
        std::fs::write(&existing, b"GIF89a").unwrap();

        let config = ConvertConfigBuilder::new()
            .output_dir(dir.path())
            .overwrite(false)
            .build()
            .unwrap();
        assert!(matches!(
            config.job_for(&dir.path().join("a.mp4"), &hd_info()),
            Err(CoreError::OutputExists(_))
        ));
    }
}
