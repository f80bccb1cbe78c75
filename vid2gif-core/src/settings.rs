// ============================================================================
// vid2gif-core/src/settings.rs
// ============================================================================
//
// OUTPUT SETTINGS: Frame Rate, Width and the Palette Filter Graph
//
// A GIF is produced in a single ffmpeg run with a two-branch filter graph:
// the scaled stream is split, one branch generates an optimal 256 colour
// palette and the other is mapped onto it. Only the output width is chosen;
// the height follows the source aspect ratio.

use crate::error::{CoreError, CoreResult};
use crate::probe::VideoInfo;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PRESETS AND DEFAULTS
// ============================================================================

/// Output frame rates offered by default.
pub const FPS_PRESETS: [u32; 5] = [10, 15, 20, 25, 30];

/// Output resolutions offered by default. Only the width is passed to ffmpeg.
pub const RESOLUTION_PRESETS: [&str; 4] = ["640x360", "854x480", "1280x720", "1920x1080"];

/// Frame rate used when the source frame rate is unknown.
pub const DEFAULT_FPS: u32 = FPS_PRESETS[0];

/// Width used when the source width is unknown.
pub const DEFAULT_WIDTH: u32 = 640;

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 100;
pub const MIN_WIDTH: u32 = 16;
pub const MAX_WIDTH: u32 = 7680;

/// Output frame rate derived from the source: its frame rate truncated to an integer.
#[must_use]
pub fn default_fps_for(info: &VideoInfo) -> u32 {
    info.frame_rate
        .filter(|fps| fps.is_finite() && *fps >= 1.0)
        .map_or(DEFAULT_FPS, |fps| (fps as u32).min(MAX_FPS))
}

/// Output width derived from the source: the source width itself.
#[must_use]
pub fn default_width_for(info: &VideoInfo) -> u32 {
    info.width
        .filter(|w| (MIN_WIDTH..=MAX_WIDTH).contains(w))
        .unwrap_or(DEFAULT_WIDTH)
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// A "WIDTHxHEIGHT" pair as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Resolution {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidResolution(s.to_string());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ============================================================================
// SCALING ALGORITHM
// ============================================================================

/// Scaling algorithm passed to ffmpeg's `scale` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleFlags {
    #[default]
    Lanczos,
    Bicubic,
    Bilinear,
    Neighbor,
}

impl ScaleFlags {
    #[must_use]
    pub fn as_ffmpeg_str(self) -> &'static str {
        match self {
            Self::Lanczos => "lanczos",
            Self::Bicubic => "bicubic",
            Self::Bilinear => "bilinear",
            Self::Neighbor => "neighbor",
        }
    }
}

impl FromStr for ScaleFlags {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lanczos" => Ok(Self::Lanczos),
            "bicubic" => Ok(Self::Bicubic),
            "bilinear" => Ok(Self::Bilinear),
            "neighbor" | "nearest" => Ok(Self::Neighbor),
            other => Err(CoreError::InvalidSettings(format!(
                "unknown scale algorithm '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ScaleFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ffmpeg_str())
    }
}

// ============================================================================
// GIF SETTINGS
// ============================================================================

/// Parameters of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifSettings {
    pub fps: u32,
    pub width: u32,
    pub scale_flags: ScaleFlags,
}

impl Default for GifSettings {
    fn default() -> Self {
        Self::new(DEFAULT_FPS, DEFAULT_WIDTH)
    }
}

impl GifSettings {
    #[must_use]
    pub fn new(fps: u32, width: u32) -> Self {
        Self {
            fps,
            width,
            scale_flags: ScaleFlags::default(),
        }
    }

    /// Settings that keep the source frame rate and width.
    #[must_use]
    pub fn from_source(info: &VideoInfo) -> Self {
        Self::new(default_fps_for(info), default_width_for(info))
    }

    #[must_use]
    pub fn with_scale_flags(mut self, scale_flags: ScaleFlags) -> Self {
        self.scale_flags = scale_flags;
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(CoreError::InvalidSettings(format!(
                "frame rate {} outside {MIN_FPS}-{MAX_FPS}",
                self.fps
            )));
        }
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.width) {
            return Err(CoreError::InvalidSettings(format!(
                "width {} outside {MIN_WIDTH}-{MAX_WIDTH}",
                self.width
            )));
        }
        Ok(())
    }

    /// The `-vf` argument: resample, scale, then palettegen/paletteuse on a split stream.
    #[must_use]
    pub fn filter_graph(&self) -> String {
        format!(
            "fps={},scale={}:-1:flags={},split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse",
            self.fps,
            self.width,
            self.scale_flags.as_ffmpeg_str()
        )
    }
}
