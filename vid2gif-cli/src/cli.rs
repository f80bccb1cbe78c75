// vid2gif-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vid2gif_core::settings::{MAX_FPS, MAX_WIDTH, MIN_FPS, MIN_WIDTH};
use vid2gif_core::{Resolution, ScaleFlags};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vid2gif: Convert videos to animated GIFs",
    long_about = "Inspects videos and converts them to palette-optimized animated GIFs using ffmpeg."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the ffmpeg executable (defaults to `ffmpeg` on PATH)
    #[arg(long, global = true, value_name = "FFMPEG_PATH", env = "VID2GIF_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Enable debug logging on the console
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Optional: Directory for a timestamped log file
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shows resolution, frame rate, duration and frame count of a video
    Info(InfoArgs),
    /// Converts a video file, or every video in a directory, to GIF
    Convert(ConvertArgs),
    /// Lists the suggested output frame rates and resolutions
    Presets,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Video file to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Print the probe result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Video file (.mp4, .avi, .mov, .mkv) or directory containing videos
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output GIF path (single input only; defaults to INPUT with a .gif extension)
    #[arg(short, long, value_name = "OUTPUT", conflicts_with = "output_dir")]
    pub output: Option<PathBuf>,

    /// Directory where GIFs are written (defaults to each input's directory)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output frame rate (defaults to the source frame rate)
    #[arg(long, value_name = "FPS",
          value_parser = clap::value_parser!(u32).range(MIN_FPS as i64..=MAX_FPS as i64))]
    pub fps: Option<u32>,

    /// Output width in pixels; height keeps the aspect ratio (defaults to the source width)
    #[arg(short, long, value_name = "PIXELS", conflicts_with = "resolution",
          value_parser = clap::value_parser!(u32).range(MIN_WIDTH as i64..=MAX_WIDTH as i64))]
    pub width: Option<u32>,

    /// Output resolution as WIDTHxHEIGHT, e.g. 854x480 (only the width is used)
    #[arg(short, long, value_name = "WxH")]
    pub resolution: Option<Resolution>,

    /// Scaling algorithm: lanczos, bicubic, bilinear or neighbor
    #[arg(long, value_name = "ALGORITHM", default_value = "lanczos")]
    pub scale_flags: ScaleFlags,

    /// Fail instead of replacing an existing GIF
    #[arg(long)]
    pub no_overwrite: bool,
}

impl ConvertArgs {
    /// The requested output width from either `--width` or `--resolution`.
    pub fn requested_width(&self) -> Option<u32> {
        self.width.or(self.resolution.map(|r| r.width))
    }
}
