//! Core library for turning video files into animated GIFs with ffmpeg.
//!
//! The crate never touches pixels itself. It scrapes video metadata from
//! ffmpeg's diagnostic output, builds a palettegen/paletteuse filter graph for
//! the chosen frame rate and width, and runs ffmpeg on a background worker
//! that reports progress as frames are written.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vid2gif_core::{ConversionEvent, ConvertConfigBuilder, Converter, probe_video};
//! use std::path::Path;
//!
//! let config = ConvertConfigBuilder::new().fps(15).width(480).build().unwrap();
//! let input = Path::new("/path/to/clip.mp4");
//!
//! let info = probe_video(&config.ffmpeg, input).unwrap();
//! let job = config.job_for(input, &info).unwrap();
//!
//! let handle = Converter::new(config.ffmpeg.clone()).start(job).unwrap();
//! for event in handle.events() {
//!     if let ConversionEvent::Progress { percent, .. } = event {
//!         println!("{percent}%");
//!     }
//! }
//! let summary = handle.join().unwrap();
//! println!("wrote {}", summary.output.display());
//! ```

pub mod command;
pub mod config;
pub mod conversion;
pub mod discovery;
pub mod error;
pub mod external;
pub mod probe;
pub mod progress;
pub mod settings;
pub mod utils;

// Re-exports for public API
pub use command::build_conversion_args;
pub use config::{ConvertConfig, ConvertConfigBuilder};
pub use conversion::{
    ConversionEvent, ConversionHandle, ConversionJob, ConversionSummary, Converter,
    run_conversion,
};
pub use discovery::{find_video_files, is_supported_video, suggest_output_path};
pub use error::{CoreError, CoreResult};
pub use external::{FfmpegBinary, FfmpegProcess, FfmpegSpawner, SidecarSpawner};
pub use probe::{VideoInfo, parse_probe_output, probe_video};
pub use progress::ProgressTracker;
pub use settings::{FPS_PRESETS, GifSettings, RESOLUTION_PRESETS, Resolution, ScaleFlags};
pub use utils::{format_bytes, format_duration, parse_ffmpeg_time};
