//! `vid2gif info`: probe a video and show what a conversion would use.

use crate::cli::InfoArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::output::{print_heading, print_info, print_section};
use vid2gif_core::settings::{default_fps_for, default_width_for};
use vid2gif_core::utils::get_filename_safe;
use vid2gif_core::{CoreError, FfmpegBinary, VideoInfo, format_duration, probe_video};

pub fn run_info(ffmpeg: &FfmpegBinary, args: &InfoArgs) -> CliResult<()> {
    let info = probe_video(ffmpeg, &args.input)?;

    if args.json {
        let json = serde_json::to_string_pretty(&info)
            .map_err(|e| CoreError::OperationFailed(format!("JSON serialization failed: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    let name = get_filename_safe(&args.input).cli_context("Invalid input path")?;
    print_video_info(&name, &info);
    Ok(())
}

fn print_video_info(name: &str, info: &VideoInfo) {
    const UNKNOWN: &str = "unknown";

    print_heading(name);
    print_info(
        "Resolution",
        info.resolution_label().unwrap_or_else(|| UNKNOWN.to_string()),
    );
    print_info(
        "Frame rate",
        info.frame_rate
            .map_or_else(|| UNKNOWN.to_string(), |fps| format!("{fps:.2} fps")),
    );
    print_info(
        "Duration",
        info.duration_secs
            .map_or_else(|| UNKNOWN.to_string(), format_duration),
    );
    print_info(
        "Total frames",
        info.total_frames
            .map_or_else(|| UNKNOWN.to_string(), |n| n.to_string()),
    );

    print_section("Conversion defaults");
    print_info("Frame rate", format!("{} fps", default_fps_for(info)));
    print_info("Width", format!("{} px", default_width_for(info)));
}
