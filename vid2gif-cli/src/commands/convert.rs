//! Implementation of the 'convert' subcommand.
//!
//! Resolves the input (single file or directory), builds the conversion
//! configuration from the arguments, then converts each video in turn on a
//! background worker while the main thread renders progress.

use crate::cli::ConvertArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::output::{print_error, print_heading, print_info, print_success, print_warning};
use crate::progress::ConversionProgress;

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use vid2gif_core::discovery::has_supported_extension;
use vid2gif_core::utils::get_filename_safe;
use vid2gif_core::{
    ConversionSummary, ConvertConfig, ConvertConfigBuilder, Converter, CoreError, FfmpegBinary,
    find_video_files, format_bytes, format_duration, probe_video,
};

/// Resolves INPUT into the list of videos to convert.
pub fn discover_inputs(input: &Path) -> CliResult<Vec<PathBuf>> {
    let metadata = fs::metadata(input).map_err(|e| {
        CoreError::InputNotFound(format!("Invalid input path '{}': {e}", input.display()))
    })?;

    if metadata.is_dir() {
        find_video_files(input)
    } else if has_supported_extension(input) {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(CoreError::UnsupportedInput(format!(
            "'{}' is not an .mp4, .avi, .mov or .mkv file",
            input.display()
        )))
    }
}

/// Builds the core configuration from the parsed arguments.
pub fn build_config(ffmpeg: &FfmpegBinary, args: &ConvertArgs) -> CliResult<ConvertConfig> {
    let mut builder = ConvertConfigBuilder::new()
        .ffmpeg_path(ffmpeg.path())
        .scale_flags(args.scale_flags)
        .overwrite(!args.no_overwrite);

    if let Some(output) = &args.output {
        builder = builder.output_file(output);
    }
    if let Some(dir) = &args.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(fps) = args.fps {
        builder = builder.fps(fps);
    }
    if let Some(width) = args.requested_width() {
        builder = builder.width(width);
    }

    builder.build()
}

pub fn run_convert(ffmpeg: &FfmpegBinary, args: &ConvertArgs) -> CliResult<()> {
    let total_start = Instant::now();

    let inputs = discover_inputs(&args.input)?;
    if inputs.len() > 1 && args.output.is_some() {
        return Err(CoreError::InvalidSettings(
            "--output needs a single input file; use --output-dir for directories".to_string(),
        ));
    }

    let version = ffmpeg.check_available()?;
    debug!("Using {version}");

    let config = build_config(ffmpeg, args)?;
    info!("Converting {} file(s)", inputs.len());

    if let [input] = inputs.as_slice() {
        convert_one(&config, input)?;
        return Ok(());
    }

    let mut converted = 0usize;
    for input in &inputs {
        match convert_one(&config, input) {
            Ok(_) => converted += 1,
            Err(e) => print_error(&format!("{}: {e}", input.display())),
        }
    }

    print_heading("Summary");
    print_info("Converted", format!("{converted} of {}", inputs.len()));
    print_info("Total time", format_duration(total_start.elapsed().as_secs_f64()));

    if converted == inputs.len() {
        Ok(())
    } else {
        Err(CoreError::OperationFailed(format!(
            "{} of {} conversions failed",
            inputs.len() - converted,
            inputs.len()
        )))
    }
}

fn convert_one(config: &ConvertConfig, input: &Path) -> CliResult<ConversionSummary> {
    let name = get_filename_safe(input)?;
    let video = probe_video(&config.ffmpeg, input)
        .cli_with_context(|| format!("Unable to read video information for {name}"))?;
    let job = config.job_for(input, &video)?;

    print_heading(&name);
    if let Some(resolution) = video.resolution_label() {
        print_info("Source", resolution);
    }
    print_info(
        "Output",
        format!("{} fps, {} px wide", job.settings.fps, job.settings.width),
    );
    print_info("Writing to", job.output.display());
    if video.frame_rate.is_some_and(|fps| f64::from(job.settings.fps) > fps) {
        print_warning("Output frame rate is higher than the source; frames will be duplicated");
    }

    let progress = ConversionProgress::new("Converting");
    let handle = Converter::new(config.ffmpeg.clone()).start(job)?;
    progress.follow(&handle);
    let summary = handle.join()?;

    print_success(&format!(
        "GIF written: {} ({}, {})",
        summary.output.display(),
        format_bytes(summary.output_size),
        format_duration(summary.elapsed.as_secs_f64())
    ));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use tempfile::tempdir;

    fn convert_args(argv: &[&str]) -> ConvertArgs {
        let mut full = vec!["vid2gif", "convert"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Convert(args) => args,
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_discover_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("clip.MOV");
        fs::write(&file, b"not really a video").unwrap();
        assert_eq!(discover_inputs(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_discover_rejects_unsupported_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, b"text").unwrap();
        assert!(matches!(discover_inputs(&file), Err(CoreError::UnsupportedInput(_))));
    }

    #[test]
    fn test_discover_missing_path() {
        let result = discover_inputs(Path::new("surely/missing/clip.mp4"));
        assert!(matches!(result, Err(CoreError::InputNotFound(_))));
    }

    #[test]
    fn test_build_config_from_args() {
        let args = convert_args(&["clip.mp4", "--fps", "15", "--resolution", "854x480", "-d", "/gifs"]);
        let config = build_config(&FfmpegBinary::new("/opt/ffmpeg"), &args).unwrap();
        assert_eq!(config.fps, Some(15));
        assert_eq!(config.width, Some(854));
        assert_eq!(config.output_dir, Some(PathBuf::from("/gifs")));
        assert_eq!(config.ffmpeg.path(), Path::new("/opt/ffmpeg"));
        assert!(config.overwrite);
    }

    #[test]
    fn test_build_config_no_overwrite() {
        let args = convert_args(&["clip.mp4", "--no-overwrite", "-o", "out.gif"]);
        let config = build_config(&FfmpegBinary::new("ffmpeg"), &args).unwrap();
        assert!(!config.overwrite);
        assert_eq!(config.output_file, Some(PathBuf::from("out.gif")));
    }
}
