// vid2gif-cli/src/main.rs
//
// Entry point for the vid2gif binary.
//
// Parses the command line, sets up console and file logging, resolves the
// ffmpeg executable and dispatches to the selected subcommand. Any error is
// printed once on stderr and turned into a non-zero exit code.

use clap::Parser;
use log::debug;
use std::process;

use vid2gif_cli::output::print_error;
use vid2gif_cli::{Cli, Commands, init_logging, run_convert, run_info, run_presets};
use vid2gif_core::{CoreResult, FfmpegBinary};

fn run(cli: Cli) -> CoreResult<()> {
    let ffmpeg = FfmpegBinary::resolve(cli.ffmpeg.as_deref());
    debug!("Using ffmpeg at {}", ffmpeg.path().display());

    match cli.command {
        Commands::Info(args) => run_info(&ffmpeg, &args),
        Commands::Convert(args) => run_convert(&ffmpeg, &args),
        Commands::Presets => {
            run_presets();
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match init_logging(cli.verbose, cli.log_dir.as_deref()) {
        Ok(Some(log_file)) => debug!("Logging to {}", log_file.display()),
        Ok(None) => {}
        Err(e) => {
            print_error(&format!("Failed to initialize logging: {e}"));
            process::exit(1);
        }
    }

    if let Err(e) = run(cli) {
        debug!("Exiting with error: {e:?}");
        print_error(&e.to_string());
        process::exit(1);
    }
}
