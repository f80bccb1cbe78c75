// ============================================================================
// vid2gif-cli/src/logging.rs
// ============================================================================
//
// LOGGING: Console and File Logging Setup
//
// Console output for the user is printed by the `output` module; the `log`
// records are diagnostics. The console only shows warnings and errors unless
// --verbose is given, so that log lines do not tear the progress bar. When a
// log directory is configured, a timestamped file receives everything at
// info level or above (debug with --verbose).
//
// RUST_LOG, when set to a plain level (e.g. `trace`), overrides both levels.

use crate::error::{CliErrorContext, CliResult};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Levels used for the console and the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevels {
    pub console: LevelFilter,
    pub file: LevelFilter,
}

impl LogLevels {
    pub fn from_flags(verbose: bool, rust_log: Option<&str>) -> Self {
        if let Some(level) = rust_log.and_then(|v| LevelFilter::from_str(v.trim()).ok()) {
            return Self {
                console: level,
                file: level,
            };
        }
        if verbose {
            Self {
                console: LevelFilter::Debug,
                file: LevelFilter::Debug,
            }
        } else {
            Self {
                console: LevelFilter::Warn,
                file: LevelFilter::Info,
            }
        }
    }
}

/// Installs the global logger. Returns the path of the log file, if any.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let levels = LogLevels::from_flags(verbose, rust_log.as_deref());

    // ffmpeg's own warnings are noisy; keep them off the console unless debugging.
    let ffmpeg_console = if levels.console > LevelFilter::Warn {
        levels.console
    } else {
        levels.console.min(LevelFilter::Error)
    };

    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message));
        })
        .level(levels.console)
        .level_for("ffmpeg_log", ffmpeg_console)
        .chain(std::io::stderr());

    let mut root = fern::Dispatch::new().chain(console);

    let log_path = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .cli_with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let path = dir.join(format!("vid2gif_{}.log", get_timestamp()));
            let file = fern::log_file(&path)
                .cli_with_context(|| format!("Failed to open log file {}", path.display()))?;
            root = root.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "{} [{}] {}: {}",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                            record.level(),
                            record.target(),
                            message
                        ));
                    })
                    .level(levels.file)
                    .chain(file),
            );
            Some(path)
        }
        None => None,
    };

    root.apply()
        .map_err(|e| vid2gif_core::CoreError::OperationFailed(format!("Failed to set logger: {e}")))?;
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(ts.as_bytes()[8], b'_');
    }

    #[test]
    fn test_levels_default() {
        let levels = LogLevels::from_flags(false, None);
        assert_eq!(levels.console, LevelFilter::Warn);
        assert_eq!(levels.file, LevelFilter::Info);
    }

    #[test]
    fn test_levels_verbose() {
        let levels = LogLevels::from_flags(true, None);
        assert_eq!(levels.console, LevelFilter::Debug);
    }

    #[test]
    fn test_levels_rust_log_override() {
        let levels = LogLevels::from_flags(false, Some("trace"));
        assert_eq!(levels.console, LevelFilter::Trace);
        assert_eq!(levels.file, LevelFilter::Trace);

        // Module directives are not understood; fall back to the flags.
        let levels = LogLevels::from_flags(true, Some("vid2gif_core=debug"));
        assert_eq!(levels.console, LevelFilter::Debug);
    }
}
