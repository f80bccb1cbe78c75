// ============================================================================
// vid2gif-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses `CoreError` so that every failure, whether raised by the
// core library or by argument handling, is reported the same way by main.

use std::fmt;
use vid2gif_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Adds a human-readable context prefix to errors, in the spirit of
/// anyhow's `context`, while keeping the `CoreError` type.
pub trait CliErrorContext<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;

    /// Lazily evaluated variant of `cli_context`.
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{context}: {core_error}"))
        })
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {core_error}", f()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_result_context() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        let err = result.cli_context("Failed to create output directory").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to create output directory: I/O error: disk full"
        );
    }

    #[test]
    fn test_result_with_context_wraps_core_error() {
        let result: CoreResult<()> = Err(CoreError::ProbeFailed("Invalid data".to_string()));
        let err = result
            .cli_with_context(|| format!("Unable to read video information for {}", "clip.mp4"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to read video information for clip.mp4: Could not read video information: Invalid data"
        );
    }
}
