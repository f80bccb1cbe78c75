// ============================================================================
// vid2gif-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Core Library
//
// Every fallible operation in vid2gif-core returns `CoreResult<T>`. Process
// related failures carry the command name so that the CLI can print a useful
// message without knowing how the command was assembled.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the vid2gif core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to start {command}: {source}")]
    CommandStart {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed waiting for {command}: {source}")]
    CommandWait {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Required dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Unsupported input file: {0}")]
    UnsupportedInput(String),

    #[error("Could not read video information: {0}")]
    ProbeFailed(String),

    #[error("Video information incomplete: {0}")]
    MissingVideoInfo(String),

    #[error("Invalid output settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid resolution '{0}', expected WIDTHxHEIGHT")]
    InvalidResolution(String),

    #[error("FFmpeg error: {stderr}")]
    ConversionFailed { stderr: String },

    #[error("FFmpeg produced an empty output file (no frames were encoded)")]
    EmptyOutput,

    #[error("Output file already exists: {0}")]
    OutputExists(String),

    #[error("No supported video files found")]
    NoFilesFound,

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Conversion worker terminated unexpectedly")]
    WorkerPanicked,

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for vid2gif-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

pub fn command_start_error(command: impl Into<String>, source: io::Error) -> CoreError {
    CoreError::CommandStart {
        command: command.into(),
        source,
    }
}

pub fn command_wait_error(command: impl Into<String>, source: io::Error) -> CoreError {
    CoreError::CommandWait {
        command: command.into(),
        source,
    }
}

pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into(),
    }
}
