// ============================================================================
// vid2gif-core/src/external.rs
// ============================================================================
//
// EXTERNAL TOOLS: Locating and Running the ffmpeg Binary
//
// All media work is delegated to ffmpeg. This module resolves which binary to
// run, checks that it can be started, and abstracts the running process behind
// traits so that the conversion worker can be driven by a mock in tests.
//
// KEY COMPONENTS:
// - FfmpegBinary: resolved path of the executable
// - FfmpegProcess / FfmpegSpawner: traits over a running ffmpeg command
// - SidecarSpawner: implementation backed by ffmpeg-sidecar

use crate::error::{
    CoreError, CoreResult, command_failed_error, command_start_error, command_wait_error,
};
use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Environment variable that overrides the ffmpeg executable.
pub const FFMPEG_ENV_VAR: &str = "VID2GIF_FFMPEG";

/// Executable name looked up on PATH when nothing else is configured.
pub const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";

// ============================================================================
// BINARY RESOLUTION
// ============================================================================

/// Path of the ffmpeg executable used for probing and conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegBinary {
    path: PathBuf,
}

impl Default for FfmpegBinary {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl FfmpegBinary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Picks the executable: explicit path, then `VID2GIF_FFMPEG`, then `ffmpeg` on PATH.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::resolve_with(explicit, env::var_os(FFMPEG_ENV_VAR))
    }

    fn resolve_with(explicit: Option<&Path>, from_env: Option<OsString>) -> Self {
        if let Some(path) = explicit {
            log::debug!("Using ffmpeg from command line: {}", path.display());
            return Self::new(path);
        }
        if let Some(value) = from_env.filter(|v| !v.is_empty()) {
            log::debug!("Using ffmpeg from {}: {:?}", FFMPEG_ENV_VAR, value);
            return Self::new(PathBuf::from(value));
        }
        Self::new(DEFAULT_FFMPEG_BINARY)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `<ffmpeg> -version` and returns the first line of its output.
    ///
    /// # Errors
    ///
    /// * `CoreError::DependencyNotFound` - the binary does not exist or is not executable
    /// * `CoreError::CommandStart` - the binary exists but could not be started
    /// * `CoreError::CommandFailed` - `-version` exited unsuccessfully
    pub fn check_available(&self) -> CoreResult<String> {
        log::debug!("Checking for ffmpeg at {}", self.path.display());
        let output = Command::new(&self.path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CoreError::DependencyNotFound(format!(
                        "ffmpeg not found at '{}' (set {} or pass --ffmpeg)",
                        self.path.display(),
                        FFMPEG_ENV_VAR
                    ))
                } else {
                    command_start_error("ffmpeg -version", e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(command_failed_error(
                format!("{} -version", self.path.display()),
                output.status,
                stderr.trim(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }
}

// ============================================================================
// PROCESS ABSTRACTION
// ============================================================================

/// An ffmpeg process whose stderr is parsed into events.
pub trait FfmpegProcess {
    /// Feeds every parsed event to `handler` until the process closes stderr.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the process to exit.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Something that can start an ffmpeg process from a binary and an argument list.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    fn spawn(&self, binary: &FfmpegBinary, args: &[String]) -> CoreResult<Self::Process>;
}

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild`.
pub struct SidecarProcess(FfmpegChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to read ffmpeg events: {e}");
            CoreError::OperationFailed(format!("Failed to read ffmpeg output: {e}"))
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0.wait().map_err(|e| command_wait_error("ffmpeg", e))
    }
}

/// `FfmpegSpawner` backed by `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, binary: &FfmpegBinary, args: &[String]) -> CoreResult<Self::Process> {
        log::debug!("Spawning {} {}", binary.path().display(), args.join(" "));
        let mut cmd = FfmpegCommand::new_with_path(binary.path());
        cmd.args(args);
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (conversion)", e))
    }
}
