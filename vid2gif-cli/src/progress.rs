// ============================================================================
// vid2gif-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Progress bar driven by conversion events
//
// The conversion runs on a background worker; this module consumes its
// `ConversionEvent`s on the main thread and mirrors them in an indicatif bar.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;
use vid2gif_core::{ConversionEvent, ConversionHandle};

/// Progress bar for a single conversion, measured in percent.
pub struct ConversionProgress {
    bar: ProgressBar,
}

impl ConversionProgress {
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("  {msg} {percent:>3}% [{bar:30.cyan/blue}] ({elapsed})")
        {
            bar.set_style(style.progress_chars("##."));
        }
        bar.set_message(label.to_string());

        if !std::io::stderr().is_terminal() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Applies one event to the bar.
    pub fn apply(&self, event: &ConversionEvent) {
        match event {
            ConversionEvent::Started { total_frames } => {
                log::debug!("Conversion started, expecting {total_frames} frames");
            }
            ConversionEvent::Progress { frame, percent } => {
                self.bar.set_position(u64::from(*percent));
                log::trace!("frame {frame} ({percent}%)");
            }
            ConversionEvent::Finished(_) => {
                self.bar.set_position(100);
                self.bar.finish_and_clear();
            }
            ConversionEvent::Failed(_) => self.bar.abandon(),
        }
    }

    /// Consumes all events of `handle` until its worker exits.
    pub fn follow(&self, handle: &ConversionHandle) {
        for event in handle.events() {
            self.apply(&event);
        }
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
