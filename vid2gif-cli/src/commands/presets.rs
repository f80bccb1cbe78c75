//! `vid2gif presets`: list the suggested output settings.

use crate::output::{print_heading, print_info};
use vid2gif_core::settings::{DEFAULT_FPS, DEFAULT_WIDTH};
use vid2gif_core::{FPS_PRESETS, RESOLUTION_PRESETS};

pub fn run_presets() {
    let fps = FPS_PRESETS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    print_heading("Output presets");
    print_info("Frame rates", fps);
    print_info("Resolutions", RESOLUTION_PRESETS.join(", "));
    print_info(
        "Fallback",
        format!("{DEFAULT_FPS} fps, {DEFAULT_WIDTH} px (when the source cannot be probed)"),
    );
}
