//! Assembly of the ffmpeg argument list for a GIF conversion.

use crate::settings::GifSettings;
use std::path::Path;

/// Builds `-hide_banner -i <input> -vf <filter graph> -y <output>`.
///
/// The output is always overwritten; callers check for an existing file
/// before starting when overwriting is not wanted.
#[must_use]
pub fn build_conversion_args(input: &Path, output: &Path, settings: &GifSettings) -> Vec<String> {
    vec![
        "-hide_banner".to_string(),
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-vf".to_string(),
        settings.filter_graph(),
        "-y".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}
