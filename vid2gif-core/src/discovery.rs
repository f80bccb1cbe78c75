//! Input discovery and output path suggestions.
//!
//! Supported inputs are files with an mp4, avi, mov or mkv extension
//! (case-insensitive). Directory scans only look at the top level.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Video file extensions accepted as conversion input.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

/// Extension of every produced file.
pub const OUTPUT_EXTENSION: &str = "gif";

/// True when the extension of `path` is one of `SUPPORTED_EXTENSIONS`.
/// Only the name is inspected, the file does not have to exist.
#[must_use]
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// True for an existing file with a supported extension.
#[must_use]
pub fn is_supported_video(path: &Path) -> bool {
    path.is_file() && has_supported_extension(path)
}

/// Finds supported video files in the top level of `input_dir`, sorted by path.
///
/// # Errors
///
/// * `CoreError::Io` - the directory cannot be read
/// * `CoreError::NoFilesFound` - no supported files were found
pub fn find_video_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_supported_video(path))
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    files.sort();
    log::debug!("Found {} video file(s) in {}", files.len(), input_dir.display());
    Ok(files)
}

/// Suggests `<dir>/<stem>.gif` for `input`.
///
/// `output_dir` defaults to the directory containing `input`.
pub fn suggest_output_path(input: &Path, output_dir: Option<&Path>) -> CoreResult<PathBuf> {
    let stem = input.file_stem().ok_or_else(|| {
        CoreError::PathError(format!("No file name in {}", input.display()))
    })?;

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    // Pushing the extension keeps dotted stems like "clip.final" intact.
    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(OUTPUT_EXTENSION);
    Ok(dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_supported_extension() {
        assert!(has_supported_extension(Path::new("clip.mp4")));
        assert!(has_supported_extension(Path::new("clip.MOV")));
        assert!(has_supported_extension(Path::new("dir/clip.Avi")));
        assert!(has_supported_extension(Path::new("clip.mkv")));
        assert!(!has_supported_extension(Path::new("clip.gif")));
        assert!(!has_supported_extension(Path::new("clip")));
        assert!(!has_supported_extension(Path::new("")));
    }

    #[test]
    fn test_suggest_output_next_to_input() {
        let output = suggest_output_path(Path::new("/videos/holiday.mp4"), None).unwrap();
        assert_eq!(output, PathBuf::from("/videos/holiday.gif"));
    }

    #[test]
    fn test_suggest_output_in_directory() {
        let output =
            suggest_output_path(Path::new("/videos/holiday.final.mov"), Some(Path::new("/gifs")))
                .unwrap();
        assert_eq!(output, PathBuf::from("/gifs/holiday.final.gif"));
    }

    #[test]
    fn test_suggest_output_relative_input() {
        let output = suggest_output_path(Path::new("clip.mkv"), None).unwrap();
        assert_eq!(output, PathBuf::from("clip.gif"));
    }

    #[test]
    fn test_suggest_output_without_name() {
        assert!(suggest_output_path(Path::new("/"), None).is_err());
    }
}
