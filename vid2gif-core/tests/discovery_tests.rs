// vid2gif-core/tests/discovery_tests.rs

use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;
use vid2gif_core::{CoreError, find_video_files, is_supported_video};

#[test]
fn test_find_video_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("b_clip.MP4"))?;
    File::create(input_dir.join("a_clip.mov"))?;
    File::create(input_dir.join("c_clip.avi"))?;
    File::create(input_dir.join("d_clip.mkv"))?;
    File::create(input_dir.join("notes.txt"))?;
    File::create(input_dir.join("already.gif"))?;
    fs::create_dir(input_dir.join("nested"))?;
    File::create(input_dir.join("nested").join("deep.mp4"))?;

    let files = find_video_files(input_dir)?;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["a_clip.mov", "b_clip.MP4", "c_clip.avi", "d_clip.mkv"]);
    Ok(())
}

#[test]
fn test_find_video_files_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("readme.md"))?;

    match find_video_files(dir.path()) {
        Err(CoreError::NoFilesFound) => {}
        other => panic!("Unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_find_video_files_nonexistent_dir() {
    let missing = PathBuf::from("surely_this_does_not_exist_vid2gif");
    assert!(matches!(find_video_files(&missing), Err(CoreError::Io(_))));
}

#[test]
fn test_is_supported_video_requires_existing_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let present = dir.path().join("clip.mp4");
    File::create(&present)?;

    assert!(is_supported_video(&present));
    assert!(!is_supported_video(&dir.path().join("missing.mp4")));
    assert!(!is_supported_video(dir.path()));
    Ok(())
}
