//! Non-recursive listing of the files in a folder that match a glob.

use std::fs;
use std::path::{Path, PathBuf};
use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;
use crate::utils::{CompressorError, CompressorResult, validate_folder};

/// Compiles an extension pattern such as `*.jpg`.
///
/// Matching is case-insensitive so `*.jpg` also picks up `IMG_0001.JPG`.
pub fn compile_pattern(pattern: &str) -> CompressorResult<GlobMatcher> {
    GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| CompressorError::invalid_config(format!("Invalid pattern '{pattern}': {e}")))
}

/// Lists the names of regular files directly inside `folder` that match `pattern`.
///
/// Names are returned in directory-iteration order, which is filesystem
/// dependent. An existing folder with no matches yields an empty list.
pub fn list_matching_files(folder: &Path, pattern: &str) -> CompressorResult<Vec<PathBuf>> {
    validate_folder(folder)?;
    let matcher = compile_pattern(pattern)?;

    let entries = fs::read_dir(folder).map_err(|e| CompressorError::from_io(folder, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CompressorError::from_io(folder, e))?;
        let name = PathBuf::from(entry.file_name());
        if !matcher.is_match(&name) {
            continue;
        }
        // file_type() does not follow symlinks; metadata() does
        let is_file = fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false);
        if is_file {
            names.push(name);
        }
    }

    debug!("Found {} file(s) matching '{}' in {}", names.len(), pattern, folder.display());
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sorted(mut names: Vec<PathBuf>) -> Vec<PathBuf> {
        names.sort();
        names
    }

    #[test]
    fn test_empty_folder() {
        let dir = TempDir::new().unwrap();
        assert!(list_matching_files(dir.path(), "*.jpg").unwrap().is_empty());
    }

    #[test]
    fn test_only_matching_names() {
        let dir = TempDir::new().unwrap();
        for name in ["a.jpg", "b.jpg", "c.JPG", "d.png", "e.txt", "jpg"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let names = sorted(list_matching_files(dir.path(), "*.jpg").unwrap());
        assert_eq!(
            names,
            vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg"), PathBuf::from("c.JPG")]
        );
    }

    #[test]
    fn test_not_recursive_and_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("top.jpg"), b"x").unwrap();
        fs::create_dir(dir.path().join("folder.jpg")).unwrap();
        fs::write(dir.path().join("folder.jpg").join("nested.jpg"), b"x").unwrap();

        let names = list_matching_files(dir.path(), "*.jpg").unwrap();
        assert_eq!(names, vec![PathBuf::from("top.jpg")]);
    }

    #[test]
    fn test_missing_folder_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = list_matching_files(&dir.path().join("missing"), "*.jpg").unwrap_err();
        assert!(matches!(err, CompressorError::NotFound(_)));
    }

    #[test]
    fn test_file_as_folder_is_not_found() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.jpg");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            list_matching_files(&file, "*.jpg"),
            Err(CompressorError::NotFound(_))
        ));
    }

    #[test]
    fn test_bad_pattern_is_invalid_config() {
        let dir = TempDir::new().unwrap();
        let err = list_matching_files(dir.path(), "*.{jpg").unwrap_err();
        assert!(matches!(err, CompressorError::InvalidConfig(_)));
    }
}
