use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use crate::utils::{CompressorError, CompressorResult};

/// Get file size in bytes
pub fn file_size(path: impl AsRef<Path>) -> CompressorResult<u64> {
    let path = path.as_ref();
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| CompressorError::from_io(path, e))
}

/// Replaces the contents of `path` with `bytes` in one step.
///
/// The bytes are written to a temporary file next to the real file and then
/// renamed over it, so readers see either the old or the new file, never a
/// truncated one. Symlinks are resolved first: the file they point to is
/// replaced and the link itself stays. The original file's permissions are
/// carried over.
pub fn write_atomically(path: impl AsRef<Path>, bytes: &[u8]) -> CompressorResult<()> {
    let path = path.as_ref();
    let target = fs::canonicalize(path)
        .map_err(|e| CompressorError::encode(path, format!("Cannot resolve target: {e}")))?;
    let dir = target.parent().unwrap_or(Path::new("."));

    let permissions = fs::metadata(&target)
        .map(|m| m.permissions())
        .map_err(|e| CompressorError::encode(path, format!("Cannot stat target: {e}")))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| CompressorError::encode(path, format!("Cannot create temporary file: {e}")))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| CompressorError::encode(path, format!("Write failed: {e}")))?;
    fs::set_permissions(tmp.path(), permissions)
        .map_err(|e| CompressorError::encode(path, format!("Cannot set permissions: {e}")))?;

    tmp.persist(&target)
        .map_err(|e| CompressorError::encode(path, format!("Rename failed: {}", e.error)))?;
    Ok(())
}

/// Returns the final path component as a displayable string
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_size_reports_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.jpg");
        fs::write(&path, vec![0u8; 1234]).unwrap();

        assert_eq!(file_size(&path).unwrap(), 1234);
    }

    #[test]
    fn test_file_size_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = file_size(dir.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, CompressorError::NotFound(_)));
    }

    #[test]
    fn test_write_atomically_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.jpg");
        fs::write(&path, b"original bytes that are longer").unwrap();

        write_atomically(&path, b"short").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"short");
        // No temporary files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomically_missing_target() {
        let dir = TempDir::new().unwrap();
        let err = write_atomically(dir.path().join("gone.jpg"), b"x").unwrap_err();
        assert!(matches!(err, CompressorError::Encode { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomically_through_symlink() {
        let outside = TempDir::new().unwrap();
        let real = outside.path().join("real.jpg");
        fs::write(&real, vec![0x11; 100]).unwrap();
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("link.jpg");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_atomically(&link, b"smaller").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&real).unwrap(), b"smaller");
        assert_eq!(file_size(&link).unwrap(), 7);
        // The temporary file lands beside the real file, not beside the link
        assert_eq!(fs::read_dir(outside.path()).unwrap().count(), 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/photos/a.jpg")), "a.jpg");
    }
}
