//! File validation utilities for ensuring files are suitable for reverse reading.
//!
//! This module checks that a path can be opened for random access before a
//! reader is built on top of it, so path problems get a precise error instead of
//! a generic I/O failure.

use crate::error::{Result, RevLinesError};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Validate that a file path is accessible and suitable for reverse reading
///
/// Returns the opened handle, so callers read the same file that was checked.
///
/// # Validations Performed
/// - Path exists
/// - Path is a regular file (not a directory, FIFO or device); random access
///   needs a real length and seekable content
/// - File is readable by the current process
///
/// Empty files pass validation: reading one simply yields no lines.
pub fn validate_file_path(path: &Path) -> Result<File> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RevLinesError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => RevLinesError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => RevLinesError::file_error("Failed to read file metadata", e),
    })?;

    // Checked before opening: opening a FIFO would block
    if !metadata.is_file() {
        return Err(RevLinesError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RevLinesError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => RevLinesError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => RevLinesError::file_error("Cannot open file for reading", e),
    })?;

    // The path may have been swapped since the first check
    let opened = file
        .metadata()
        .map_err(|e| RevLinesError::file_error("Failed to read file metadata", e))?;
    if !opened.is_file() {
        return Err(RevLinesError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    /// Create a test file with specific content
    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content)
            .expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[test]
    fn test_validate_valid_file() {
        let content = b"This is valid log content\nLine 2\nLine 3\n";
        let test_file = create_test_file(content);

        let file = validate_file_path(test_file.path()).unwrap();
        assert_eq!(file.metadata().unwrap().len(), content.len() as u64);
    }

    #[test]
    fn test_validate_empty_file_is_accepted() {
        let empty_file = create_test_file(&[]);
        let file = validate_file_path(empty_file.path()).unwrap();
        assert_eq!(file.metadata().unwrap().len(), 0);
    }

    #[test]
    fn test_validated_handle_survives_path_removal() {
        use std::io::Read;

        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("app.log");
        std::fs::write(&path, b"kept\n").unwrap();

        let mut file = validate_file_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "kept\n");
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let non_existent = Path::new("/this/file/does/not/exist.log");

        match validate_file_path(non_existent) {
            Err(RevLinesError::FileNotFound { path }) => {
                assert_eq!(path, non_existent);
            }
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        match validate_file_path(temp_dir.path()) {
            Err(RevLinesError::NotAFile { path }) => {
                assert_eq!(path, temp_dir.path());
            }
            other => panic!("Expected NotAFile for directory, got {other:?}"),
        }
    }
}
