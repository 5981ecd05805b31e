use crate::error::{AnalysisError, BootstrapError};
use std::fs;
use std::path::{Path, PathBuf};

/// Validates a project path before analysis
pub fn validate_project_path(path: &Path) -> Result<PathBuf, BootstrapError> {
    // Try to canonicalize, but be more forgiving on Windows
    let canonical = match path.canonicalize() {
        Ok(p) => p,
        Err(_) => {
            // On Windows, canonicalize can fail for valid paths due to permissions
            // Fall back to the given path if it exists
            if path.exists() {
                path.to_path_buf()
            } else {
                return Err(AnalysisError::InvalidPath {
                    path: path.to_path_buf(),
                }
                .into());
            }
        }
    };

    // Basic validation - path should exist and be a directory
    if !canonical.is_dir() {
        return Err(AnalysisError::InvalidPath {
            path: path.to_path_buf(),
        }
        .into());
    }

    Ok(canonical)
}

/// Reads file content safely with a size limit
pub fn read_file_safe(path: &Path, max_size: usize) -> Result<String, BootstrapError> {
    let metadata = fs::metadata(path)?;

    if metadata.len() > max_size as u64 {
        log::debug!("Skipping large file: {}", path.display());
        return Err(AnalysisError::FileTooLarge {
            path: path.to_path_buf(),
        }
        .into());
    }

    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_project_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path();

        let result = validate_project_path(path);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        assert!(validate_project_path(&missing).is_err());
    }

    #[test]
    fn test_validate_rejects_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "content").unwrap();

        assert!(validate_project_path(&file).is_err());
    }

    #[test]
    fn test_read_file_safe() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("small.txt");
        fs::write(&file, "hello").unwrap();

        let content = read_file_safe(&file, 1024).unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn test_read_file_safe_enforces_limit() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("big.txt");
        fs::write(&file, "this line is longer than the limit").unwrap();

        assert!(read_file_safe(&file, 10).is_err());
    }
}
