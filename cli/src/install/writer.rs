use crate::install::resolver::InstallTarget;
use crate::utils::error::{SnippetError, SnippetResult};
use std::fs;
use tracing::debug;

/// Writes snippet bodies to disk
pub struct FileWriter;

impl FileWriter {
    /// Write `body` to the target, creating parent directories first.
    ///
    /// An existing file is only replaced when the target allows overwrite;
    /// otherwise nothing is written and `AlreadyExists` is returned.
    pub fn write(target: &InstallTarget, body: &str) -> SnippetResult<()> {
        let path = &target.path;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!(dir = %parent.display(), "creating parent directories");
                fs::create_dir_all(parent).map_err(|e| {
                    SnippetError::FileSystem(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        if path.exists() && !target.overwrite {
            return Err(SnippetError::AlreadyExists(path.clone()));
        }

        if path.is_dir() {
            return Err(SnippetError::FileSystem(format!(
                "{} is a directory",
                path.display()
            )));
        }

        fs::write(path, body).map_err(|e| {
            SnippetError::FileSystem(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), bytes = body.len(), "snippet written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn target(path: PathBuf, overwrite: bool) -> InstallTarget {
        InstallTarget { path, overwrite }
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("components").join("ui").join("button.tsx");

        FileWriter::write(&target(path.clone(), false), "export {}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "export {}");
    }

    #[test]
    fn test_existing_file_without_overwrite_is_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.go");
        fs::write(&path, "original").unwrap();
        let before = fs::read(&path).unwrap();

        let result = FileWriter::write(&target(path.clone(), false), "package main");

        assert!(matches!(result, Err(SnippetError::AlreadyExists(p)) if p == path));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_overwrite_replaces_content_exactly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.go");
        fs::write(&path, "a much longer original body that must not survive").unwrap();

        let body = "package main\n\nfunc main() {}\n";
        FileWriter::write(&target(path.clone(), true), body).unwrap();

        assert_eq!(fs::read(&path).unwrap(), body.as_bytes());
    }

    #[test]
    fn test_directory_target_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let result = FileWriter::write(&target(dir.path().to_path_buf(), true), "x");
        assert!(matches!(result, Err(SnippetError::FileSystem(_))));
    }
}
