use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Trait for file system operations used by the scaffold steps.
pub trait FileSystem {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    fn ensure_dir(&self, dir: &Path) -> Result<()>;
    fn remove_dir_all(&self, dir: &Path) -> Result<()>;
}

/// Local filesystem implementation
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::internal_io(
                    format!("File not found: {}", path.display()),
                    Some("read file".to_string()),
                )
            } else {
                Error::internal_io(e.to_string(), Some("read file".to_string()))
            }
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        // Atomic write: write to temp file, then rename
        let parent = path.parent().ok_or_else(|| {
            Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some("write file".to_string()),
            )
        })?;

        let filename = path.file_name().ok_or_else(|| {
            Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some("write file".to_string()),
            )
        })?;

        let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

        fs::write(&tmp_path, content)
            .map_err(|e| Error::internal_io(e.to_string(), Some("write temp file".to_string())))?;

        fs::rename(&tmp_path, path)
            .map_err(|e| Error::internal_io(e.to_string(), Some("rename temp file".to_string())))?;

        Ok(())
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                Error::internal_io(e.to_string(), Some("create directory".to_string()))
            })?;
        }
        Ok(())
    }

    fn remove_dir_all(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        fs::remove_dir_all(dir)
            .map_err(|e| Error::internal_io(e.to_string(), Some("remove directory".to_string())))
    }
}

/// Convenience function to get local filesystem
pub fn local() -> LocalFs {
    LocalFs::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_local_fs_write_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let fs = local();

        fs.write(&path, "hello world").unwrap();
        let content = fs.read(&path).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn test_local_fs_ensure_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let fs = local();

        fs.ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // idempotent
        fs.ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_local_fs_remove_dir_all_recursive() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("project");
        let fs = local();

        fs.ensure_dir(&root.join("pkg")).unwrap();
        fs.write(&root.join("pkg").join("file.py"), "").unwrap();

        fs.remove_dir_all(&root).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_local_fs_remove_dir_all_missing_is_ok() {
        let dir = tempdir().unwrap();
        let fs = local();
        assert!(fs.remove_dir_all(&dir.path().join("missing")).is_ok());
    }
}
