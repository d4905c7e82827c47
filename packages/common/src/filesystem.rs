use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::CommonError;
use crate::result::CommonResult;

/// File system abstraction for persistence and testing
pub trait FileSystem {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8
    fn read_to_string(&self, path: &Path) -> CommonResult<String>;

    /// Write a whole file, creating parent directories as needed
    fn write(&mut self, path: &Path, contents: &str) -> CommonResult<()>;
}

/// Real file system implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> CommonResult<String> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CommonError::FileNotFound(path.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, path: &Path, contents: &str) -> CommonResult<()> {
        let write_error = |source: std::io::Error| CommonError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(write_error)?;
        }
        std::fs::write(path, contents).map_err(write_error)
    }
}

/// In-memory file system for testing
#[derive(Debug, Default, Clone)]
pub struct MockFileSystem {
    pub files: HashMap<PathBuf, String>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: PathBuf, contents: impl Into<String>) {
        self.files.insert(path, contents.into());
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> CommonResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| CommonError::FileNotFound(path.to_path_buf()))
    }

    fn write(&mut self, path: &Path, contents: &str) -> CommonResult<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_round_trip() {
        let mut fs = MockFileSystem::new();
        let path = PathBuf::from("/project/page.json");

        assert!(!fs.exists(&path));
        assert!(matches!(
            fs.read_to_string(&path),
            Err(CommonError::FileNotFound(p)) if p == path
        ));

        fs.write(&path, "[]").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_real_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("page.json");
        let mut fs = RealFileSystem;

        fs.write(&path, "{}").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "{}");

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            fs.read_to_string(&missing),
            Err(CommonError::FileNotFound(_))
        ));
    }
}
