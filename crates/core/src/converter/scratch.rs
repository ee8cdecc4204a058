//! Per-conversion scratch directory.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::error::ConverterError;

/// A private directory for one conversion's temporary files.
///
/// Created on first use and removed, with everything in it, on drop.
#[derive(Debug)]
pub struct Scratch {
    parent: PathBuf,
    dir: Option<TempDir>,
}

impl Scratch {
    /// Creates a scratch handle whose directory will live under `parent`.
    pub fn new(parent: impl Into<PathBuf>) -> Self {
        Self {
            parent: parent.into(),
            dir: None,
        }
    }

    /// Path of the directory, if it has been created.
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    fn dir(&mut self) -> Result<PathBuf, ConverterError> {
        if let Some(dir) = &self.dir {
            return Ok(dir.path().to_path_buf());
        }
        let dir = tempfile::Builder::new()
            .prefix("docbatch-")
            .tempdir_in(&self.parent)
            .map_err(|source| ConverterError::ScratchFailed {
                what: "scratch directory",
                source,
            })?;
        let path = dir.path().to_path_buf();
        self.dir = Some(dir);
        Ok(path)
    }

    /// Writes `contents` to `name` inside the scratch directory.
    pub fn write(
        &mut self,
        what: &'static str,
        name: &str,
        contents: &[u8],
    ) -> Result<PathBuf, ConverterError> {
        let path = self.dir()?.join(name);
        std::fs::write(&path, contents)
            .map_err(|source| ConverterError::ScratchFailed { what, source })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_is_lazy_and_removed_on_drop() {
        let parent = tempfile::tempdir().unwrap();
        let mut scratch = Scratch::new(parent.path());
        assert!(scratch.path().is_none());

        let file = scratch.write("test file", "a.txt", b"hello").unwrap();
        let dir = scratch.path().unwrap().to_path_buf();
        assert!(dir.starts_with(parent.path()));
        assert!(dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("docbatch-"));
        assert_eq!(std::fs::read(&file).unwrap(), b"hello");

        drop(scratch);
        assert!(!dir.exists());
        assert!(!file.exists());
    }

    #[test]
    fn test_missing_parent_fails() {
        let mut scratch = Scratch::new("/nonexistent/docbatch-parent");
        let err = scratch.write("filter script", "f.lua", b"").unwrap_err();
        assert!(matches!(err, ConverterError::ScratchFailed { .. }));
    }
}
