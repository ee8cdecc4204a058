//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`Converter`](crate::converter::Converter)
//! and filesystem fixtures, allowing batch runs to be tested without pandoc.
//!
//! # Example
//!
//! ```rust,ignore
//! use docbatch_core::testing::{fixtures, MockConverter};
//!
//! let dir = tempfile::tempdir()?;
//! fixtures::write_markdown(dir.path(), "docs/intro.md", "# Intro\n");
//!
//! let converter = MockConverter::new().writing_outputs();
//! let report = orchestrator::run(options, Some(Arc::new(converter))).await?;
//! ```

mod mock_converter;

pub use mock_converter::MockConverter;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    /// Writes `contents` to `root/rel`, creating parent directories.
    ///
    /// Panics on I/O errors; intended for test setup only.
    pub fn write_markdown(root: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        std::fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }

    /// Creates a small documentation tree under `root` and returns its
    /// directory: two Markdown files in nested folders plus one non-Markdown
    /// file.
    pub fn docs_tree(root: &Path) -> PathBuf {
        let docs = root.join("docs");
        write_markdown(&docs, "intro.md", "# Intro\n\nWelcome.\n");
        write_markdown(&docs, "guide/setup.MD", "# Setup\n\n**Install** first.\n");
        write_markdown(&docs, "assets/notes.txt", "not markdown\n");
        docs
    }
}
