//! Configuration for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the pandoc-based converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Path or name of the pandoc binary.
    #[serde(default = "default_pandoc_path")]
    pub pandoc_path: PathBuf,

    /// Reference docx passed to pandoc. The built-in template is used when unset.
    #[serde(default)]
    pub reference_doc: Option<PathBuf>,

    /// Pandoc reader (`-f`).
    #[serde(default = "default_input_format")]
    pub input_format: String,

    /// Pandoc writer (`-t`).
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Extension given to planned targets.
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Wrap bold text in the `KeywordHighlight` character style.
    #[serde(default = "default_highlight")]
    pub highlight_keywords: bool,

    /// Parent directory for per-conversion scratch directories.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// Mirror pandoc's standard output to the console.
    #[serde(default)]
    pub verbose: bool,
}

fn default_pandoc_path() -> PathBuf {
    PathBuf::from("pandoc")
}

fn default_input_format() -> String {
    "gfm+raw_attribute+hard_line_breaks".to_string()
}

fn default_output_format() -> String {
    "docx".to_string()
}

fn default_output_extension() -> String {
    ".docx".to_string()
}

fn default_highlight() -> bool {
    true
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            pandoc_path: default_pandoc_path(),
            reference_doc: None,
            input_format: default_input_format(),
            output_format: default_output_format(),
            output_extension: default_output_extension(),
            highlight_keywords: default_highlight(),
            temp_dir: default_temp_dir(),
            verbose: false,
        }
    }
}

impl ConverterConfig {
    /// Creates a config using the given pandoc binary.
    pub fn with_pandoc_path(pandoc_path: impl Into<PathBuf>) -> Self {
        Self {
            pandoc_path: pandoc_path.into(),
            ..Default::default()
        }
    }

    /// Sets the reference docx.
    pub fn with_reference_doc(mut self, reference_doc: impl Into<PathBuf>) -> Self {
        self.reference_doc = Some(reference_doc.into());
        self
    }

    /// Sets the scratch parent directory.
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    /// Enables or disables keyword highlighting.
    pub fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight_keywords = enabled;
        self
    }

    /// Enables or disables stdout mirroring.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.pandoc_path, PathBuf::from("pandoc"));
        assert_eq!(config.input_format, "gfm+raw_attribute+hard_line_breaks");
        assert_eq!(config.output_format, "docx");
        assert_eq!(config.output_extension, ".docx");
        assert!(config.highlight_keywords);
        assert!(config.reference_doc.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_config_builder() {
        let config = ConverterConfig::with_pandoc_path("/opt/pandoc/bin/pandoc")
            .with_reference_doc("/styles/ref.docx")
            .with_temp_dir("/tmp/docbatch")
            .with_highlight(false)
            .with_verbose(true);

        assert_eq!(config.pandoc_path, PathBuf::from("/opt/pandoc/bin/pandoc"));
        assert_eq!(config.reference_doc, Some(PathBuf::from("/styles/ref.docx")));
        assert_eq!(config.temp_dir, PathBuf::from("/tmp/docbatch"));
        assert!(!config.highlight_keywords);
        assert!(config.verbose);
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: ConverterConfig = toml::from_str(r#"pandoc_path = "pandoc-3""#).unwrap();
        assert_eq!(config.pandoc_path, PathBuf::from("pandoc-3"));
        assert_eq!(config.output_extension, ".docx");
        assert!(config.highlight_keywords);
    }
}
