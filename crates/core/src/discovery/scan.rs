//! Filesystem scan for source documents.

use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use super::types::{Discovery, DiscoveryFailure};
use crate::job::SourceItem;
use crate::paths::{absolutize, has_extension};

/// Extension of the documents picked up by [`discover`].
pub const SOURCE_EXTENSION: &str = "md";

const MISSING_INPUT_REASON: &str = "input does not exist or is not accessible";

/// Discovers Markdown documents among `inputs`, resolving relative inputs against `cwd`.
pub fn discover<S: AsRef<str>>(inputs: &[S], cwd: &Path) -> Discovery {
    discover_with_extension(inputs, cwd, SOURCE_EXTENSION)
}

/// Discovers documents with the given extension among `inputs`.
pub fn discover_with_extension<S: AsRef<str>>(
    inputs: &[S],
    cwd: &Path,
    extension: &str,
) -> Discovery {
    let mut discovery = Discovery::default();

    for raw in inputs {
        let input = raw.as_ref().trim();
        if input.is_empty() {
            continue;
        }
        let abs = absolutize(cwd, Path::new(input));

        let meta = match std::fs::metadata(&abs) {
            Ok(meta) => meta,
            Err(e) => {
                debug!("Input {:?} rejected: {}", abs, e);
                discovery.failures.push(DiscoveryFailure {
                    input: abs,
                    reason: MISSING_INPUT_REASON.to_string(),
                });
                continue;
            }
        };

        if meta.is_dir() {
            scan_dir(&abs, extension, &mut discovery);
        } else if has_extension(&abs, extension) {
            discovery.items.push(SourceItem::file(abs));
        } else {
            discovery
                .warnings
                .push(format!("ignored non-markdown file: {}", abs.display()));
        }
    }

    discovery.items.sort_by(|a, b| {
        a.source_path
            .cmp(&b.source_path)
            .then_with(|| a.rel_path.cmp(&b.rel_path))
    });
    discovery.warnings.sort();
    discovery.failures.sort_by(|a, b| a.input.cmp(&b.input));
    discovery
}

fn scan_dir(root: &Path, extension: &str, discovery: &mut Discovery) {
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                discovery
                    .warnings
                    .push(format!("skipped unreadable entry: {}", path));
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if !has_extension(path, extension) {
            discovery
                .warnings
                .push(format!("ignored non-markdown file: {}", path.display()));
            continue;
        }

        match path.strip_prefix(root) {
            Ok(rel) => discovery
                .items
                .push(SourceItem::scanned(path, root, rel)),
            Err(_) => discovery
                .warnings
                .push(format!("skipped unreadable entry: {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "# x").unwrap();
    }

    #[test]
    fn test_discover_directory_keeps_relative_paths() {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("docs");
        touch(&docs.join("b.md"));
        touch(&docs.join("nested/a.MD"));
        touch(&docs.join("image.png"));

        let found = discover(&["docs"], tmp.path());

        assert!(found.failures.is_empty());
        assert_eq!(found.items.len(), 2);
        assert_eq!(found.items[0].source_path, docs.join("b.md"));
        assert_eq!(found.items[0].rel_path.as_deref(), Some(Path::new("b.md")));
        assert_eq!(
            found.items[1].rel_path.as_deref(),
            Some(Path::new("nested/a.MD"))
        );
        assert!(found.items.iter().all(|i| i.from_dir));
        assert_eq!(found.warnings.len(), 1);
        assert!(found.warnings[0].contains("image.png"));
    }

    #[test]
    fn test_discover_missing_input_is_failure() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.md"));

        let found = discover(&["a.md", "missing.md", "  "], tmp.path());

        assert_eq!(found.items, vec![SourceItem::file(tmp.path().join("a.md"))]);
        assert_eq!(found.failures.len(), 1);
        assert_eq!(found.failures[0].input, tmp.path().join("missing.md"));
        assert_eq!(found.failures[0].reason, MISSING_INPUT_REASON);
    }

    #[test]
    fn test_discover_ignores_other_files() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("notes.txt"));

        let found = discover(&[tmp.path().join("notes.txt").display().to_string()], tmp.path());

        assert!(found.items.is_empty());
        assert!(found.failures.is_empty());
        assert_eq!(
            found.warnings,
            vec![format!(
                "ignored non-markdown file: {}",
                PathBuf::from(tmp.path()).join("notes.txt").display()
            )]
        );
    }

    #[test]
    fn test_discover_output_is_sorted() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("z.md"));
        touch(&tmp.path().join("a.md"));

        let found = discover(&["z.md", "a.md"], tmp.path());

        let names: Vec<_> = found
            .items
            .iter()
            .map(|i| i.source_path.file_name().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["a.md", "z.md"]);
    }
}
