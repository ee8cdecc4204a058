//! Lexical path helpers shared by discovery and planning.

use std::path::{Component, Path, PathBuf};

/// Resolves `path` against `cwd` and normalises it lexically.
///
/// `.` components are dropped and `..` pops the previous component. The
/// filesystem is never consulted, so symlinks are not resolved.
pub fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

/// Normalises a path lexically.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Whether `path` has the extension `ext` (leading dot optional), ignoring case.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    let wanted = ext.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

/// Replaces the extension of `path` with `ext`, appending it when there is none.
pub fn replace_extension(path: &Path, ext: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    out.set_extension(ext.trim_start_matches('.'));
    out
}
