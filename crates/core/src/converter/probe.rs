//! Converter availability probe.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use super::error::ConverterError;

const DEFAULT_BINARY: &str = "pandoc";
const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

static VERSION_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").ok());

/// A converter binary that was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConverterInfo {
    /// Resolved path of the binary.
    pub binary_path: PathBuf,
    /// `major.minor.patch`, when `--version` could be parsed.
    pub version: Option<String>,
}

/// Extracts the first `major.minor[.patch]` token, padding the patch with 0.
pub fn extract_version(text: &str) -> Option<String> {
    let caps = VERSION_RE.as_ref()?.captures(text)?;
    let major = caps.get(1)?.as_str();
    let minor = caps.get(2)?.as_str();
    let patch = caps.get(3).map(|m| m.as_str()).unwrap_or("0");
    Some(format!("{}.{}.{}", major, minor, patch))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut out = vec![dir.join(name)];
    if cfg!(windows) && Path::new(name).extension().is_none() {
        out.push(dir.join(format!("{}.exe", name)));
    }
    out
}

/// Resolves the converter binary.
///
/// A blank name means `pandoc`. Names containing a path separator are used
/// as-is, anything else is looked up on `PATH`.
pub fn resolve_binary(name: &Path) -> Result<PathBuf, ConverterError> {
    let raw = name.to_string_lossy();
    let trimmed = raw.trim();
    let name = if trimmed.is_empty() {
        DEFAULT_BINARY
    } else {
        trimmed
    };

    let not_found = || ConverterError::NotFound {
        name: name.to_string(),
    };

    if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
        let path = PathBuf::from(name);
        return if is_executable(&path) {
            Ok(path)
        } else {
            Err(not_found())
        };
    }

    let path_var = std::env::var_os("PATH").ok_or_else(not_found)?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(not_found)
}

/// Checks that the converter can be found and reads its version.
///
/// A binary that cannot report its version is still accepted.
pub async fn probe_converter(name: &Path) -> Result<ConverterInfo, ConverterError> {
    let binary_path = resolve_binary(name)?;

    let output = tokio::time::timeout(
        VERSION_TIMEOUT,
        Command::new(&binary_path)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output(),
    )
    .await;

    let version = match output {
        Ok(Ok(output)) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let first_line = stdout.lines().next().unwrap_or_default();
            extract_version(first_line)
        }
        Ok(Err(e)) => {
            warn!("Failed to query {:?} --version: {}", binary_path, e);
            None
        }
        Err(_) => {
            warn!("Timed out querying {:?} --version", binary_path);
            None
        }
    };

    debug!("Converter {:?} version {:?}", binary_path, version);
    Ok(ConverterInfo {
        binary_path,
        version,
    })
}
