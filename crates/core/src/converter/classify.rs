//! Classification of converter diagnostics.

use super::command::CommandOutput;
use super::error::ConverterError;

/// Lower-case phrases pandoc uses when a referenced asset cannot be loaded.
pub const MISSING_RESOURCE_PATTERNS: &[&str] = &[
    "could not fetch resource",
    "resource not found",
    "could not find image",
    "cannot find image",
    "image not found",
];

/// Warning attached when a failed run still produced its output.
pub const MISSING_RESOURCES_TOLERATED: &str =
    "missing resources were skipped; output was still produced";

/// Whether `line` reports an unreachable asset.
pub fn looks_like_missing_resource(line: &str) -> bool {
    let lower = line.to_lowercase();
    MISSING_RESOURCE_PATTERNS.iter().any(|p| lower.contains(p))
}

fn looks_like_warning(line: &str) -> bool {
    line.to_lowercase().contains("warning")
}

/// Extracts the non-fatal diagnostic lines from `stderr`, trimmed, in order.
pub fn collect_warnings(stderr: &str) -> Vec<String> {
    stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| looks_like_warning(line) || looks_like_missing_resource(line))
        .map(str::to_string)
        .collect()
}

/// Whether `stderr` reports nothing but missing resources.
///
/// Every non-blank line must be a missing-resource or warning line, and at
/// least one must be a missing-resource line.
pub fn is_missing_resource_only(stderr: &str) -> bool {
    let mut saw_missing = false;
    for line in stderr.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if looks_like_missing_resource(line) {
            saw_missing = true;
        } else if !looks_like_warning(line) {
            return false;
        }
    }
    saw_missing
}

/// Classified converter outcome.
#[derive(Debug)]
pub struct Outcome {
    pub warnings: Vec<String>,
    pub error: Option<ConverterError>,
}

/// Classifies a finished converter process.
///
/// `target_exists` reports whether the output file is present after the
/// process exited.
pub fn classify(output: &CommandOutput, target_exists: bool) -> Outcome {
    let stderr = output.stderr.trim();
    let mut warnings = collect_warnings(stderr);

    if output.success {
        return Outcome {
            warnings,
            error: None,
        };
    }

    if is_missing_resource_only(stderr) && target_exists {
        warnings.push(MISSING_RESOURCES_TOLERATED.to_string());
        return Outcome {
            warnings,
            error: None,
        };
    }

    let reason = if stderr.is_empty() {
        output.status_text.clone()
    } else {
        stderr.to_string()
    };
    Outcome {
        warnings,
        error: Some(ConverterError::conversion_failed(reason)),
    }
}
