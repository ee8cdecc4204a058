//! Run report output: plain text or NDJSON events.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, Write};

use docbatch_core::RunReport;

/// One NDJSON line.
#[derive(Debug, Serialize)]
pub struct Event {
    pub timestamp: String,
    pub level: &'static str,
    pub event: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Event {
    pub fn new(level: &'static str, event: &'static str, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
            level,
            event,
            message: message.into(),
            details: None,
            suggestion: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

fn emit<W: Write>(out: &mut W, event: &Event) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")
}

/// Prints `warn:`/`fail:` lines to `err` and the summary line to `out`.
pub fn write_text<O: Write, E: Write>(report: &RunReport, out: &mut O, err: &mut E) -> io::Result<()> {
    for warning in &report.warnings {
        writeln!(err, "warn: {}", warning)?;
    }
    for failure in &report.failures {
        writeln!(err, "fail: {} -> {}", failure.source.display(), failure.reason)?;
    }
    writeln!(
        out,
        "done: {} succeeded, {} failed, {} warnings",
        report.success_count, report.failure_count, report.warning_count
    )
}

/// Emits the whole report as NDJSON events.
pub fn write_ndjson<W: Write>(report: &RunReport, out: &mut W) -> io::Result<()> {
    if let Some(path) = &report.converter_path {
        let version = report.converter_version.as_deref().unwrap_or("unknown");
        emit(
            out,
            &Event::new("info", "converter_ready", format!("using pandoc {}", version))
                .with_details(json!({
                    "path": path,
                    "version": report.converter_version,
                })),
        )?;
    }

    for warning in &report.warnings {
        emit(out, &Event::new("warn", "warning", warning.as_str()))?;
    }

    for failure in &report.failures {
        emit(
            out,
            &Event::new("error", "failure", "conversion failed")
                .with_details(json!({
                    "source": failure.source,
                    "reason": failure.reason,
                }))
                .with_suggestion(suggestion_for_failure(&failure.reason)),
        )?;
    }

    for path in &report.output_paths {
        emit(
            out,
            &Event::new("info", "output", "document written")
                .with_details(json!({ "path": path })),
        )?;
    }

    let level = if report.is_success() { "info" } else { "error" };
    emit(
        out,
        &Event::new(level, "summary", "run finished").with_details(json!({
            "success_count": report.success_count,
            "failure_count": report.failure_count,
            "warning_count": report.warning_count,
            "started_at": report.started_at,
            "duration_ms": report.duration_ms,
        })),
    )
}

/// Emits a `fatal_error` event for an error that stopped the run.
pub fn write_fatal<W: Write>(error: &str, out: &mut W) -> io::Result<()> {
    emit(
        out,
        &Event::new("error", "fatal_error", "run aborted")
            .with_details(json!({ "error": error }))
            .with_suggestion(suggestion_for_fatal(error)),
    )
}

/// Remediation hint for one failed input or document.
pub fn suggestion_for_failure(reason: &str) -> &'static str {
    let lower = reason.to_lowercase();
    if lower.contains("does not exist") {
        "check that the input path exists and is readable; try an absolute path"
    } else if lower.contains("failed to create output directory") {
        "check the output directory permissions or choose a writable location"
    } else if lower.contains("conversion failed") {
        if lower.contains("could not fetch resource") || lower.contains("image not found") {
            "add the local resources the Markdown references, or fix their paths, then retry"
        } else {
            "run the pandoc command by hand to locate the syntax or resource problem"
        }
    } else {
        "check the error details and the input file; confirm paths, permissions and dependencies"
    }
}

/// Remediation hint for an error that stopped the whole run.
pub fn suggestion_for_fatal(error: &str) -> String {
    let lower = error.to_lowercase();
    if lower.contains("at least one input") {
        "pass at least one .md file or directory, e.g. docbatch /abs/path/a.md /abs/path/docs"
            .to_string()
    } else if lower.contains("converter not found") {
        install_hint(std::env::consts::OS).to_string()
    } else if lower.contains("permission denied") {
        "check permissions: inputs must be readable and the output directory writable".to_string()
    } else {
        "work through the error details; start with paths, dependencies and permissions".to_string()
    }
}

fn install_hint(os: &str) -> &'static str {
    match os {
        "macos" => "run `brew install pandoc`; if it is installed but not on PATH, use --pandoc-path",
        "windows" => {
            "run `scoop install pandoc` (or `choco install pandoc`); if PATH is stale, use --pandoc-path"
        }
        _ => "run `sudo apt-get install pandoc` (or your package manager); or use --pandoc-path",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use docbatch_core::RunFailure;
    use std::path::PathBuf;

    fn report() -> RunReport {
        RunReport {
            success_count: 1,
            failure_count: 1,
            warning_count: 1,
            results: vec![],
            output_paths: vec![PathBuf::from("/out/a_Ab12Cd.docx")],
            converter_path: Some(PathBuf::from("/usr/bin/pandoc")),
            converter_version: Some("3.1.11".to_string()),
            failures: vec![RunFailure {
                source: PathBuf::from("/in/b.md"),
                reason: "conversion failed: [WARNING] Could not fetch resource x.png".to_string(),
            }],
            warnings: vec!["ignored non-markdown file: /in/x.txt".to_string()],
            started_at: Utc::now(),
            duration_ms: 12,
        }
    }

    #[test]
    fn test_text_report() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        write_text(&report(), &mut out, &mut err).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "done: 1 succeeded, 1 failed, 1 warnings\n"
        );
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "warn: ignored non-markdown file: /in/x.txt\n\
             fail: /in/b.md -> conversion failed: [WARNING] Could not fetch resource x.png\n"
        );
    }

    #[test]
    fn test_ndjson_report() {
        let mut out = Vec::new();
        write_ndjson(&report(), &mut out).unwrap();

        let events: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let names: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            vec!["converter_ready", "warning", "failure", "output", "summary"]
        );

        assert_eq!(events[0]["details"]["version"], "3.1.11");
        assert!(events[1].get("details").is_none());
        assert!(events[1].get("suggestion").is_none());
        assert!(events[2]["suggestion"]
            .as_str()
            .unwrap()
            .contains("local resources"));
        assert_eq!(events[4]["level"], "error");
        assert_eq!(events[4]["details"]["failure_count"], 1);
        for event in &events {
            let ts = event["timestamp"].as_str().unwrap();
            assert!(DateTime::parse_from_rfc3339(ts).is_ok(), "{}", ts);
        }
    }

    #[test]
    fn test_fatal_event() {
        let mut out = Vec::new();
        write_fatal("at least one input file or directory is required", &mut out).unwrap();
        let event: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(event["event"], "fatal_error");
        assert_eq!(event["level"], "error");
        assert!(event["suggestion"].as_str().unwrap().contains("docbatch"));
    }

    #[test]
    fn test_failure_suggestions() {
        assert!(suggestion_for_failure("input does not exist or is not accessible")
            .contains("input path exists"));
        assert!(suggestion_for_failure("failed to create output directory /x: denied")
            .contains("permissions"));
        assert!(suggestion_for_failure("conversion failed: image not found").contains("resources"));
        assert!(suggestion_for_failure("conversion failed: parse error").contains("by hand"));
        assert!(suggestion_for_failure("conversion cancelled").contains("error details"));
    }

    #[test]
    fn test_fatal_suggestions() {
        assert!(suggestion_for_fatal("converter not found: pandoc").contains("--pandoc-path"));
        assert!(suggestion_for_fatal("open /x: Permission denied").contains("permissions"));
        assert!(install_hint("macos").contains("brew"));
        assert!(install_hint("windows").contains("scoop"));
        assert!(install_hint("linux").contains("apt-get"));
    }
}
