//! End-to-end tests for the `docbatch` binary.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn docbatch(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docbatch"))
        .current_dir(cwd)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run docbatch")
}

#[test]
fn test_no_inputs_is_fatal() {
    let dir = TempDir::new().unwrap();
    let output = docbatch(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: at least one input file or directory is required"),
        "{}",
        stderr
    );
}

#[test]
fn test_missing_converter_emits_fatal_event() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.md"), "# a\n").unwrap();

    let output = docbatch(
        dir.path(),
        &["--format", "ndjson", "--pandoc-path", "./no-such-pandoc", "a.md"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let event: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(event["event"], "fatal_error");
    assert!(event["details"]["error"]
        .as_str()
        .unwrap()
        .contains("converter not found"));
    assert!(event["suggestion"].as_str().unwrap().contains("--pandoc-path"));
}

#[test]
fn test_invalid_config_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("docbatch.toml"),
        "[converter]\noutput_extension = \"docx\"\n",
    )
    .unwrap();

    let output = docbatch(dir.path(), &["--config", "docbatch.toml", "a.md"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid configuration"));
}

#[cfg(unix)]
#[test]
fn test_text_report_with_fake_pandoc() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.md"), "# a\n").unwrap();

    let script = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo 'pandoc 3.1.11'; exit 0; fi
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2; continue;;
  esac
  shift
done
printf 'docx' > "$out"
"#;
    let pandoc = dir.path().join("fake-pandoc");
    std::fs::write(&pandoc, script).unwrap();
    std::fs::set_permissions(&pandoc, std::fs::Permissions::from_mode(0o755)).unwrap();

    let output = docbatch(
        dir.path(),
        &[
            "--pandoc-path",
            pandoc.to_str().unwrap(),
            "-o",
            "out",
            "a.md",
            "missing.md",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "done: 1 succeeded, 1 failed, 0 warnings\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fail: "), "{}", stderr);
    assert!(stderr.contains("missing.md -> input does not exist"), "{}", stderr);

    let written: Vec<_> = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].extension().unwrap(), "docx");
}
