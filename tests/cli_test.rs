use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slideshot"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn write_html(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let html_path = dir.join(name);
    fs::write(&html_path, r#"<div class="slide">Hello</div>"#).expect("Failed to write HTML file");
    html_path
}

#[test]
fn test_missing_html_file_exits_with_one() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = temp_dir.path().join("missing.html");

    let output = run_command(&[html_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1), "Unexpected status: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr was: {}", stderr);
    assert!(stderr.contains("missing.html"), "stderr was: {}", stderr);
    assert!(!temp_dir.path().join("missing").exists(), "Output directory should not exist");
}

#[test]
fn test_missing_html_file_in_preview_mode() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = temp_dir.path().join("missing.html");

    let output = run_command(&[html_path.to_str().unwrap(), "--preview"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_size_is_a_usage_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = write_html(temp_dir.path(), "deck.html");

    for size in ["1500", "1500x", "wide", "0x100"] {
        let output = run_command(&[html_path.to_str().unwrap(), "--size", size]);

        assert!(!output.status.success(), "--size {} should fail", size);
        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("--size"), "stderr was: {}", stderr);
    }

    // Nothing was launched, so nothing was written
    assert!(!temp_dir.path().join("deck").exists());
}

#[test]
fn test_quality_out_of_range_is_a_usage_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = write_html(temp_dir.path(), "deck.html");

    for quality in ["0", "101", "high"] {
        let output = run_command(&[html_path.to_str().unwrap(), "--quality", quality]);
        assert_eq!(output.status.code(), Some(2), "--quality {} should fail", quality);
    }
}

#[test]
fn test_invalid_scale_and_stroke_are_usage_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = write_html(temp_dir.path(), "deck.html");
    let html = html_path.to_str().unwrap();

    assert_eq!(run_command(&[html, "--scale", "0"]).status.code(), Some(2));
    assert_eq!(run_command(&[html, "--scale=-1.5"]).status.code(), Some(2));
    assert_eq!(run_command(&[html, "--stroke=-1"]).status.code(), Some(2));
    assert_eq!(run_command(&[html, "--stroke", "thick"]).status.code(), Some(2));
}

#[test]
fn test_help_lists_examples() {
    let output = run_command(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--size"));
    assert!(stdout.contains("--preview"));
    assert!(stdout.contains("Examples:"));
    assert!(stdout.contains("1500x2000"));
}
