use dupescan::cli::OutputFormat;
use dupescan::config::Config;
use dupescan::error::ExitCode;
use dupescan::run_scan;
use dupescan::signal::ShutdownHandler;
use filetime::FileTime;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, content: &[u8], mtime_secs: i64) {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    filetime::set_file_mtime(&path, FileTime::from_unix_time(mtime_secs, 0)).unwrap();
}

fn scan(dir: &Path, config: &Config, handler: &ShutdownHandler) -> (ExitCode, String) {
    let mut out = Vec::new();
    let code = run_scan(dir, config, handler, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_text_report() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "first", b"dup", 1_000);
    write_file(dir.path(), "second", b"dup", 2_000);

    let (code, text) = scan(dir.path(), &Config::default(), &ShutdownHandler::new());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(code, ExitCode::Success);
    assert!(lines[0].starts_with("Working directory is '"));
    assert_eq!(
        lines[1],
        format!("Searching for duplicates in '{}'", dir.path().display())
    );
    assert_eq!(lines[2], "Duplicates:");
    assert_eq!(lines[3], format!("   {}", dir.path().join("second").display()));
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_text_report_without_duplicates() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "only", b"alone", 1_000);

    let (code, text) = scan(dir.path(), &Config::default(), &ShutdownHandler::new());

    assert_eq!(code, ExitCode::Success);
    assert_eq!(text.lines().count(), 2);
    assert!(!text.contains("Duplicates:"));
    assert!(!text.contains("Errors:"));
}

#[test]
fn test_missing_root_reports_error_and_succeeds() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("gone");

    let (code, text) = scan(&missing, &Config::default(), &ShutdownHandler::new());

    assert_eq!(code, ExitCode::Success);
    assert!(text.contains("Errors:\n"));
    assert!(text.contains(&format!("  NotFound: '{}'", missing.display())));
}

#[test]
fn test_json_report() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    write_file(dir.path(), "a", b"0123456789", 1_000);
    write_file(&sub, "b", b"0123456789", 2_000);

    let config = Config {
        recursive: true,
        output: OutputFormat::Json,
        ..Default::default()
    };
    let (code, text) = scan(dir.path(), &config, &ShutdownHandler::new());
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(value["root"], &*dir.path().to_string_lossy());
    assert_eq!(value["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(
        value["duplicates"][0]["path"],
        &*sub.join("b").to_string_lossy()
    );
    assert_eq!(value["summary"]["files_scanned"], 2);
    assert_eq!(value["summary"]["duplicate_groups"], 1);
    assert_eq!(value["summary"]["reclaimable_space"], 10);
    assert_eq!(value["summary"]["interrupted"], false);
}

#[test]
fn test_interrupted_scan_exits_130() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a", b"x", 1_000);
    write_file(dir.path(), "b", b"x", 2_000);

    let handler = ShutdownHandler::new();
    handler.request_shutdown();
    let (code, text) = scan(dir.path(), &Config::default(), &handler);

    assert_eq!(code, ExitCode::Interrupted);
    assert_eq!(code.as_i32(), 130);
    assert!(!text.contains("Duplicates:"));
}
