//! Binary tests: run the `dirpipe` executable and inspect stdout / exit status.

use std::path::Path;
use std::process::{Command, Stdio};

fn run_bin(args: &[&str]) -> (bool, Vec<String>, String) {
    run_bin_in(&std::env::temp_dir(), args)
}

fn run_bin_in(dir: &Path, args: &[&str]) -> (bool, Vec<String>, String) {
    let out = Command::new(env!("CARGO_BIN_EXE_dirpipe"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn dirpipe");
    let stdout = String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    (out.status.success(), stdout, stderr)
}

fn count_prefix(lines: &[String], prefix: &str) -> usize {
    lines.iter().filter(|l| l.starts_with(prefix)).count()
}

#[test]
fn test_no_args_runs_builtin_list() {
    let (ok, lines, _) = run_bin(&[]);
    assert!(ok);
    assert_eq!(count_prefix(&lines, "Sending: "), 3);
    assert_eq!(count_prefix(&lines, "Received: "), 3);
    assert!(lines.contains(&"Received: /home/x/Downloads".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some("All done!"));
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_paths_and_flags() {
    let (ok, lines, _) = run_bin(&["/tmp", "/a", "/b", "--wiring", "callee-signals", "-c", "0"]);
    assert!(ok);
    for p in ["/tmp", "/a", "/b"] {
        assert!(lines.contains(&format!("Sending: {p}")));
        assert!(lines.contains(&format!("Received: {p}")));
    }
    assert_eq!(lines.last().map(String::as_str), Some("All done!"));
}

#[test]
fn test_summary_goes_to_stderr() {
    let (ok, lines, stderr) = run_bin(&["/only", "--summary", "-w", "2"]);
    assert!(ok);
    assert_eq!(lines.last().map(String::as_str), Some("All done!"));
    assert!(stderr.contains("\"received\": 1"));
}

#[test]
fn test_bad_flag_fails() {
    let (ok, lines, _) = run_bin(&["--wiring", "sideways"]);
    assert!(!ok);
    assert!(lines.is_empty());
}

#[test]
fn test_invalid_config_is_warned_and_skipped() {
    let dir = std::env::temp_dir().join(format!("dirpipe_cli_bad_config_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(".dirpipe.toml"), "[settings]\nwiring = \"sideways\"\n").unwrap();

    let (ok, lines, stderr) = run_bin_in(&dir, &["/cfg"]);
    std::fs::remove_dir_all(&dir).unwrap();

    assert!(ok);
    assert!(stderr.contains(".dirpipe.toml"), "stderr: {stderr}");
    assert!(lines.contains(&"Received: /cfg".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some("All done!"));
}

#[test]
fn test_valid_config_paths_are_used() {
    let dir = std::env::temp_dir().join(format!("dirpipe_cli_good_config_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join(".dirpipe.toml"),
        "[settings]\npaths = [\"/from-file\"]\ncapacity = 1\n",
    )
    .unwrap();

    let (ok, lines, _) = run_bin_in(&dir, &[]);
    std::fs::remove_dir_all(&dir).unwrap();

    assert!(ok);
    assert_eq!(
        lines,
        vec![
            "Sending: /from-file".to_string(),
            "Received: /from-file".to_string(),
            "All done!".to_string()
        ]
    );
}

#[test]
fn test_closed_stdout_exits_cleanly() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dirpipe"))
        .args(["/a", "/b", "/c", "/d", "/e"])
        .current_dir(std::env::temp_dir())
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn dirpipe");
    drop(child.stdout.take());
    let out = child.wait_with_output().expect("wait dirpipe");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"));
}
