//! # Shell Binary Tests
//!
//! Runs the `dbsh` binary non-interactively with `--command`. Covers:
//!
//! - `\i` executing a file's lines
//! - Include cycles reported as errors instead of recursing
//! - A lone backslash treated as a meta-command

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn dbsh(home: &Path, commands: &[String]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dbsh"));
    cmd.env("HOME", home)
        .env("DBSH_HISTORY", home.join("history"))
        .env_remove("DBSHRC")
        .env_remove("DBSHPASS")
        .arg("--no-rc");
    for c in commands {
        cmd.arg("--command").arg(c);
    }
    cmd.output().unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn include_runs_file_lines() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("greet.sql");
    fs::write(&script, "\\set who world\n\\echo hello :who\n").unwrap();

    let out = dbsh(dir.path(), &[format!("\\i {}", script.display())]);

    assert!(out.status.success());
    assert_eq!(text(&out.stdout), "hello world\n");
}

#[test]
fn self_include_is_an_error_not_a_crash() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("loop.sql");
    fs::write(
        &script,
        format!("\\echo once\n\\i {}\n\\echo after\n", script.display()),
    )
    .unwrap();

    let out = dbsh(
        dir.path(),
        &[format!("\\i {}", script.display()), "\\echo done".to_string()],
    );

    assert!(out.status.success());
    assert_eq!(text(&out.stdout), "once\nafter\ndone\n");
    let stderr = text(&out.stderr);
    assert_eq!(stderr.matches("already being included").count(), 1, "{stderr}");
}

#[test]
fn include_cycle_through_two_files_is_an_error() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.sql");
    let b = dir.path().join("b.sql");
    fs::write(&a, format!("\\i {}\n", b.display())).unwrap();
    fs::write(&b, format!("\\echo in b\n\\i {}\n", a.display())).unwrap();

    let out = dbsh(dir.path(), &[format!("\\i {}", a.display())]);

    assert!(out.status.success());
    assert_eq!(text(&out.stdout), "in b\n");
    assert!(text(&out.stderr).contains("already being included"));
}

#[test]
fn lone_backslash_is_an_invalid_command() {
    let dir = tempdir().unwrap();
    let out = dbsh(dir.path(), &["\\".to_string(), "\\p".to_string()]);

    assert!(out.status.success());
    assert!(text(&out.stderr).contains("invalid command"));
    assert_eq!(text(&out.stdout), "Query buffer is empty.\n");
}
