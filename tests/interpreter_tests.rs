//! Integration tests that drive the tsh binary over piped stdin.

use std::env;
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Path to the built tsh binary, next to this test executable.
fn tsh_bin() -> PathBuf {
    env::current_exe()
        .unwrap()
        .parent()
        .expect("executable's directory")
        .join("../tsh")
}

/// Spawns tsh in `dir` with `input` piped to stdin and collects its output.
///
/// HOME is pointed at `dir` so history and log files stay in the sandbox.
fn run_tsh(dir: &Path, input: &str) -> Output {
    let mut child = Command::new(tsh_bin())
        .current_dir(dir)
        .env("HOME", dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn tsh");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).unwrap();
}

#[test]
fn exit_builtin_terminates_with_success() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tsh(dir.path(), "exit\n");
    assert!(output.status.success());
}

#[test]
fn end_of_input_terminates_with_success() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tsh(dir.path(), "");
    assert!(output.status.success());
}

#[test]
fn unknown_commands_are_reported_and_do_not_end_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tsh(dir.path(), "definitely-not-a-command\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("command not found"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn builtin_usage_errors_do_not_end_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tsh(dir.path(), "exit now\nkillbg extra\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("exit: takes no arguments (1 given)"),
        "stderr was: {}",
        stderr
    );
    assert!(
        stderr.contains("killbg: takes no arguments (1 given)"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn killbg_without_a_job_reports_it() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tsh(dir.path(), "killbg\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no background job"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn runfg_runs_an_executable_from_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "writer.sh", "#!/bin/sh\necho from-writer > marker\n");
    let output = run_tsh(dir.path(), "runfg writer.sh\nexit\n");
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("marker")).unwrap(),
        "from-writer\n"
    );
}

#[test]
fn runfg_with_a_missing_executable_reports_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tsh(dir.path(), "runfg nope\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("./nope: file not found"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn external_commands_resolve_via_path() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tsh(dir.path(), "echo external-hello\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("external-hello"),
        "stdout was: {}",
        stdout
    );
}

#[test]
fn runsh_executes_lines_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "first", "#!/bin/sh\necho one >> log\n");
    write_script(dir.path(), "second", "#!/bin/sh\necho two >> log\n");
    fs::write(
        dir.path().join("script.sh"),
        "runfg first\n\nrunfg second\n",
    )
    .unwrap();

    let output = run_tsh(dir.path(), "runsh script.sh\nexit\n");
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("log")).unwrap(),
        "one\ntwo\n"
    );
}

#[test]
fn runsh_rejects_paths_without_the_script_suffix() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "runfg anything\n").unwrap();
    let output = run_tsh(dir.path(), "runsh notes.txt\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not a shell script"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn runbg_then_killbg_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "sleeper.sh", "#!/bin/sh\nexec sleep 30\n");
    let output = run_tsh(dir.path(), "runbg sleeper.sh\nkillbg\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("no background job"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn help_lists_the_builtin_table() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tsh(dir.path(), "help\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in &["cd", "exit", "help", "killbg", "runbg", "runfg", "runsh"] {
        assert!(stdout.contains(name), "missing {} in: {}", name, stdout);
    }
}
