//! End-to-end runs against a real C++ compiler.
//!
//! Every test returns early when `g++` is not on PATH.

mod common;

use std::ffi::OsStr;
use std::fs;
use std::process::Command;

use clap::Parser;
use common::*;
use exrun::cli::{Cli, ExitCode, execute};
use exrun::driver::interfaces::{ProcessExecutor, ProcessToolchain};
use exrun::{Driver, DriverError};

fn have_gxx() -> bool {
    Command::new("g++").arg("--version").output().is_ok_and(|o| o.status.success())
}

const ECHO_NUMBER: &str = r#"//>5
//<5
#include <iostream>
int main() {
    int n;
    std::cin >> n;
    std::cout << n << "\n";
    return 0;
}
"#;

#[test]
fn test_echo_program_matches_fixture() {
    if !have_gxx() {
        eprintln!("g++ not found, skipping");
        return;
    }
    let root = scratch_dir("gxx_echo");
    let config = config_in(&root);
    let src = write_source(&root, "echo.cpp", ECHO_NUMBER);
    let mut reporter = RecordingReporter::default();

    let summary = Driver::new(&config, &ProcessToolchain, &ProcessExecutor)
        .run_file(&src, &mut reporter)
        .unwrap();

    assert_eq!((summary.passed, summary.failed), (1, 0));
    assert!(config.artifact_path(&src).is_file());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_wrong_answer_is_reported_not_fatal() {
    if !have_gxx() {
        eprintln!("g++ not found, skipping");
        return;
    }
    let root = scratch_dir("gxx_wrong");
    let config = config_in(&root);
    let src = write_source(&root, "wrong.cpp", &ECHO_NUMBER.replacen("//<5", "//<6", 1));
    let mut reporter = RecordingReporter::default();

    let summary = Driver::new(&config, &ProcessToolchain, &ProcessExecutor)
        .run_file(&src, &mut reporter)
        .unwrap();
    assert_eq!((summary.passed, summary.failed), (0, 1));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_syntax_error_exits_with_one() {
    if !have_gxx() {
        eprintln!("g++ not found, skipping");
        return;
    }
    let root = scratch_dir("gxx_syntax");
    let src = write_source(&root, "broken.cpp", "//>1\n//<1\nint main( {\n");
    let build_dir = root.join("build");

    let cli = Cli::try_parse_from([
        OsStr::new("exrun"),
        OsStr::new("--build-dir"),
        build_dir.as_os_str(),
        src.as_os_str(),
    ])
    .unwrap();
    let err = execute(cli).unwrap_err();

    assert_eq!(err.exit_code, ExitCode::FAILURE);
    assert!(!config_in(&root).artifact_path(&src).exists(), "no artifact after a failed compile");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_runtime_failure_without_fixtures() {
    if !have_gxx() {
        eprintln!("g++ not found, skipping");
        return;
    }
    let root = scratch_dir("gxx_exit");
    let config = config_in(&root);
    let src = write_source(&root, "exit.cpp", "int main() { return 4; }\n");

    let err = Driver::new(&config, &ProcessToolchain, &ProcessExecutor)
        .run_file(&src, &mut RecordingReporter::default())
        .unwrap_err();
    assert!(matches!(err, DriverError::RuntimeNonZeroExit { code: Some(4), .. }));

    let _ = fs::remove_dir_all(&root);
}

#[cfg(unix)]
#[test]
fn test_large_fixture_input_does_not_stall_an_echoing_program() {
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use exrun::driver::interfaces::{ProgramCommand, ProgramExecutor};

    // Far more than a pipe buffer in both directions
    let input = "0123456789abcdef\n".repeat(65536);
    let expected_len = input.len();

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(ProcessExecutor.run_piped(&ProgramCommand::new("cat"), &input));
    });

    let result = rx
        .recv_timeout(Duration::from_secs(30))
        .expect("cat should finish echoing 1 MiB of input")
        .unwrap();
    assert!(result.success);
    assert_eq!(result.stdout.len(), expected_len);
}
