//! Shared fakes for driver tests: a scripted toolchain, a scripted executor and a recording reporter.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use exrun::RunnerConfig;
use exrun::driver::interfaces::{BuildResult, ProgramCommand, ProgramExecutor, RunResult, Toolchain};
use exrun::driver::report::RunReporter;
use exrun::driver::{BatchSummary, DriverError, FixtureOutcome, RunSummary};

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("exrun_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Config writing artifacts inside `root`.
pub fn config_in(root: &Path) -> RunnerConfig {
    RunnerConfig::new()
        .with_build_dir(root.join("build"))
        .with_include_dir(root.join("include"))
        .with_exe_suffix(".out")
}

pub fn write_source(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Toolchain that records commands and succeeds unless told otherwise.
#[derive(Default)]
pub struct FakeToolchain {
    pub fail: bool,
    pub commands: RefCell<Vec<ProgramCommand>>,
}

impl Toolchain for FakeToolchain {
    fn compile(&self, command: &ProgramCommand) -> Result<BuildResult, DriverError> {
        self.commands.borrow_mut().push(command.clone());
        Ok(BuildResult {
            success: !self.fail,
            exit_code: Some(if self.fail { 1 } else { 0 }),
        })
    }
}

/// Executor whose program behavior is a function of its stdin.
pub struct FakeExecutor<F: Fn(&str) -> (i32, String)> {
    pub program: F,
    pub inherited_exit: i32,
    pub piped_inputs: RefCell<Vec<String>>,
    pub inherited_runs: RefCell<Vec<ProgramCommand>>,
}

impl<F: Fn(&str) -> (i32, String)> FakeExecutor<F> {
    pub fn new(program: F) -> Self {
        Self {
            program,
            inherited_exit: 0,
            piped_inputs: RefCell::new(Vec::new()),
            inherited_runs: RefCell::new(Vec::new()),
        }
    }

    pub fn with_inherited_exit(mut self, code: i32) -> Self {
        self.inherited_exit = code;
        self
    }
}

impl<F: Fn(&str) -> (i32, String)> ProgramExecutor for FakeExecutor<F> {
    fn run_inherited(&self, command: &ProgramCommand) -> Result<RunResult, DriverError> {
        self.inherited_runs.borrow_mut().push(command.clone());
        Ok(RunResult {
            success: self.inherited_exit == 0,
            exit_code: Some(self.inherited_exit),
            stdout: String::new(),
        })
    }

    fn run_piped(&self, _command: &ProgramCommand, input: &str) -> Result<RunResult, DriverError> {
        self.piped_inputs.borrow_mut().push(input.to_string());
        let (code, stdout) = (self.program)(input);
        Ok(RunResult {
            success: code == 0,
            exit_code: Some(code),
            stdout,
        })
    }
}

/// Program that prints its input back.
pub fn echo(input: &str) -> (i32, String) {
    (0, input.to_string())
}

/// Reporter that keeps every event as a line of text.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
    pub outcomes: Vec<FixtureOutcome>,
}

impl RunReporter for RecordingReporter {
    fn on_file_start(&mut self, index: usize, total: usize, path: &Path) {
        let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        self.events.push(format!("file {}/{} {}", index, total, name));
    }

    fn on_compile_start(&mut self, _command: &ProgramCommand) {
        self.events.push("compile".to_string());
    }

    fn on_compile_success(&mut self, _artifact: &Path) {
        self.events.push("compiled".to_string());
    }

    fn on_run_finished(&mut self, _path: &Path) {
        self.events.push("finished".to_string());
    }

    fn on_fixture_complete(&mut self, outcome: &FixtureOutcome) {
        let event = match outcome {
            FixtureOutcome::Passed { index } => format!("pass {}", index),
            FixtureOutcome::Failed { index, .. } => format!("fail {}", index),
        };
        self.events.push(event);
        self.outcomes.push(outcome.clone());
    }

    fn on_file_complete(&mut self, summary: &RunSummary) {
        self.events.push(format!("done {}/{}", summary.passed, summary.fixture_count()));
    }

    fn on_batch_complete(&mut self, summary: &BatchSummary) {
        self.events.push(format!("batch {}", summary.files));
    }
}
