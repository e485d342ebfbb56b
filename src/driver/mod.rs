//! Build/run driver
//!
//! Takes one exercise file through its whole life:
//! 1. Classify the file by extension
//! 2. Interpret it directly (`.py`), or compile it into the build directory (`.c`, `.cpp`)
//! 3. Run the artifact once, or once per inline fixture, comparing output
//!
//! ## Errors
//!
//! Compile failures and non-zero exits of the program under test are fatal for the file and come back as
//! `DriverError`. A fixture whose output differs is not an error: it is reported as a failed test case and the
//! next fixture still runs.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod batch;
pub mod interfaces;
pub mod report;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use exrun_core::{ExecStrategy, Mismatch, SourceKind, extract_fixtures, first_mismatch};
use thiserror::Error;

use crate::config::RunnerConfig;
use interfaces::{ProcessExecutor, ProcessToolchain, ProgramCommand, ProgramExecutor, Toolchain};
use report::RunReporter;

pub use batch::run_all;

/// Maximum source file size (16 MB)
///
/// Exercise files are small. Anything bigger is almost certainly not a source file.
pub const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Errors that stop the run of a file
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("unsupported file '{}': only .c, .cpp and .py files can be run", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("compile error in '{}' ({})", path.display(), describe_exit(*code))]
    CompileFailure { path: PathBuf, code: Option<i32> },

    #[error("'{}' failed with {}", path.display(), describe_exit(*code))]
    RuntimeNonZeroExit { path: PathBuf, code: Option<i32> },

    #[error("source file '{}' is too large ({size} bytes, max {max} bytes)", path.display())]
    SourceTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("failed to run '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Outcome of a single fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureOutcome {
    Passed {
        index: usize,
    },
    Failed {
        index: usize,
        /// Expected output, trimmed
        expected: String,
        /// Actual output, trimmed
        actual: String,
        mismatch: Mismatch,
    },
}

impl FixtureOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, FixtureOutcome::Passed { .. })
    }
}

/// Result of running one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    fn new(path: &Path, kind: SourceKind) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            passed: 0,
            failed: 0,
        }
    }

    /// Number of fixtures that ran (zero when the file had none).
    pub fn fixture_count(&self) -> usize {
        self.passed + self.failed
    }

    fn record(&mut self, outcome: &FixtureOutcome) {
        if outcome.is_passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Aggregate of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(path: &Path) -> Result<String, DriverError> {
    let size = fs::metadata(path)?.len();
    if size > MAX_SOURCE_SIZE {
        return Err(DriverError::SourceTooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_SOURCE_SIZE,
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Path relative to the working directory when it lies inside it, otherwise unchanged.
fn relative_to_cwd(path: &Path) -> PathBuf {
    if path.is_absolute() {
        if let Ok(cwd) = std::env::current_dir() {
            if let Ok(rel) = path.strip_prefix(&cwd) {
                return rel.to_path_buf();
            }
        }
    }
    path.to_path_buf()
}

/// Drives single files through the toolchain seams.
pub struct Driver<'a> {
    config: &'a RunnerConfig,
    toolchain: &'a dyn Toolchain,
    executor: &'a dyn ProgramExecutor,
}

impl<'a> Driver<'a> {
    pub fn new(config: &'a RunnerConfig, toolchain: &'a dyn Toolchain, executor: &'a dyn ProgramExecutor) -> Self {
        Self {
            config,
            toolchain,
            executor,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        self.config
    }

    /// Run one file: interpret it, or compile it and check its fixtures.
    pub fn run_file(&self, path: &Path, reporter: &mut dyn RunReporter) -> Result<RunSummary, DriverError> {
        let kind = SourceKind::from_path(path).ok_or_else(|| DriverError::UnsupportedExtension(path.to_path_buf()))?;

        match kind.strategy() {
            ExecStrategy::Interpret => self.interpret(path, kind),
            ExecStrategy::CompileThenRun => {
                let artifact = self.compile(path, reporter)?;
                self.run_artifact(path, kind, &artifact, reporter)
            }
        }
    }

    fn interpret(&self, path: &Path, kind: SourceKind) -> Result<RunSummary, DriverError> {
        let command = ProgramCommand::new(self.config.interpreter.clone()).arg(path);
        let result = self.executor.run_inherited(&command)?;
        if !result.success {
            return Err(DriverError::RuntimeNonZeroExit {
                path: path.to_path_buf(),
                code: result.exit_code,
            });
        }
        Ok(RunSummary::new(path, kind))
    }

    /// Compile `path` into its artifact and return the artifact path.
    fn compile(&self, path: &Path, reporter: &mut dyn RunReporter) -> Result<PathBuf, DriverError> {
        let artifact = self.config.artifact_path(&relative_to_cwd(path));
        if let Some(parent) = artifact.parent() {
            fs::create_dir_all(parent)?;
        }
        let include_dir = std::path::absolute(&self.config.include_dir)?;

        let command = ProgramCommand::compile(self.config, path, &artifact, &include_dir);
        reporter.on_compile_start(&command);

        let result = self.toolchain.compile(&command)?;
        if !result.success {
            return Err(DriverError::CompileFailure {
                path: path.to_path_buf(),
                code: result.exit_code,
            });
        }

        tracing::debug!(artifact = %artifact.display(), "compiled");
        reporter.on_compile_success(&artifact);
        Ok(artifact)
    }

    fn run_artifact(
        &self,
        path: &Path,
        kind: SourceKind,
        artifact: &Path,
        reporter: &mut dyn RunReporter,
    ) -> Result<RunSummary, DriverError> {
        let source = read_source(path)?;
        let command = ProgramCommand::new(artifact.to_string_lossy());
        let mut summary = RunSummary::new(path, kind);

        let mut fixtures = extract_fixtures(&source).peekable();
        if fixtures.peek().is_none() {
            // No fixtures: the program checks itself (asserts) or just prints
            let result = self.executor.run_inherited(&command)?;
            if !result.success {
                return Err(DriverError::RuntimeNonZeroExit {
                    path: path.to_path_buf(),
                    code: result.exit_code,
                });
            }
            reporter.on_run_finished(path);
            return Ok(summary);
        }

        for (i, fixture) in fixtures.enumerate() {
            let result = self.executor.run_piped(&command, &fixture.input)?;
            if !result.success {
                return Err(DriverError::RuntimeNonZeroExit {
                    path: path.to_path_buf(),
                    code: result.exit_code,
                });
            }

            let outcome = match first_mismatch(&result.stdout, &fixture.expected) {
                None => FixtureOutcome::Passed { index: i + 1 },
                Some(mismatch) => FixtureOutcome::Failed {
                    index: i + 1,
                    expected: fixture.expected.trim().to_string(),
                    actual: result.stdout.trim().to_string(),
                    mismatch,
                },
            };
            reporter.on_fixture_complete(&outcome);
            summary.record(&outcome);
        }

        reporter.on_file_complete(&summary);
        Ok(summary)
    }
}

/// Run one file with the process-backed toolchain.
pub fn run_file(path: &Path, config: &RunnerConfig, reporter: &mut dyn RunReporter) -> Result<RunSummary, DriverError> {
    Driver::new(config, &ProcessToolchain, &ProcessExecutor).run_file(path, reporter)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_exit() {
        assert_eq!(describe_exit(Some(3)), "exit code 3");
        assert!(describe_exit(None).contains("signal"));
    }

    #[test]
    fn test_error_messages() {
        let err = DriverError::UnsupportedExtension(PathBuf::from("notes.md"));
        assert_eq!(
            err.to_string(),
            "unsupported file 'notes.md': only .c, .cpp and .py files can be run"
        );

        let err = DriverError::CompileFailure {
            path: PathBuf::from("src/a.cpp"),
            code: Some(1),
        };
        assert_eq!(err.to_string(), "compile error in 'src/a.cpp' (exit code 1)");
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::new(Path::new("a.cpp"), SourceKind::Cpp);
        summary.record(&FixtureOutcome::Passed { index: 1 });
        summary.record(&FixtureOutcome::Failed {
            index: 2,
            expected: "1".into(),
            actual: "2".into(),
            mismatch: Mismatch::Line {
                line: 1,
                actual: "2".into(),
                expected: "1".into(),
            },
        });
        assert_eq!(summary.fixture_count(), 2);
        assert_eq!((summary.passed, summary.failed), (1, 1));
    }

    #[test]
    fn test_relative_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(relative_to_cwd(&cwd.join("src").join("a.c")), Path::new("src").join("a.c"));
        assert_eq!(relative_to_cwd(Path::new("test/b.c")), Path::new("test/b.c"));
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("definitely/not/here.cpp")).unwrap_err();
        assert!(matches!(err, DriverError::Io(_)));
    }
}
