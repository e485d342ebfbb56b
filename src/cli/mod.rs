//! CLI module for exrun
//!
//! ## Usage
//!
//! - `exrun <file>` - (compile and) run one `.c`/`.cpp`/`.py` file, checking its inline fixtures
//! - `exrun --all` - run every recognized file directly inside `src/` and `test/`
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::RunnerConfig;
use crate::driver::DriverError;
use crate::version::EXRUN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<DriverError> for CliError {
    fn from(err: DriverError) -> Self {
        // Every fatal driver error maps to exit code 1
        CliError::failure(format!("\x1b[31m{}\x1b[0m", err))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Printed when neither a file nor `--all` is given.
pub const NO_INPUT_MESSAGE: &str = "No file specified. Use either --all or provide a file path.";

// ============================================================================
// Clap CLI definition
// ============================================================================

/// (Compile and) run c/cpp/py files, checking inline `//>` input and `//<` output fixtures
#[derive(Parser, Debug)]
#[command(name = "exrun")]
#[command(version = EXRUN_VERSION)]
#[command(about = "(Compile and) run c/cpp/py files against inline fixtures", long_about = None)]
pub struct Cli {
    /// A single .c, .cpp or .py file
    #[arg(value_name = "FILE", conflicts_with = "all")]
    pub file: Option<PathBuf>,

    /// Compile and run all files in src/ and test/
    #[arg(long)]
    pub all: bool,

    /// Directory for compiled artifacts [env: EXRUN_BUILD_DIR] [default: build]
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// C/C++ compiler [env: EXRUN_CXX] [default: g++]
    #[arg(long, value_name = "PROGRAM")]
    pub cxx: Option<String>,

    /// Python interpreter [env: EXRUN_PYTHON] [default: python3]
    #[arg(long, value_name = "PROGRAM")]
    pub python: Option<String>,

    /// Show artifact paths in the report
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Environment-derived config with CLI overrides applied on top.
    pub fn config(&self) -> RunnerConfig {
        let mut config = RunnerConfig::from_env();
        if let Some(dir) = &self.build_dir {
            config = config.with_build_dir(dir.clone());
        }
        if let Some(cxx) = &self.cxx {
            config = config.with_compiler(cxx.clone());
        }
        if let Some(python) = &self.python {
            config = config.with_interpreter(python.clone());
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.config();
    tracing::debug!(?config, "resolved configuration");

    if cli.all {
        commands::run_all_files(&config, cli.verbose)
    } else if let Some(file) = &cli.file {
        commands::run_single_file(file, &config, cli.verbose)
    } else {
        // Nothing to do is not an error
        println!("{}", NO_INPUT_MESSAGE);
        Ok(ExitCode::SUCCESS)
    }
}

// ============================================================================
// Tests
// ============================================================================
