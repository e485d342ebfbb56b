//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use super::{CliResult, ExitCode};
use crate::config::RunnerConfig;
use crate::driver::{self, report::ConsoleReporter};

/// (Compile and) run one file.
///
/// Fixture mismatches are reported but keep exit code 0; only compile failures and failing programs exit 1.
pub fn run_single_file(path: &Path, config: &RunnerConfig, verbose: bool) -> CliResult<ExitCode> {
    let mut reporter = ConsoleReporter::new(verbose);
    let summary = driver::run_file(path, config, &mut reporter)?;

    tracing::debug!(
        file = %summary.path.display(),
        passed = summary.passed,
        failed = summary.failed,
        "file finished"
    );
    Ok(ExitCode::SUCCESS)
}

/// Run every discovered file, stopping at the first fatal error.
pub fn run_all_files(config: &RunnerConfig, verbose: bool) -> CliResult<ExitCode> {
    let mut reporter = ConsoleReporter::new(verbose);
    let summary = driver::run_all(config, &mut reporter)?;

    if summary.files == 0 {
        let dirs: Vec<String> = config.search_dirs.iter().map(|d| d.display().to_string()).collect();
        tracing::warn!("no .c, .cpp or .py files found in {}", dirs.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}
