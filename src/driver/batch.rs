//! Batch runner
//!
//! Runs every recognized file found directly inside the configured search directories, in discovery order.
//! The first fatal error (a compile failure included) ends the batch; there is no skip-and-continue mode.

use super::interfaces::{DirectoryDiscovery, ProcessExecutor, ProcessToolchain, SourceDiscovery};
use super::report::RunReporter;
use super::{BatchSummary, Driver, DriverError};
use crate::config::RunnerConfig;

/// Discover files with `discovery` and run each through `driver`.
pub fn run_batch(
    driver: &Driver<'_>,
    discovery: &dyn SourceDiscovery,
    reporter: &mut dyn RunReporter,
) -> Result<BatchSummary, DriverError> {
    let files = discovery.discover(&driver.config().search_dirs)?;
    let total = files.len();
    let mut summary = BatchSummary::default();

    for (i, path) in files.iter().enumerate() {
        reporter.on_file_start(i + 1, total, path);
        let run = driver.run_file(path, reporter)?;
        summary.files += 1;
        summary.passed += run.passed;
        summary.failed += run.failed;
    }

    reporter.on_batch_complete(&summary);
    Ok(summary)
}

/// Run all discovered files with the process-backed toolchain, skipping the running executable.
pub fn run_all(config: &RunnerConfig, reporter: &mut dyn RunReporter) -> Result<BatchSummary, DriverError> {
    let driver = Driver::new(config, &ProcessToolchain, &ProcessExecutor);
    run_batch(&driver, &DirectoryDiscovery::new(), reporter)
}
