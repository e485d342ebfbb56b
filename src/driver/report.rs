//! Run reporting
//!
//! The driver calls a `RunReporter` at each step instead of printing directly, so other output formats can be
//! added by implementing the trait. `ConsoleReporter` is the colored terminal output.

use std::io::{self, Write};
use std::path::Path;

use super::interfaces::ProgramCommand;
use super::{BatchSummary, FixtureOutcome, RunSummary};

/// Trait for reporting progress and results of a run.
pub trait RunReporter {
    /// Called before each file in batch mode (`index` is 1-based)
    fn on_file_start(&mut self, _index: usize, _total: usize, _path: &Path) {}

    /// Called with the compiler command line before it runs
    fn on_compile_start(&mut self, command: &ProgramCommand);

    /// Called when compilation succeeded
    fn on_compile_success(&mut self, artifact: &Path);

    /// Called when a file without fixtures ran to a zero exit status
    fn on_run_finished(&mut self, path: &Path);

    /// Called after each fixture
    fn on_fixture_complete(&mut self, outcome: &FixtureOutcome);

    /// Called when every fixture of a file has run
    fn on_file_complete(&mut self, _summary: &RunSummary) {}

    /// Called when a batch finished without a fatal error
    fn on_batch_complete(&mut self, _summary: &BatchSummary) {}
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Default console reporter
///
/// Colors are only emitted for the terminal; a reporter built with [`ConsoleReporter::with_writer`] writes plain
/// text. Write errors are ignored.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    pub verbose: bool,
    out: W,
    color: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            out: io::stdout(),
            color: true,
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Report into `out` without colors.
    pub fn with_writer(out: W, verbose: bool) -> Self {
        Self {
            verbose,
            out,
            color: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, style: &'static str) -> (&'static str, &'static str) {
        if self.color { (style, RESET) } else { ("", "") }
    }
}

impl<W: Write> RunReporter for ConsoleReporter<W> {
    fn on_file_start(&mut self, index: usize, total: usize, path: &Path) {
        let (on, off) = self.paint(BOLD);
        let _ = writeln!(self.out, "{}{}/{}{} {}", on, index, total, off, path.display());
    }

    fn on_compile_start(&mut self, command: &ProgramCommand) {
        let _ = writeln!(self.out, "{}", command);
    }

    fn on_compile_success(&mut self, artifact: &Path) {
        if self.verbose {
            let _ = writeln!(self.out, "Compiled successfully: {}", artifact.display());
        } else {
            let _ = writeln!(self.out, "Compiled successfully");
        }
    }

    fn on_run_finished(&mut self, _path: &Path) {
        let _ = writeln!(self.out, "Run finished");
    }

    fn on_fixture_complete(&mut self, outcome: &FixtureOutcome) {
        match outcome {
            FixtureOutcome::Passed { index } => {
                let (on, off) = self.paint(GREEN);
                let _ = writeln!(self.out, "{}Test {} passed{}", on, index, off);
            }
            FixtureOutcome::Failed {
                index,
                expected,
                actual,
                mismatch,
            } => {
                let (on, off) = self.paint(RED);
                let _ = writeln!(self.out, "{}Test {} failed{} ({})", on, index, off, mismatch);
                let _ = writeln!(self.out, "Expected output");
                let _ = writeln!(self.out, "{}", expected);
                let _ = writeln!(self.out, "Actual output");
                let _ = writeln!(self.out, "{}", actual);
            }
        }
    }

    fn on_file_complete(&mut self, summary: &RunSummary) {
        if summary.fixture_count() == 0 {
            return;
        }
        let (on, off) = self.paint(if summary.failed > 0 { RED } else { GREEN });
        let _ = writeln!(
            self.out,
            "{}{} passed, {} failed{} ({})",
            on,
            summary.passed,
            summary.failed,
            off,
            summary.path.display()
        );
    }

    fn on_batch_complete(&mut self, summary: &BatchSummary) {
        let (on, off) = self.paint(if summary.failed > 0 { RED } else { GREEN });
        let _ = writeln!(self.out);
        let _ = writeln!(
            self.out,
            "{}====== {} file(s), {} fixture(s) passed, {} failed ======{}",
            on, summary.files, summary.passed, summary.failed, off
        );
    }
}
