#![forbid(unsafe_code)]
//! exrun: compile, run and check single-file exercises
//!
//! Exercise files (`.c`, `.cpp`, `.py`) carry their own test cases as `//>` input and `//<` expected-output
//! comment lines. This crate compiles a file (or hands it to the interpreter), feeds each fixture's input to the
//! program and compares what it prints.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `driver`
//!   modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod driver;
pub mod version;
pub mod viz;

pub use config::RunnerConfig;
pub use driver::{BatchSummary, Driver, DriverError, FixtureOutcome, RunSummary, run_all, run_file};
pub use exrun_core::{Fixture, extract_fixtures, outputs_match};
