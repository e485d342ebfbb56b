//! Provide the pure, deterministic pieces of exrun: fixture extraction, output comparison and the
//! recognized source kinds.
//!
//! ## Notes
//!
//! - This is a “core” crate: **no IO**, no global state, no process handling.
//! - The driver in the `exrun` crate reads files and spawns processes; everything it decides about
//!   text goes through the helpers here so the rules live in one place.

pub mod compare;
pub mod fixtures;
pub mod lang;

pub use compare::{Mismatch, first_mismatch, outputs_match};
pub use fixtures::{Fixture, Fixtures, INPUT_MARKER, OUTPUT_MARKER, extract_fixtures};
pub use lang::{ExecStrategy, SourceKind};
