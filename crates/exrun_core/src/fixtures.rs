//! Extract inline input/expected-output fixtures from source text.
//!
//! Exercise files carry their own test cases as line comments:
//!
//! ```text
//! //>3 4
//! //<7
//! int main() { ... }
//! ```
//!
//! ## Notes
//! - A line starting with [`INPUT_MARKER`] appends its remainder to the pending input, a line starting with
//!   [`OUTPUT_MARKER`] appends to the pending expected output. The remainder keeps its line terminator.
//! - Any other line closes the pending fixture, if there is one. Outside a fixture such lines are ordinary code.
//! - Markers only count at column 0. Indented markers are code.
//! - There is no error case: text without markers yields no fixtures.

/// Prefix of a line contributing to a fixture's input.
pub const INPUT_MARKER: &str = "//>";
/// Prefix of a line contributing to a fixture's expected output.
pub const OUTPUT_MARKER: &str = "//<";

/// One `(input, expected output)` pair, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fixture {
    pub input: String,
    pub expected: String,
}

impl Fixture {
    pub fn new(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected: expected.into(),
        }
    }
}

/// Scan mode while a fixture is being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Neutral,
    Input,
    Output,
}

/// Lazy iterator over the fixtures of one source text.
///
/// Cloning yields an independent iterator positioned at the same line, so a caller can count the fixtures
/// and still walk them afterwards.
#[derive(Debug, Clone)]
pub struct Fixtures<'a> {
    source: &'a str,
    pos: usize,
}

/// Start scanning `source` for fixtures.
///
/// ## Parameters
/// - `source`: full text of a source file.
///
/// ## Returns
/// - (`Fixtures`): an iterator yielding each [`Fixture`] in the order it appears.
///
/// ## Examples
/// ```rust
/// use exrun_core::{Fixture, extract_fixtures};
///
/// let src = "//>1\n//>2\n//<3\nint main() {}\n";
/// let fixtures: Vec<_> = extract_fixtures(src).collect();
/// assert_eq!(fixtures, vec![Fixture::new("1\n2\n", "3\n")]);
/// ```
pub fn extract_fixtures(source: &str) -> Fixtures<'_> {
    Fixtures { source, pos: 0 }
}

impl<'a> Fixtures<'a> {
    /// Next line including its terminator (`\n`, `\r\n` or a bare `\r`), if any.
    fn next_line(&mut self) -> Option<&'a str> {
        let rest = &self.source[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let end = match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(i) if rest[i..].starts_with("\r\n") => i + 2,
            Some(i) => i + 1,
            None => rest.len(),
        };
        self.pos += end;
        Some(&rest[..end])
    }
}

impl Iterator for Fixtures<'_> {
    type Item = Fixture;

    fn next(&mut self) -> Option<Fixture> {
        let mut mode = Mode::Neutral;
        let mut pending = Fixture::default();

        while let Some(line) = self.next_line() {
            if let Some(rest) = line.strip_prefix(INPUT_MARKER) {
                mode = Mode::Input;
                push_remainder(&mut pending.input, rest);
            } else if let Some(rest) = line.strip_prefix(OUTPUT_MARKER) {
                mode = Mode::Output;
                push_remainder(&mut pending.expected, rest);
            } else if mode != Mode::Neutral {
                return Some(pending);
            }
        }

        // End of text closes a block that is still open.
        (mode != Mode::Neutral).then_some(pending)
    }
}

impl std::iter::FusedIterator for Fixtures<'_> {}

/// Append a marker remainder with its line terminator normalized to `\n`.
fn push_remainder(buf: &mut String, rest: &str) {
    let (text, ending) = match rest.strip_suffix("\r\n").or_else(|| rest.strip_suffix('\r')) {
        Some(text) => (text, "\n"),
        None => (rest, ""),
    };
    buf.push_str(text);
    buf.push_str(ending);
}
