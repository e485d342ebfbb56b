//! Compare a program's actual output with the expected output of a fixture.
//!
//! ## Notes
//! - Whitespace around the whole output is ignored, and so is whitespace around each line.
//! - The number of lines is significant: a missing or extra line is a mismatch.

/// Describe why two outputs differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Different number of lines after trimming.
    LineCount { actual: usize, expected: usize },
    /// First differing line (1-based) and its trimmed contents.
    Line {
        line: usize,
        actual: String,
        expected: String,
    },
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mismatch::LineCount { actual, expected } => {
                write!(f, "expected {} line(s), got {}", expected, actual)
            }
            Mismatch::Line {
                line,
                actual,
                expected,
            } => write!(f, "line {}: expected {:?}, got {:?}", line, expected, actual),
        }
    }
}

fn normalized_lines(text: &str) -> Vec<&str> {
    text.trim().split('\n').map(str::trim).collect()
}

/// Check whether `actual` matches `expected` under the output comparison rules.
///
/// ## Parameters
/// - `actual`: captured standard output of the program.
/// - `expected`: expected output collected from the fixture.
///
/// ## Returns
/// - `bool`: `true` when both have the same number of lines and every line pair is equal after trimming.
///
/// ## Examples
/// ```rust
/// use exrun_core::outputs_match;
/// assert!(outputs_match("a\nb\n", "a\nb"));
/// assert!(outputs_match("a\nb", "a\n b"));
/// assert!(!outputs_match("a\nb", "a\nb\nc"));
/// ```
pub fn outputs_match(actual: &str, expected: &str) -> bool {
    first_mismatch(actual, expected).is_none()
}

/// Find the first reason `actual` and `expected` differ, if any.
pub fn first_mismatch(actual: &str, expected: &str) -> Option<Mismatch> {
    let actual_lines = normalized_lines(actual);
    let expected_lines = normalized_lines(expected);

    if actual_lines.len() != expected_lines.len() {
        return Some(Mismatch::LineCount {
            actual: actual_lines.len(),
            expected: expected_lines.len(),
        });
    }

    actual_lines
        .iter()
        .zip(&expected_lines)
        .position(|(a, e)| a != e)
        .map(|i| Mismatch::Line {
            line: i + 1,
            actual: actual_lines[i].to_string(),
            expected: expected_lines[i].to_string(),
        })
}
