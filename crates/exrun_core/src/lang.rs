//! Recognized source kinds and how each one is executed.

use std::path::Path;

/// How a source file gets executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStrategy {
    /// Hand the file to an interpreter.
    Interpret,
    /// Compile to an artifact, then run the artifact.
    CompileThenRun,
}

/// A source file kind the runner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    C,
    Cpp,
    Python,
}

impl SourceKind {
    /// Every recognized kind, in a stable order.
    pub const ALL: [SourceKind; 3] = [SourceKind::C, SourceKind::Python, SourceKind::Cpp];

    /// Resolve a file extension (without the dot). Matching is case-sensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "c" => Some(SourceKind::C),
            "cpp" => Some(SourceKind::Cpp),
            "py" => Some(SourceKind::Python),
            _ => None,
        }
    }

    /// Resolve the kind of a path from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            SourceKind::C => "c",
            SourceKind::Cpp => "cpp",
            SourceKind::Python => "py",
        }
    }

    pub fn strategy(self) -> ExecStrategy {
        match self {
            SourceKind::C | SourceKind::Cpp => ExecStrategy::CompileThenRun,
            SourceKind::Python => ExecStrategy::Interpret,
        }
    }
}
