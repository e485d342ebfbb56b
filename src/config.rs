//! Runner configuration
//!
//! Defaults match the layout of an exercise collection: sources under `src/` and `test/`, shared headers in
//! `include/`, artifacts under `build/`. Environment variables override the defaults and CLI flags override both.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Environment variable overriding the build directory.
pub const ENV_BUILD_DIR: &str = "EXRUN_BUILD_DIR";
/// Environment variable overriding the C/C++ compiler.
pub const ENV_CXX: &str = "EXRUN_CXX";
/// Environment variable overriding the Python interpreter.
pub const ENV_PYTHON: &str = "EXRUN_PYTHON";

/// Configuration for compiling, running and discovering exercise files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory compiled artifacts are written under
    pub build_dir: PathBuf,
    /// Compiler program for `.c` and `.cpp` files
    pub compiler: String,
    /// Flags passed before the source path
    pub compiler_flags: Vec<String>,
    /// Shared header directory, passed as `-I` (made absolute at compile time)
    pub include_dir: PathBuf,
    /// Directories scanned by `--all`, in order
    pub search_dirs: Vec<PathBuf>,
    /// Interpreter program for `.py` files
    pub interpreter: String,
    /// Suffix appended to artifact paths
    pub exe_suffix: String,
}

/// Artifact suffix for the platform: `.exe` on Windows, `.out` elsewhere.
pub fn default_exe_suffix() -> &'static str {
    if cfg!(windows) { ".exe" } else { ".out" }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            compiler: "g++".to_string(),
            compiler_flags: vec!["-std=c++2a".to_string()],
            include_dir: PathBuf::from("include"),
            search_dirs: vec![PathBuf::from("src"), PathBuf::from("test")],
            interpreter: "python3".to_string(),
            exe_suffix: default_exe_suffix().to_string(),
        }
    }
}

impl RunnerConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an environment-like lookup. Empty values are ignored.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = lookup(ENV_BUILD_DIR) {
            self.build_dir = PathBuf::from(dir);
        }
        if let Some(cxx) = lookup(ENV_CXX) {
            self.compiler = cxx;
        }
        if let Some(python) = lookup(ENV_PYTHON) {
            self.interpreter = python;
        }
        self
    }

    /// Set the build directory
    pub fn with_build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    /// Set the compiler program
    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Set the interpreter program
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Set the include directory
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dir = dir.into();
        self
    }

    /// Replace the directories scanned in batch mode
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    /// Set the artifact suffix
    pub fn with_exe_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.exe_suffix = suffix.into();
        self
    }

    /// Artifact path for a source file.
    ///
    /// The source's relative path is mirrored under the build directory with its extension replaced by the
    /// artifact suffix: `src/dp/knap.cpp` becomes `build/src/dp/knap.out`. Root, `.` and `..` components are
    /// dropped so the artifact can never land outside the build directory.
    pub fn artifact_path(&self, source: &Path) -> PathBuf {
        let mirrored: PathBuf = source
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part),
                _ => None,
            })
            .collect();

        let mut file: OsString = self.build_dir.join(mirrored.with_extension("")).into_os_string();
        file.push(&self.exe_suffix);
        PathBuf::from(file)
    }
}
