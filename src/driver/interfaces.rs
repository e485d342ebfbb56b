//! Process boundary interfaces
//!
//! The driver never touches `std::process` or the directory tree directly. It goes through these traits:
//! - compiling a source file (`Toolchain`)
//! - running an artifact or interpreter (`ProgramExecutor`)
//! - finding candidate files for batch mode (`SourceDiscovery`)
//!
//! The default implementations spawn real processes and read real directories. Tests substitute fakes.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use exrun_core::SourceKind;

use super::DriverError;
use crate::config::RunnerConfig;

// ============================================================================
// Commands and results
// ============================================================================

/// A fully assembled external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ProgramCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Compiler invocation for `source`: `<compiler> <flags..> <source> -o <artifact> -I <include_dir>`.
    pub fn compile(config: &RunnerConfig, source: &Path, artifact: &Path, include_dir: &Path) -> Self {
        let mut cmd = Self::new(config.compiler.clone());
        for flag in &config.compiler_flags {
            cmd = cmd.arg(flag);
        }
        cmd.arg(source).arg("-o").arg(artifact).arg("-I").arg(include_dir)
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for ProgramCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Result of a compiler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub success: bool,
    pub exit_code: Option<i32>,
}

/// Result of running a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    /// Captured standard output (empty when output went straight to the terminal)
    pub stdout: String,
}

// ============================================================================
// Traits
// ============================================================================

/// Compile a source file into an artifact.
pub trait Toolchain {
    /// Run the compiler command to completion. Compiler diagnostics go to the terminal.
    fn compile(&self, command: &ProgramCommand) -> Result<BuildResult, DriverError>;
}

/// Run programs under test.
pub trait ProgramExecutor {
    /// Run with the terminal's stdin/stdout/stderr.
    fn run_inherited(&self, command: &ProgramCommand) -> Result<RunResult, DriverError>;

    /// Run with `input` piped to stdin and stdout captured.
    fn run_piped(&self, command: &ProgramCommand, input: &str) -> Result<RunResult, DriverError>;
}

/// Find candidate source files for batch mode.
pub trait SourceDiscovery {
    /// Recognized files directly inside each directory, directories in the given order.
    fn discover(&self, dirs: &[PathBuf]) -> Result<Vec<PathBuf>, DriverError>;
}

// ============================================================================
// Default Implementations
// ============================================================================

fn spawn_error(command: &ProgramCommand) -> impl FnOnce(io::Error) -> DriverError + '_ {
    move |source| DriverError::Spawn {
        program: command.program.clone(),
        source,
    }
}

/// Compiler invocation via `std::process`.
pub struct ProcessToolchain;

impl Toolchain for ProcessToolchain {
    fn compile(&self, command: &ProgramCommand) -> Result<BuildResult, DriverError> {
        tracing::debug!(%command, "compiling");
        let status = command.to_command().status().map_err(spawn_error(command))?;

        Ok(BuildResult {
            success: status.success(),
            exit_code: status.code(),
        })
    }
}

/// Program execution via `std::process`.
pub struct ProcessExecutor;

impl ProgramExecutor for ProcessExecutor {
    fn run_inherited(&self, command: &ProgramCommand) -> Result<RunResult, DriverError> {
        tracing::debug!(%command, "running");
        let status = command
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(spawn_error(command))?;

        Ok(RunResult {
            success: status.success(),
            exit_code: status.code(),
            stdout: String::new(), // Output went directly to terminal
        })
    }

    fn run_piped(&self, command: &ProgramCommand, input: &str) -> Result<RunResult, DriverError> {
        tracing::debug!(%command, input_len = input.len(), "running with fixture input");
        let mut child = command
            .to_command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error(command))?;

        // Stdin is fed from its own thread while stdout/stderr drain. Dropping the handle sends EOF.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = input.to_owned();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The program may exit without reading all of its input
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("program closed stdin early");
                }
                Ok(Err(e)) => return Err(DriverError::Io(e)),
                Err(_) => return Err(DriverError::Io(io::Error::other("stdin writer thread panicked"))),
            }
        }

        if !output.stderr.is_empty() {
            tracing::debug!(stderr = %String::from_utf8_lossy(&output.stderr), "program stderr");
        }

        Ok(RunResult {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}

/// Directory listing discovery (non-recursive).
#[derive(Debug, Default)]
pub struct DirectoryDiscovery;

impl DirectoryDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl SourceDiscovery for DirectoryDiscovery {
    fn discover(&self, dirs: &[PathBuf]) -> Result<Vec<PathBuf>, DriverError> {
        let mut files = Vec::new();

        for dir in dirs {
            if !dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "search directory missing, skipping");
                continue;
            }

            let mut found = Vec::new();
            for entry in fs::read_dir(dir)? {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        tracing::warn!(dir = %dir.display(), error = %e, "unreadable directory entry, skipping");
                        continue;
                    }
                };
                if path.is_file() && SourceKind::from_path(&path).is_some() {
                    found.push(path);
                }
            }
            found.sort();

            tracing::debug!(dir = %dir.display(), count = found.len(), "discovered sources");
            files.extend(found);
        }

        Ok(files)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("exrun_interfaces_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_compile_command_layout() {
        let config = RunnerConfig::new();
        let cmd = ProgramCommand::compile(
            &config,
            Path::new("src/a.cpp"),
            Path::new("build/src/a.out"),
            Path::new("/work/include"),
        );
        insta::assert_snapshot!(cmd.to_string(), @"g++ -std=c++2a src/a.cpp -o build/src/a.out -I /work/include");
    }

    #[test]
    fn test_compile_command_uses_configured_compiler() {
        let config = RunnerConfig::new().with_compiler("clang++");
        let cmd = ProgramCommand::compile(&config, Path::new("a.c"), Path::new("a.out"), Path::new("inc"));
        assert_eq!(cmd.program, "clang++");
        assert_eq!(cmd.args.len(), 6);
    }

    #[test]
    fn test_discovery_is_flat_filtered_and_sorted() {
        let root = scratch_dir("discover");
        let src = root.join("src");
        let test = root.join("test");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::create_dir_all(&test).unwrap();
        for name in ["b.cpp", "a.c", "notes.md", "c.py"] {
            fs::write(src.join(name), "").unwrap();
        }
        fs::write(src.join("nested").join("deep.cpp"), "").unwrap();
        fs::write(test.join("t.cpp"), "").unwrap();

        let files = DirectoryDiscovery::new()
            .discover(&[src.clone(), root.join("missing"), test.clone()])
            .unwrap();

        assert_eq!(
            files,
            vec![src.join("a.c"), src.join("b.cpp"), src.join("c.py"), test.join("t.cpp")]
        );

        let _ = fs::remove_dir_all(&root);
    }
}
