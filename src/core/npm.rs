//! Package-tool process wrapper with consistent error handling.
//!
//! `SubprocessNpm` is the one place the crate launches the package manager.
//! It captures output, returns trimmed stdout on success, and folds non-zero
//! exits and launch failures into a single `NpmError` diagnostic.

use std::path::Path;
use std::process::{Command, Output};

/// Execution failure from the package tool: non-zero exit or launch failure.
///
/// Carries one diagnostic message. Actions translate this into the uniform
/// pipeline failure; it never crosses an action boundary itself.
#[derive(Debug, Clone)]
pub struct NpmError {
    pub message: String,
}

impl std::fmt::Display for NpmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NpmError {}

/// Runs a package-manager subcommand in a working directory and returns its
/// primary output.
pub trait NpmRunner: Send + Sync {
    fn run(&self, args: &[&str], cwd: &Path) -> std::result::Result<String, NpmError>;
}

/// `NpmRunner` backed by a real subprocess.
///
/// The program name is configurable so tests can substitute a stub; it
/// defaults to `npm` resolved through PATH.
pub struct SubprocessNpm {
    program: String,
}

impl SubprocessNpm {
    pub fn new() -> Self {
        Self::with_program("npm")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SubprocessNpm {
    fn default() -> Self {
        Self::new()
    }
}

impl NpmRunner for SubprocessNpm {
    fn run(&self, args: &[&str], cwd: &Path) -> std::result::Result<String, NpmError> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| NpmError {
                message: format!("Failed to run {} {}: {}", self.program, args.join(" "), e),
            })?;

        if !output.status.success() {
            return Err(NpmError {
                message: format!(
                    "{} {} failed (exit code {}): {}",
                    self.program,
                    args.join(" "),
                    output.status.code().unwrap_or(-1),
                    error_text(&output)
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Extract error text from command output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> std::path::PathBuf {
        std::env::temp_dir()
    }

    #[test]
    fn run_returns_trimmed_stdout() {
        let npm = SubprocessNpm::with_program("echo");
        let out = npm.run(&["package-0.1.0.tgz"], &cwd()).unwrap();
        assert_eq!(out, "package-0.1.0.tgz");
    }

    #[test]
    fn run_respects_working_directory() {
        let npm = SubprocessNpm::with_program("pwd");
        let out = npm.run(&[], &cwd()).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn run_fails_on_nonzero_exit() {
        let npm = SubprocessNpm::with_program("false");
        let err = npm.run(&[], &cwd()).unwrap_err();
        assert!(err.message.contains("exit code 1"));
    }

    #[test]
    fn run_failure_includes_stderr() {
        let npm = SubprocessNpm::with_program("ls");
        let err = npm.run(&["/nonexistent_path_12345"], &cwd()).unwrap_err();
        assert!(
            err.message.contains("No such file") || err.message.contains("cannot access"),
            "unexpected diagnostic: {}",
            err.message
        );
    }

    #[test]
    fn run_fails_when_program_cannot_launch() {
        let npm = SubprocessNpm::with_program("nonexistent_program_xyz");
        let err = npm.run(&["install"], &cwd()).unwrap_err();
        assert!(err.message.contains("Failed to run"));
        assert!(err.message.contains("install"));
    }
}
