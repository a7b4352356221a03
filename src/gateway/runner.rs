//! Abstraction for external-process invocation to enable testing and mocking.
//!
//! The `CommandRunner` trait allows the gateway to drive the real snapper
//! binary in production and a canned in-memory transcript in tests or on
//! machines without snapper installed.

use std::io;
use std::process::Command;

/// Captured result of one external-process invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    /// A successful invocation with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A non-zero exit with the given stderr.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Abstraction for running an external command to completion.
///
/// An `io::Error` means the process could not be spawned at all; a
/// `CommandOutput` with `success == false` means it ran and exited non-zero.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;
}

/// Real implementation that delegates to `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealRunner;

impl RealRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for RealRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_runner_captures_stdout() {
        let out = RealRunner::new().run("echo", &["hello"]).unwrap();
        assert!(out.success);
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn real_runner_reports_spawn_failure() {
        let err = RealRunner::new().run("/nonexistent-snapcon-binary", &[]);
        assert!(err.is_err());
    }
}
