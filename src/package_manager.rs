//! Package manager integration
//!
//! This module provides:
//! - The [`CommandRunner`] seam used to launch external commands
//! - A tokio-backed runner for real processes
//! - The npm command lines used to list outdated packages and install updates

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Default npm executable for the current platform
#[cfg(windows)]
pub const DEFAULT_NPM: &str = "npm.cmd";
/// Default npm executable for the current platform
#[cfg(not(windows))]
pub const DEFAULT_NPM: &str = "npm";

/// Captured result of an external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command exited with status 0
    pub success: bool,
    /// Exit code, if the process ran and exited normally
    pub code: Option<i32>,
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command (or the spawn error)
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful output
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output with an exit code
    pub fn failure(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Create an output for a process that could not be started
    pub fn spawn_failed(program: &str, error: &std::io::Error) -> Self {
        Self {
            success: false,
            code: None,
            stdout: String::new(),
            stderr: format!("failed to execute {}: {}", program, error),
        }
    }

    /// Whether anything other than whitespace was written to stdout
    pub fn has_stdout(&self) -> bool {
        !self.stdout.trim().is_empty()
    }

    /// Best available error text: stderr, falling back to stdout
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Trait for launching external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `working_dir` and wait for it to finish
    async fn run(&self, program: &str, args: &[String], working_dir: &Path) -> CommandOutput;
}

/// Runner that starts real child processes
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String], working_dir: &Path) -> CommandOutput {
        let result = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .await;

        match result {
            Ok(output) => CommandOutput {
                success: output.status.success(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            },
            Err(e) => CommandOutput::spawn_failed(program, &e),
        }
    }
}

/// npm command lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    /// Executable to launch
    program: String,
}

impl PackageManager {
    /// Create a package manager using the given executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Package manager using the platform's default npm executable
    pub fn npm() -> Self {
        Self::new(DEFAULT_NPM)
    }

    /// Executable name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for listing outdated packages as JSON
    pub fn outdated_args(&self) -> Vec<String> {
        vec!["outdated".to_string(), "--json".to_string()]
    }

    /// Arguments for installing every package at `@latest` in one command
    pub fn install_latest_args(&self, names: &[String]) -> Vec<String> {
        std::iter::once("install".to_string())
            .chain(names.iter().map(|name| format!("{}@latest", name)))
            .collect()
    }

    /// Printable command line
    pub fn command_line(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run `npm outdated --json` in `working_dir`
    pub async fn outdated(&self, runner: &dyn CommandRunner, working_dir: &Path) -> CommandOutput {
        runner
            .run(&self.program, &self.outdated_args(), working_dir)
            .await
    }

    /// Run `npm install <name>@latest ...` in `working_dir`
    pub async fn install_latest(
        &self,
        runner: &dyn CommandRunner,
        names: &[String],
        working_dir: &Path,
    ) -> CommandOutput {
        runner
            .run(&self.program, &self.install_latest_args(names), working_dir)
            .await
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        Self::npm()
    }
}
