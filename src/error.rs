//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CheckError: Issues while listing outdated packages
//! - UpdateError: Issues while installing updates
//!
//! None of these are fatal. Each one becomes a notice at the level returned by
//! `notice_level()` and the triggering operation ends with an empty result.

use crate::host::NoticeLevel;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while checking for outdated packages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// No project directory available
    #[error("Open a Node.js project to check outdated dependencies.")]
    NoProjectOpen,

    /// package.json not found at the project root
    #[error("No package.json found in workspace.")]
    ManifestMissing { path: PathBuf },

    /// node_modules not found at the project root
    #[error("Run `npm install` before checking outdated packages.")]
    DependenciesNotInstalled { path: PathBuf },

    /// The tool failed without producing usable output
    #[error("npm outdated failed. Make sure Node.js is installed.{}", detail_suffix(.message))]
    ToolInvocationFailed { message: String },

    /// The tool output is not valid JSON of the expected shape
    #[error("Failed to parse npm outdated output. {message}")]
    OutputParseFailed { message: String },
}

/// Errors raised while installing updates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// No package name or no project given for a single update
    #[error("No dependency selected or no workspace open.")]
    MissingTarget,

    /// No project directory for a bulk update
    #[error("No workspace folder open.")]
    NoProjectOpen,

    /// Nothing retained from the last check
    #[error("[Manual Update All] No outdated dependencies found.")]
    NothingToUpdate,

    /// The user declined the confirmation
    #[error("Update cancelled.")]
    UserCancelled,

    /// Install command failed
    #[error("Failed to update {target}: {stderr}")]
    UpdateFailed { target: String, stderr: String },
}

/// Appends ` <detail>` when there is a diagnostic to show
fn detail_suffix(detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() {
        String::new()
    } else {
        format!(" {}", detail)
    }
}

impl CheckError {
    /// Creates a new ToolInvocationFailed error
    pub fn tool_invocation_failed(message: impl Into<String>) -> Self {
        CheckError::ToolInvocationFailed {
            message: message.into(),
        }
    }

    /// Creates a new OutputParseFailed error
    pub fn output_parse_failed(message: impl Into<String>) -> Self {
        CheckError::OutputParseFailed {
            message: message.into(),
        }
    }

    /// Notice level used when reporting this error
    pub fn notice_level(&self) -> NoticeLevel {
        match self {
            CheckError::NoProjectOpen | CheckError::ManifestMissing { .. } => NoticeLevel::Info,
            CheckError::DependenciesNotInstalled { .. } => NoticeLevel::Warning,
            CheckError::ToolInvocationFailed { .. } | CheckError::OutputParseFailed { .. } => {
                NoticeLevel::Error
            }
        }
    }
}

impl UpdateError {
    /// Creates a new UpdateFailed error
    pub fn update_failed(target: impl Into<String>, stderr: impl Into<String>) -> Self {
        UpdateError::UpdateFailed {
            target: target.into(),
            stderr: stderr.into(),
        }
    }

    /// Notice level used when reporting this error
    pub fn notice_level(&self) -> NoticeLevel {
        match self {
            UpdateError::NothingToUpdate | UpdateError::UserCancelled => NoticeLevel::Info,
            UpdateError::MissingTarget
            | UpdateError::NoProjectOpen
            | UpdateError::UpdateFailed { .. } => NoticeLevel::Error,
        }
    }
}
