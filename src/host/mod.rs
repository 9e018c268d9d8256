//! Host capabilities the core depends on
//!
//! The core never prints or prompts directly. It talks to a [`Host`], which is
//! the terminal in the `nodeup` binary and a [`RecordingHost`] in tests.

mod recording;
mod terminal;

pub use recording::RecordingHost;
pub use terminal::TerminalHost;

use std::fmt;

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    /// Informational message
    Info,
    /// Something the user should act on
    Warning,
    /// An operation failed
    Error,
}

/// A plain-text message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Message text
    pub message: String,
}

impl Notice {
    /// Creates a new notice
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Creates an informational notice
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    /// Creates a warning notice
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    /// Creates an error notice
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// User-facing surface provided by whoever embeds the core
pub trait Host: Send + Sync {
    /// Show a notice
    fn notify(&self, notice: Notice);

    /// Show a transient status message, or clear it with `None`
    fn set_status(&self, message: Option<&str>);

    /// Ask a blocking yes/no question; `accept` labels the affirmative choice
    fn confirm(&self, question: &str, accept: &str) -> bool;

    /// Open an external URL in the user's browser
    fn open_external(&self, url: &str) -> std::io::Result<()>;

    /// Diagnostic output, shown only in verbose mode
    fn trace(&self, _message: &str) {}

    /// Show an informational notice
    fn info(&self, message: &str) {
        self.notify(Notice::info(message));
    }

    /// Show a warning notice
    fn warning(&self, message: &str) {
        self.notify(Notice::warning(message));
    }

    /// Show an error notice
    fn error(&self, message: &str) {
        self.notify(Notice::error(message));
    }
}
