//! Terminal host used by the `nodeup` binary
//!
//! Notices go to stderr with colors, status messages become spinners and
//! confirmations are read from stdin.

use super::{Host, Notice, NoticeLevel};
use crate::output::Verbosity;
use crate::progress::Progress;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::process::Command;
use std::sync::{Mutex, MutexGuard};

/// Host backed by the user's terminal
pub struct TerminalHost {
    /// Verbosity level
    verbosity: Verbosity,
    /// Answer every confirmation with yes
    assume_yes: bool,
    /// Spinner for status messages
    progress: Mutex<Progress>,
}

impl TerminalHost {
    /// Create a new terminal host
    pub fn new(verbosity: Verbosity, assume_yes: bool) -> Self {
        Self {
            verbosity,
            assume_yes,
            progress: Mutex::new(Progress::new(verbosity != Verbosity::Quiet)),
        }
    }

    fn progress(&self) -> MutexGuard<'_, Progress> {
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Format a notice for display
    fn format_notice(notice: &Notice) -> String {
        match notice.level {
            NoticeLevel::Info => format!("{} {}", "ℹ".cyan(), notice.message),
            NoticeLevel::Warning => format!("{} {}", "warning:".yellow().bold(), notice.message),
            NoticeLevel::Error => format!("{} {}", "error:".red().bold(), notice.message),
        }
    }

    /// Build the platform command that opens a URL
    fn opener(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut command = Command::new("open");
            command.arg(url);
            command
        } else if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]).arg(url);
            command
        } else {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        }
    }

    /// Ask `question` and read the answer from `input`
    ///
    /// The spinner is cleared first and the progress lock is not held while
    /// waiting for the answer.
    fn confirm_from(&self, question: &str, accept: &str, input: &mut impl BufRead) -> bool {
        self.progress().finish_and_clear();

        if self.assume_yes {
            if self.verbosity != Verbosity::Quiet {
                eprintln!("{} {}", question.bold(), format!("{} (--yes)", accept).dimmed());
            }
            return true;
        }

        eprint!("{} [{} / y/N]: ", question.bold(), accept);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer, accept),
            Err(_) => false,
        }
    }
}

/// Whether a typed answer accepts the prompt
fn is_affirmative(answer: &str, accept: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    matches!(answer.as_str(), "y" | "yes") || answer == accept.to_lowercase()
}

impl Host for TerminalHost {
    fn notify(&self, notice: Notice) {
        if notice.level == NoticeLevel::Info && self.verbosity == Verbosity::Quiet {
            return;
        }
        let line = Self::format_notice(&notice);
        self.progress().suspend(|| eprintln!("{}", line));
    }

    fn set_status(&self, message: Option<&str>) {
        let mut progress = self.progress();
        match message {
            Some(message) => progress.spinner(message),
            None => progress.finish_and_clear(),
        }
    }

    fn confirm(&self, question: &str, accept: &str) -> bool {
        self.confirm_from(question, accept, &mut io::stdin().lock())
    }

    fn open_external(&self, url: &str) -> io::Result<()> {
        let status = Self::opener(url).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("browser opener exited with {}", status)))
        }
    }

    fn trace(&self, message: &str) {
        if self.verbosity == Verbosity::Verbose {
            self.progress()
                .suspend(|| eprintln!("{}", message.dimmed()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n", "Yes, Update All"));
        assert!(is_affirmative("YES", "Yes, Update All"));
        assert!(is_affirmative("yes, update all", "Yes, Update All"));
        assert!(!is_affirmative("\n", "Yes, Update All"));
        assert!(!is_affirmative("n", "Yes, Update All"));
        assert!(!is_affirmative("maybe", "Yes, Update All"));
    }

    #[test]
    fn test_assume_yes_confirms_without_reading_stdin() {
        let host = TerminalHost::new(Verbosity::Quiet, true);
        assert!(host.confirm("Proceed?", "Yes"));
    }

    /// Input that shows a notice through the host while the answer is read
    struct NotifyingInput<'a> {
        host: &'a TerminalHost,
        answer: io::Cursor<Vec<u8>>,
    }

    impl io::Read for NotifyingInput<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            io::Read::read(&mut self.answer, buf)
        }
    }

    impl BufRead for NotifyingInput<'_> {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            self.host.notify(Notice::warning("still waiting"));
            self.answer.fill_buf()
        }

        fn consume(&mut self, amount: usize) {
            self.answer.consume(amount)
        }
    }

    #[test]
    fn test_confirm_reads_answer() {
        let host = TerminalHost::new(Verbosity::Quiet, false);
        assert!(host.confirm_from("Proceed?", "Yes", &mut io::Cursor::new("y\n")));
        assert!(!host.confirm_from("Proceed?", "Yes", &mut io::Cursor::new("\n")));
        assert!(!host.confirm_from("Proceed?", "Yes", &mut io::Cursor::new("")));
    }

    #[test]
    fn test_confirm_allows_notices_while_waiting() {
        let host = TerminalHost::new(Verbosity::Normal, false);
        host.set_status(Some("Checking..."));
        let mut input = NotifyingInput {
            host: &host,
            answer: io::Cursor::new(b"yes\n".to_vec()),
        };
        assert!(host.confirm_from("Proceed?", "Yes", &mut input));
        assert!(!host.progress().is_active());
    }

    #[test]
    fn test_format_notice_contains_message() {
        colored::control::set_override(false);
        assert_eq!(
            TerminalHost::format_notice(&Notice::error("boom")),
            "error: boom"
        );
        assert_eq!(
            TerminalHost::format_notice(&Notice::warning("careful")),
            "warning: careful"
        );
        assert_eq!(TerminalHost::format_notice(&Notice::info("hi")), "ℹ hi");
    }

    #[test]
    fn test_status_spinner_lifecycle() {
        let host = TerminalHost::new(Verbosity::Quiet, false);
        host.set_status(Some("Checking..."));
        host.set_status(None);
        assert!(!host.progress().is_active());
    }
}
