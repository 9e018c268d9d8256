//! Status spinner for long-running npm commands
//!
//! Provides visual feedback while the external tool runs using indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Transient status line shown on stderr
pub struct Progress {
    /// Whether progress display is enabled (disabled in quiet mode)
    enabled: bool,
    /// Current spinner
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Whether a spinner is currently shown
    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Show a spinner with a message, replacing any current one
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Run `f` with the spinner hidden so other output does not interleave with it
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match self.bar {
            Some(ref bar) => bar.suspend(f),
            None => f(),
        }
    }

    /// Finish and clear the current spinner
    pub fn finish_and_clear(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(true)
    }
}
