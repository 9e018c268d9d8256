//! In-memory host that records every interaction

use super::{Host, Notice, NoticeLevel};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Host that records notices, status messages, prompts and opened links
///
/// Confirmation prompts are answered with a fixed reply (yes by default).
#[derive(Debug)]
pub struct RecordingHost {
    notices: Mutex<Vec<Notice>>,
    statuses: Mutex<Vec<Option<String>>>,
    opened: Mutex<Vec<String>>,
    confirm_reply: AtomicBool,
    confirm_calls: AtomicUsize,
}

impl RecordingHost {
    /// Create a host that confirms every prompt
    pub fn new() -> Self {
        Self::with_confirm_reply(true)
    }

    /// Create a host that answers every prompt with `reply`
    pub fn with_confirm_reply(reply: bool) -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
            statuses: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
            confirm_reply: AtomicBool::new(reply),
            confirm_calls: AtomicUsize::new(0),
        }
    }

    /// All notices so far
    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    /// Messages of the notices at `level`
    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        lock(&self.notices)
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }

    /// Status updates so far (`None` marks a clear)
    pub fn statuses(&self) -> Vec<Option<String>> {
        lock(&self.statuses).clone()
    }

    /// URLs passed to `open_external`
    pub fn opened(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }

    /// Number of confirmation prompts shown
    pub fn confirm_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst)
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for RecordingHost {
    fn notify(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }

    fn set_status(&self, message: Option<&str>) {
        lock(&self.statuses).push(message.map(str::to_string));
    }

    fn confirm(&self, _question: &str, _accept: &str) -> bool {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        self.confirm_reply.load(Ordering::SeqCst)
    }

    fn open_external(&self, url: &str) -> std::io::Result<()> {
        lock(&self.opened).push(url.to_string());
        Ok(())
    }
}

/// Lock a mutex, recovering the data if a panicking test poisoned it
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
