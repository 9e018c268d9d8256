//! Dependency report model
//!
//! Coordinates the workflow: fetch → parse → classify → present. The model
//! owns the name list retained from the last successful check and a change
//! stream observers subscribe to.
//!
//! Checks are not serialized against each other. Two overlapping checks both
//! run to completion and whichever finishes last wins the retained list.

use crate::domain::{DependencyRecord, OutdatedOutput};
use crate::error::CheckError;
use crate::fetcher::OutdatedFetcher;
use crate::host::{Host, Notice};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// How a check ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Nothing is outdated
    Empty,
    /// Outdated packages were found
    Success,
    /// The check failed; the notice has already been shown
    Error(CheckError),
}

/// Result of a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// How the check ended
    pub status: CheckStatus,
    /// Records in the order npm reported them (empty unless `Success`)
    pub records: Vec<DependencyRecord>,
}

impl CheckReport {
    fn empty(status: CheckStatus) -> Self {
        Self {
            status,
            records: Vec::new(),
        }
    }

    /// Whether the check failed
    pub fn is_error(&self) -> bool {
        matches!(self.status, CheckStatus::Error(_))
    }

    /// Records flagged as major updates
    pub fn major_updates(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.records.iter().filter(|r| r.is_major_update)
    }
}

/// Model behind the outdated dependency list
pub struct DependencyReport {
    /// Fetcher for npm output
    fetcher: OutdatedFetcher,
    /// Project directory, `None` when no project is open
    project_root: Option<PathBuf>,
    /// Names from the last successful check
    retained: Mutex<Vec<String>>,
    /// Revision counter bumped by `refresh`
    changes: watch::Sender<u64>,
}

impl DependencyReport {
    /// Create a model for `project_root`
    pub fn new(fetcher: OutdatedFetcher, project_root: Option<PathBuf>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            fetcher,
            project_root,
            retained: Mutex::new(Vec::new()),
            changes,
        }
    }

    /// Project directory, if one is open
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Underlying fetcher
    pub fn fetcher(&self) -> &OutdatedFetcher {
        &self.fetcher
    }

    /// Host notices are sent to
    pub fn host(&self) -> &Arc<dyn Host> {
        self.fetcher.host()
    }

    /// Run a check and build the dependency records
    pub async fn check(&self) -> CheckReport {
        let Some(root) = self.project_root() else {
            let error = CheckError::NoProjectOpen;
            self.host()
                .notify(Notice::new(error.notice_level(), error.to_string()));
            return CheckReport::empty(CheckStatus::Error(error));
        };

        match self.fetcher.fetch_outdated(Some(root)).await {
            Ok(OutdatedOutput::Empty) => {
                self.retain(Vec::new());
                CheckReport::empty(CheckStatus::Empty)
            }
            Ok(OutdatedOutput::Entries(entries)) => {
                self.retain(entries.iter().map(|e| e.name.clone()).collect());
                CheckReport {
                    status: CheckStatus::Success,
                    records: entries.into_iter().map(DependencyRecord::from).collect(),
                }
            }
            Err(error) => CheckReport::empty(CheckStatus::Error(error)),
        }
    }

    /// Ordered list of outdated dependencies; empty on any failure
    pub async fn list_dependencies(&self) -> Vec<DependencyRecord> {
        self.check().await.records
    }

    /// Refresh only the retained names, without building records
    ///
    /// The retained list is left untouched when the check fails.
    pub async fn refresh_names(&self) -> Result<Vec<String>, CheckError> {
        let names = self.fetcher.fetch_names(self.project_root()).await?;
        self.retain(names.clone());
        Ok(names)
    }

    /// Names from the last successful check (possibly stale)
    pub fn retained_names(&self) -> Vec<String> {
        self.retained_lock().clone()
    }

    /// Tell observers the list changed so they request it again
    pub fn refresh(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Number of refreshes so far
    pub fn revision(&self) -> u64 {
        *self.changes.borrow()
    }

    fn retain(&self, names: Vec<String>) {
        *self.retained_lock() = names;
    }

    fn retained_lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.retained
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
