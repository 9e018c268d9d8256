//! Dependency records shown to the user

use super::RawOutdatedEntry;
use serde::Serialize;
use std::fmt;

/// Marker placed in front of packages with a major update
pub const MAJOR_UPDATE_MARKER: &str = "⚠️";

/// An outdated dependency as presented to the user
///
/// Built fresh on every refresh and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRecord {
    /// Package name
    pub name: String,
    /// Installed version (empty when not installed)
    pub current_version: String,
    /// Highest version satisfying the range in package.json
    pub wanted_version: String,
    /// Newest version on the registry
    pub latest_version: String,
    /// Whether the leading segment of `latest_version` differs from `wanted_version`
    pub is_major_update: bool,
}

impl DependencyRecord {
    /// Creates a record, classifying the update from `wanted` and `latest`
    pub fn new(
        name: impl Into<String>,
        current: impl Into<String>,
        wanted: impl Into<String>,
        latest: impl Into<String>,
    ) -> Self {
        let wanted = wanted.into();
        let latest = latest.into();
        let is_major_update = super::is_major_update(&wanted, &latest);
        Self {
            name: name.into(),
            current_version: current.into(),
            wanted_version: wanted,
            latest_version: latest,
            is_major_update,
        }
    }

    /// Installed version for display
    pub fn installed(&self) -> &str {
        if self.current_version.is_empty() {
            "missing"
        } else {
            &self.current_version
        }
    }

    /// Item label, prefixed with the warning marker for major updates
    pub fn label(&self) -> String {
        if self.is_major_update {
            format!("{} {}", MAJOR_UPDATE_MARKER, self.name)
        } else {
            self.name.clone()
        }
    }

    /// One-line summary of the three versions
    pub fn description(&self) -> String {
        let mut text = format!(
            "Installed: {} → Wanted: {}, Latest: {}",
            self.installed(),
            self.wanted_version,
            self.latest_version
        );
        if self.is_major_update {
            text.push_str(&format!(" {} Major update!", MAJOR_UPDATE_MARKER));
        }
        text
    }

    /// Multi-line detail text
    pub fn tooltip(&self) -> String {
        let mut text = format!(
            "Installed: {}\nWanted (package.json): {}\nLatest (npm registry): {}",
            self.installed(),
            self.wanted_version,
            self.latest_version
        );
        if self.is_major_update {
            text.push_str(&format!("\n{} Major update available", MAJOR_UPDATE_MARKER));
        }
        text
    }
}

impl From<RawOutdatedEntry> for DependencyRecord {
    fn from(entry: RawOutdatedEntry) -> Self {
        Self::new(entry.name, entry.current, entry.wanted, entry.latest)
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.description())
    }
}
