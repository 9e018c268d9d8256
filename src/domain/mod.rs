//! Core domain models for nodeup
//!
//! This module contains the fundamental types used throughout the application:
//! - Version classification (major vs minor/patch)
//! - Raw entries reported by `npm outdated --json`
//! - Dependency records shown to the user

mod dependency;
mod outdated_entry;
mod version;

pub use dependency::{DependencyRecord, MAJOR_UPDATE_MARKER};
pub use outdated_entry::{parse_outdated_output, OutdatedOutput, RawOutdatedEntry};
pub use version::is_major_update;
