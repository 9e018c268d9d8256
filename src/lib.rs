//! nodeup - outdated npm dependency helper library
//!
//! This library provides the core functionality for:
//! - Listing outdated packages reported by `npm outdated --json`
//! - Classifying updates as major or minor/patch
//! - Installing one or all packages at `@latest`

pub mod cli;
pub mod domain;
pub mod error;
pub mod executor;
pub mod fetcher;
pub mod host;
pub mod model;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod registry;
