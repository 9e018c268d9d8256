//! Outdated report fetcher
//!
//! Checks that the project is ready, runs `npm outdated --json` in the project
//! root and turns its output into [`RawOutdatedEntry`] values. Every failure is
//! reported to the host as a notice and returned as a [`CheckError`].

use crate::domain::{parse_outdated_output, OutdatedOutput, RawOutdatedEntry, MAJOR_UPDATE_MARKER};
use crate::error::CheckError;
use crate::host::{Host, Notice};
use crate::package_manager::{CommandOutput, CommandRunner, PackageManager};
use std::path::Path;
use std::sync::Arc;

/// Manifest file expected at the project root
pub const MANIFEST_FILE: &str = "package.json";

/// Directory npm installs dependencies into
pub const MODULES_DIR: &str = "node_modules";

/// Status shown while npm runs
const CHECKING_STATUS: &str = "Node.js Updater: Checking for outdated dependencies...";

/// Notice shown when nothing is outdated
pub const UP_TO_DATE_MESSAGE: &str = "Nothing to update — All dependencies are up-to-date 🎉";

/// Runs the outdated check for a project directory
pub struct OutdatedFetcher {
    runner: Arc<dyn CommandRunner>,
    host: Arc<dyn Host>,
    package_manager: PackageManager,
}

impl OutdatedFetcher {
    /// Create a new fetcher
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        host: Arc<dyn Host>,
        package_manager: PackageManager,
    ) -> Self {
        Self {
            runner,
            host,
            package_manager,
        }
    }

    /// Host notices are sent to
    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    /// Runner used for external commands
    pub fn runner(&self) -> &Arc<dyn CommandRunner> {
        &self.runner
    }

    /// npm command lines
    pub fn package_manager(&self) -> &PackageManager {
        &self.package_manager
    }

    /// Fetch the outdated packages of `project_root`
    ///
    /// Emits the up-to-date notice on an empty report and one aggregate notice
    /// naming every package with a major update.
    pub async fn fetch_outdated(
        &self,
        project_root: Option<&Path>,
    ) -> Result<OutdatedOutput, CheckError> {
        let result = self.check(project_root, true).await;

        match &result {
            Ok(OutdatedOutput::Empty) => self.host.info(UP_TO_DATE_MESSAGE),
            Ok(OutdatedOutput::Entries(entries)) => {
                let majors = major_update_names(entries);
                if !majors.is_empty() {
                    self.host.info(&format!(
                        "{} Major updates available for: {}.",
                        MAJOR_UPDATE_MARKER,
                        majors.join(", ")
                    ));
                }
            }
            Err(e) => self.report(e),
        }

        result
    }

    /// Fetch only the names of outdated packages
    ///
    /// Same command and the same empty/failure handling as
    /// [`fetch_outdated`](Self::fetch_outdated), without classification. Only a
    /// failing npm command is reported to the user.
    pub async fn fetch_names(&self, project_root: Option<&Path>) -> Result<Vec<String>, CheckError> {
        let result = self.check(project_root, false).await;
        match &result {
            Err(e @ CheckError::ToolInvocationFailed { .. }) => self.report(e),
            Err(e) => self.host.trace(&e.to_string()),
            Ok(_) => {}
        }
        result.map(|output| output.names())
    }

    /// Validate the project, run npm and parse its output
    async fn check(
        &self,
        project_root: Option<&Path>,
        show_status: bool,
    ) -> Result<OutdatedOutput, CheckError> {
        let root = check_project(project_root)?;

        let args = self.package_manager.outdated_args();
        self.host.trace(&format!(
            "running `{}` in {}",
            self.package_manager.command_line(&args),
            root.display()
        ));

        if show_status {
            self.host.set_status(Some(CHECKING_STATUS));
        }
        let output = self.package_manager.outdated(self.runner.as_ref(), root).await;
        if show_status {
            self.host.set_status(None);
        }

        self.host.trace(&exit_summary(&output));
        interpret_output(&output)
    }

    fn report(&self, error: &CheckError) {
        self.host
            .notify(Notice::new(error.notice_level(), error.to_string()));
    }
}

/// Check the preconditions for running npm in `project_root`
pub fn check_project(project_root: Option<&Path>) -> Result<&Path, CheckError> {
    let root = project_root.ok_or(CheckError::NoProjectOpen)?;

    let manifest = root.join(MANIFEST_FILE);
    if !manifest.is_file() {
        return Err(CheckError::ManifestMissing { path: manifest });
    }

    let modules = root.join(MODULES_DIR);
    if !modules.is_dir() {
        return Err(CheckError::DependenciesNotInstalled { path: modules });
    }

    Ok(root)
}

/// Turn the captured npm output into a report
///
/// `npm outdated` exits with 1 whenever something is outdated, so a failed
/// status only counts as an error when nothing was printed.
fn interpret_output(output: &CommandOutput) -> Result<OutdatedOutput, CheckError> {
    if !output.success && !output.has_stdout() {
        return Err(CheckError::tool_invocation_failed(output.diagnostic()));
    }
    parse_outdated_output(&output.stdout)
}

/// Names of the entries whose latest version is a new major
pub fn major_update_names(entries: &[RawOutdatedEntry]) -> Vec<&str> {
    entries
        .iter()
        .filter(|e| e.is_major_update())
        .map(|e| e.name.as_str())
        .collect()
}

/// One-line description of how a command ended
pub(crate) fn exit_summary(output: &CommandOutput) -> String {
    match output.code {
        Some(code) => format!("npm exited with status {}", code),
        None => format!("npm did not run: {}", output.stderr.trim()),
    }
}
