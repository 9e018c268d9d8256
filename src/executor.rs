//! Update executor
//!
//! Installs one package or every outdated package at `@latest` and asks the
//! report model to refresh once npm succeeds. Failures are shown verbatim and
//! never retried.

use crate::error::UpdateError;
use crate::fetcher::exit_summary;
use crate::host::{Host, Notice};
use crate::model::DependencyReport;
use crate::package_manager::CommandOutput;
use std::path::Path;
use std::sync::Arc;

/// Question asked before a bulk update
pub const UPDATE_ALL_QUESTION: &str =
    "Are you sure you want to update all outdated dependencies to their latest versions?";

/// Label of the affirmative answer to [`UPDATE_ALL_QUESTION`]
pub const UPDATE_ALL_ACCEPT: &str = "Yes, Update All";

/// Status shown while a bulk update runs
const UPDATING_ALL_STATUS: &str = "Node.js Updater: Updating all dependencies...";

/// Runs npm install for the packages of a report
pub struct UpdateExecutor {
    report: Arc<DependencyReport>,
}

impl UpdateExecutor {
    /// Create an executor bound to `report`
    pub fn new(report: Arc<DependencyReport>) -> Self {
        Self { report }
    }

    /// The report refreshed after updates
    pub fn report(&self) -> &Arc<DependencyReport> {
        &self.report
    }

    fn host(&self) -> &Arc<dyn Host> {
        self.report.host()
    }

    /// Install `name@latest` in `project_root`
    ///
    /// Returns the updated package name.
    pub async fn update_one(
        &self,
        name: Option<&str>,
        project_root: Option<&Path>,
    ) -> Result<String, UpdateError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let (Some(name), Some(root)) = (name, project_root) else {
            return Err(self.fail(UpdateError::MissingTarget));
        };

        let progress = format!("Updating {} to latest...", name);
        self.host().info(&progress);
        self.host().set_status(Some(&progress));

        let names = vec![name.to_string()];
        let output = self.install(&names, root).await;
        self.host().set_status(None);

        if !output.success {
            return Err(self.fail(UpdateError::update_failed(name, output.diagnostic())));
        }

        self.host().info(&format!("{} updated to latest.", name));
        self.report.refresh();
        Ok(name.to_string())
    }

    /// Install every retained package at `@latest` in one npm command
    ///
    /// Re-runs the report first so the retained names are current, then asks
    /// the user to confirm. Returns the names that were installed.
    pub async fn update_all(&self, project_root: Option<&Path>) -> Result<Vec<String>, UpdateError> {
        let Some(root) = project_root else {
            return Err(self.fail(UpdateError::NoProjectOpen));
        };

        self.report.list_dependencies().await;

        let names = self.report.retained_names();
        if names.is_empty() {
            return Err(self.fail(UpdateError::NothingToUpdate));
        }

        if !self.host().confirm(UPDATE_ALL_QUESTION, UPDATE_ALL_ACCEPT) {
            return Err(self.fail(UpdateError::UserCancelled));
        }

        self.host().set_status(Some(UPDATING_ALL_STATUS));
        let output = self.install(&names, root).await;
        self.host().set_status(None);

        if !output.success {
            return Err(self.fail(UpdateError::update_failed(
                "all dependencies",
                output.diagnostic(),
            )));
        }

        self.host()
            .info("✅ All dependencies updated successfully.");
        self.report.refresh();
        Ok(names)
    }

    async fn install(&self, names: &[String], root: &Path) -> CommandOutput {
        let fetcher = self.report.fetcher();
        let package_manager = fetcher.package_manager();
        let args = package_manager.install_latest_args(names);

        self.host().trace(&format!(
            "running `{}` in {}",
            package_manager.command_line(&args),
            root.display()
        ));
        let output = package_manager
            .install_latest(fetcher.runner().as_ref(), names, root)
            .await;
        self.host().trace(&exit_summary(&output));
        output
    }

    /// Show `error` at its notice level and hand it back
    fn fail(&self, error: UpdateError) -> UpdateError {
        self.host()
            .notify(Notice::new(error.notice_level(), error.to_string()));
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{OutdatedFetcher, MANIFEST_FILE, MODULES_DIR};
    use crate::host::{NoticeLevel, RecordingHost};
    use crate::package_manager::{CommandRunner, PackageManager};
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Runner answering `outdated` and `install` with fixed outputs
    struct FakeNpm {
        outdated: CommandOutput,
        install: CommandOutput,
        installs: Mutex<Vec<Vec<String>>>,
    }

    impl FakeNpm {
        fn new(outdated: CommandOutput, install: CommandOutput) -> Arc<Self> {
            Arc::new(Self {
                outdated,
                install,
                installs: Mutex::new(Vec::new()),
            })
        }

        fn installs(&self) -> Vec<Vec<String>> {
            self.installs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for FakeNpm {
        async fn run(&self, _program: &str, args: &[String], _dir: &Path) -> CommandOutput {
            if args.first().map(String::as_str) == Some("install") {
                self.installs.lock().unwrap().push(args[1..].to_vec());
                self.install.clone()
            } else {
                self.outdated.clone()
            }
        }
    }

    const OUTDATED: &str = r#"{
      "pkg-a": {"current": "1.0.0", "wanted": "1.2.0", "latest": "2.0.0"},
      "pkg-b": {"current": "1.0.0", "wanted": "1.2.0", "latest": "1.5.0"}
    }"#;

    fn ready_project() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();
        fs::create_dir(dir.path().join(MODULES_DIR)).unwrap();
        dir
    }

    fn executor(npm: Arc<FakeNpm>, host: Arc<RecordingHost>, root: &Path) -> UpdateExecutor {
        let fetcher = OutdatedFetcher::new(npm, host, PackageManager::new("npm"));
        let report = DependencyReport::new(fetcher, Some(root.to_path_buf()));
        UpdateExecutor::new(Arc::new(report))
    }

    #[tokio::test]
    async fn test_update_one_success_refreshes() {
        let dir = ready_project();
        let npm = FakeNpm::new(CommandOutput::success("{}"), CommandOutput::success("added 1"));
        let host = Arc::new(RecordingHost::new());
        let executor = executor(npm.clone(), host.clone(), dir.path());
        let changes = executor.report().subscribe();

        let updated = executor
            .update_one(Some("lodash"), Some(dir.path()))
            .await
            .unwrap();
        assert_eq!(updated, "lodash");
        assert_eq!(npm.installs(), vec![vec!["lodash@latest".to_string()]]);
        assert_eq!(
            host.messages(NoticeLevel::Info),
            vec!["Updating lodash to latest...", "lodash updated to latest."]
        );
        assert!(changes.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_update_one_failure_shows_stderr() {
        let dir = ready_project();
        let npm = FakeNpm::new(
            CommandOutput::success("{}"),
            CommandOutput::failure(1, "", "npm ERR! 404 'nope@latest' is not in this registry."),
        );
        let host = Arc::new(RecordingHost::new());
        let executor = executor(npm, host.clone(), dir.path());

        let err = executor
            .update_one(Some("nope"), Some(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateError::UpdateFailed { .. }));
        assert_eq!(
            host.messages(NoticeLevel::Error),
            vec!["Failed to update nope: npm ERR! 404 'nope@latest' is not in this registry."]
        );
        assert_eq!(executor.report().revision(), 0);
    }

    #[tokio::test]
    async fn test_update_one_requires_name_and_root() {
        let dir = ready_project();
        let npm = FakeNpm::new(CommandOutput::success("{}"), CommandOutput::success(""));
        let host = Arc::new(RecordingHost::new());
        let executor = executor(npm.clone(), host.clone(), dir.path());

        assert_eq!(
            executor.update_one(None, Some(dir.path())).await,
            Err(UpdateError::MissingTarget)
        );
        assert_eq!(
            executor.update_one(Some("  "), Some(dir.path())).await,
            Err(UpdateError::MissingTarget)
        );
        assert_eq!(
            executor.update_one(Some("lodash"), None).await,
            Err(UpdateError::MissingTarget)
        );
        assert!(npm.installs().is_empty());
        assert_eq!(host.messages(NoticeLevel::Error).len(), 3);
    }

    #[tokio::test]
    async fn test_update_all_confirmed_installs_once() {
        let dir = ready_project();
        let npm = FakeNpm::new(
            CommandOutput::failure(1, OUTDATED, ""),
            CommandOutput::success("changed 2 packages"),
        );
        let host = Arc::new(RecordingHost::with_confirm_reply(true));
        let executor = executor(npm.clone(), host.clone(), dir.path());

        let names = executor.update_all(Some(dir.path())).await.unwrap();
        assert_eq!(names, vec!["pkg-a", "pkg-b"]);
        assert_eq!(host.confirm_calls(), 1);
        assert_eq!(
            npm.installs(),
            vec![vec!["pkg-a@latest".to_string(), "pkg-b@latest".to_string()]]
        );
        assert!(host
            .messages(NoticeLevel::Info)
            .contains(&"✅ All dependencies updated successfully.".to_string()));
        assert_eq!(executor.report().revision(), 1);
    }

    #[tokio::test]
    async fn test_update_all_declined_installs_nothing() {
        let dir = ready_project();
        let npm = FakeNpm::new(CommandOutput::failure(1, OUTDATED, ""), CommandOutput::success(""));
        let host = Arc::new(RecordingHost::with_confirm_reply(false));
        let executor = executor(npm.clone(), host.clone(), dir.path());

        let err = executor.update_all(Some(dir.path())).await.unwrap_err();
        assert_eq!(err, UpdateError::UserCancelled);
        assert_eq!(host.confirm_calls(), 1);
        assert!(npm.installs().is_empty());
        assert!(host
            .messages(NoticeLevel::Info)
            .contains(&"Update cancelled.".to_string()));
    }

    #[tokio::test]
    async fn test_update_all_nothing_outdated_never_prompts() {
        let dir = ready_project();
        let npm = FakeNpm::new(CommandOutput::success("{}"), CommandOutput::success(""));
        let host = Arc::new(RecordingHost::new());
        let executor = executor(npm.clone(), host.clone(), dir.path());

        let err = executor.update_all(Some(dir.path())).await.unwrap_err();
        assert_eq!(err, UpdateError::NothingToUpdate);
        assert_eq!(host.confirm_calls(), 0);
        assert!(npm.installs().is_empty());
    }

    #[tokio::test]
    async fn test_update_all_failure_single_notice() {
        let dir = ready_project();
        let npm = FakeNpm::new(
            CommandOutput::failure(1, OUTDATED, ""),
            CommandOutput::failure(1, "", "npm ERR! ERESOLVE unable to resolve dependency tree"),
        );
        let host = Arc::new(RecordingHost::new());
        let executor = executor(npm, host.clone(), dir.path());

        let err = executor.update_all(Some(dir.path())).await.unwrap_err();
        assert!(matches!(err, UpdateError::UpdateFailed { .. }));
        assert_eq!(
            host.messages(NoticeLevel::Error),
            vec!["Failed to update all dependencies: npm ERR! ERESOLVE unable to resolve dependency tree"]
        );
        assert_eq!(executor.report().revision(), 0);
    }

    #[tokio::test]
    async fn test_update_all_without_project() {
        let dir = ready_project();
        let npm = FakeNpm::new(CommandOutput::failure(1, OUTDATED, ""), CommandOutput::success(""));
        let host = Arc::new(RecordingHost::new());
        let executor = executor(npm.clone(), host.clone(), dir.path());

        let err = executor.update_all(None).await.unwrap_err();
        assert_eq!(err, UpdateError::NoProjectOpen);
        assert_eq!(host.messages(NoticeLevel::Error), vec!["No workspace folder open."]);
        assert_eq!(host.confirm_calls(), 0);
    }
}
