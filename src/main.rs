//! nodeup - outdated npm dependency helper
//!
//! Lists the outdated dependencies of a Node.js project and updates one or
//! all of them to their latest versions.

use clap::Parser;
use colored::Colorize;
use nodeup::cli::{CliArgs, Command};
use nodeup::error::{CheckError, UpdateError};
use nodeup::executor::UpdateExecutor;
use nodeup::fetcher::OutdatedFetcher;
use nodeup::host::{Host, Notice, TerminalHost};
use nodeup::model::DependencyReport;
use nodeup::output::{create_formatter, legend, OutputConfig, OutputFormatter, Verbosity};
use nodeup::package_manager::{PackageManager, SystemRunner};
use nodeup::registry::{open_package_page, package_url};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let verbosity = args.verbosity();
    if verbosity == Verbosity::Verbose {
        eprintln!("nodeup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Project: {}", args.path.display());
    }

    let host = Arc::new(TerminalHost::new(verbosity, args.assume_yes()));
    let project_root = args.project_root();
    let fetcher = OutdatedFetcher::new(
        Arc::new(SystemRunner::new()),
        host.clone(),
        PackageManager::new(args.npm.clone()),
    );
    let report = Arc::new(DependencyReport::new(fetcher, project_root.clone()));
    let formatter = create_formatter(OutputConfig::from_cli(
        args.json,
        args.verbose,
        args.quiet,
        args.no_color,
    ));

    match args.command() {
        Command::List => {
            let check = report.check().await;
            write_stdout(|out| formatter.format(&check, out))?;
            Ok(exit_code(!check.is_error()))
        }
        Command::Names => match report.refresh_names().await {
            Ok(names) => {
                write_stdout(|out| formatter.format_names(&names, out))?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                // npm failures were already shown by the fetcher
                if !matches!(e, CheckError::ToolInvocationFailed { .. }) {
                    host.notify(Notice::new(e.notice_level(), e.to_string()));
                }
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Update { name } => {
            let executor = UpdateExecutor::new(report.clone());
            let mut changes = report.subscribe();
            let result = executor
                .update_one(Some(&name), project_root.as_deref())
                .await
                .map(|_| ());
            if changes.has_changed().unwrap_or(false) {
                changes.mark_unchanged();
                rerender(&report, formatter.as_ref()).await?;
            }
            Ok(update_exit_code(&result))
        }
        Command::UpdateAll { .. } => {
            let executor = UpdateExecutor::new(report.clone());
            let mut changes = report.subscribe();
            let result = executor
                .update_all(project_root.as_deref())
                .await
                .map(|_| ());
            if changes.has_changed().unwrap_or(false) {
                changes.mark_unchanged();
                rerender(&report, formatter.as_ref()).await?;
            }
            Ok(update_exit_code(&result))
        }
        Command::Open { name, print } => {
            if print {
                println!("{}", package_url(&args.registry, &name));
                return Ok(ExitCode::SUCCESS);
            }
            match open_package_page(host.as_ref(), &args.registry, &name) {
                Ok(_) => Ok(ExitCode::SUCCESS),
                Err(e) => {
                    host.error(&format!(
                        "Could not open {}: {}",
                        package_url(&args.registry, &name),
                        e
                    ));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Legend => {
            println!("{}", legend());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Re-list the dependencies after the report signalled a change
async fn rerender(report: &DependencyReport, formatter: &dyn OutputFormatter) -> io::Result<()> {
    let check = report.check().await;
    write_stdout(|out| formatter.format(&check, out))
}

/// Write to a locked stdout and flush
fn write_stdout<F>(write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let mut stdout = io::stdout().lock();
    write(&mut stdout)?;
    stdout.flush()
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Cancelling or having nothing to update is not a failure
fn update_exit_code(result: &Result<(), UpdateError>) -> ExitCode {
    match result {
        Ok(()) | Err(UpdateError::UserCancelled) | Err(UpdateError::NothingToUpdate) => {
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
