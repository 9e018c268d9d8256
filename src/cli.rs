//! CLI argument parsing module for nodeup

use crate::output::Verbosity;
use crate::package_manager::DEFAULT_NPM;
use crate::registry::NPM_WEBSITE_URL;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// List outdated npm dependencies and update them
#[derive(Parser, Debug, Clone)]
#[command(name = "nodeup", version, about = "List outdated npm dependencies and update them")]
pub struct CliArgs {
    /// Project directory containing package.json
    #[arg(short, long, global = true, default_value = ".")]
    pub path: PathBuf,

    /// npm executable to run
    #[arg(long, global = true, value_name = "PROGRAM", default_value = DEFAULT_NPM)]
    pub npm: String,

    /// Base URL of the package website used by `open`
    #[arg(long, global = true, value_name = "URL", default_value = NPM_WEBSITE_URL)]
    pub registry: String,

    /// Output results in JSON format (list, names)
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - only warnings and errors (overrides --verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check for outdated dependencies (default)
    List,

    /// Print only the names of outdated packages
    Names,

    /// Update one package to its latest version
    Update {
        /// Package name
        name: String,
    },

    /// Update every outdated package to its latest version
    UpdateAll {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Open the npm page of a package in the browser
    Open {
        /// Package name
        name: String,

        /// Print the URL instead of opening it
        #[arg(long)]
        print: bool,
    },

    /// Explain the version columns
    Legend,
}

impl CliArgs {
    /// Subcommand to run, `list` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::List)
    }

    /// Verbosity selected by `--verbose` / `--quiet`
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }

    /// Whether confirmation prompts are answered automatically
    pub fn assume_yes(&self) -> bool {
        matches!(self.command, Some(Command::UpdateAll { yes: true }))
    }

    /// Project directory, `None` unless `--path` names an existing directory
    pub fn project_root(&self) -> Option<PathBuf> {
        if self.path.is_dir() {
            Some(self.path.clone())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["nodeup"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.npm, DEFAULT_NPM);
        assert_eq!(args.registry, NPM_WEBSITE_URL);
        assert!(!args.json);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.no_color);
        assert_eq!(args.command, None);
        assert_eq!(args.command(), Command::List);
    }

    #[test]
    fn test_path_argument() {
        let args = CliArgs::parse_from(["nodeup", "--path", "/some/path"]);
        assert_eq!(args.path, PathBuf::from("/some/path"));

        let args = CliArgs::parse_from(["nodeup", "list", "-p", "/other"]);
        assert_eq!(args.path, PathBuf::from("/other"));
    }

    #[test]
    fn test_update_subcommand() {
        let args = CliArgs::parse_from(["nodeup", "update", "lodash"]);
        assert_eq!(
            args.command(),
            Command::Update {
                name: "lodash".to_string()
            }
        );
        assert!(!args.assume_yes());
    }

    #[test]
    fn test_update_all_yes() {
        let args = CliArgs::parse_from(["nodeup", "update-all", "--yes"]);
        assert_eq!(args.command(), Command::UpdateAll { yes: true });
        assert!(args.assume_yes());

        let args = CliArgs::parse_from(["nodeup", "update-all"]);
        assert!(!args.assume_yes());
    }

    #[test]
    fn test_open_subcommand() {
        let args = CliArgs::parse_from(["nodeup", "open", "@types/node", "--print"]);
        assert_eq!(
            args.command(),
            Command::Open {
                name: "@types/node".to_string(),
                print: true
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["nodeup", "names", "--json", "--npm", "pnpm"]);
        assert_eq!(args.command(), Command::Names);
        assert!(args.json);
        assert_eq!(args.npm, "pnpm");
    }

    #[test]
    fn test_verbosity() {
        let args = CliArgs::parse_from(["nodeup", "--verbose"]);
        assert_eq!(args.verbosity(), Verbosity::Verbose);

        let args = CliArgs::parse_from(["nodeup", "-q"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);

        let args = CliArgs::parse_from(["nodeup", "-q", "--verbose"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();
        let args = CliArgs::parse_from(["nodeup", "--path", path]);
        assert_eq!(args.project_root(), Some(dir.path().to_path_buf()));

        let missing = dir.path().join("missing");
        let args = CliArgs::parse_from(["nodeup", "--path", missing.to_str().unwrap()]);
        assert_eq!(args.project_root(), None);
    }

    #[test]
    fn test_legend_subcommand() {
        let args = CliArgs::parse_from(["nodeup", "legend"]);
        assert_eq!(args.command(), Command::Legend);
    }
}
