//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// branchwork - a branch tree with file-level merges
#[derive(Parser, Debug)]
#[command(name = "bw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if bw was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// One line typed into `bw shell`.
///
/// Accepts the same commands as the binary, without the program name.
#[derive(Parser, Debug)]
#[command(name = "bw", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create, delete or list branches
    #[command(
        name = "branch",
        group(ArgGroup::new("mode").required(true).args(["name", "delete", "list"])),
        long_about = "Create, delete or list branches.\n\n\
            With a name, creates a new empty branch under the current branch. \
            Names must be unique among siblings only.",
        after_help = "\
EXAMPLES:
    # Create a branch under the current branch
    bw branch feature

    # Delete a branch (only branches without children are removed)
    bw branch -d feature

    # Show the whole tree
    bw branch --list"
    )]
    Branch {
        /// Name of the branch to create
        name: Option<String>,

        /// Delete the named branch
        #[arg(short = 'd', long = "delete", value_name = "NAME")]
        delete: Option<String>,

        /// List all branches as an indented tree
        #[arg(long)]
        list: bool,
    },

    /// Switch the current branch
    #[command(
        name = "checkout",
        long_about = "Switch the current branch.\n\n\
            Searches the tree from the root, checking each branch before its \
            children. The current branch is not remembered between runs; use \
            `bw shell` to keep it across commands."
    )]
    Checkout {
        /// Branch to switch to
        name: String,
    },

    /// Merge a branch into the current branch
    #[command(
        name = "merge",
        long_about = "Merge a branch into the current branch.\n\n\
            Compares the latest file table of SOURCE with the current branch's, \
            folds the differences in and records one merge commit."
    )]
    Merge {
        /// Branch to merge from
        source: String,
    },

    /// Show the current branch
    Status,

    /// Show the commit log of a branch
    Log {
        /// Branch to show (defaults to current)
        branch: Option<String>,
    },

    /// Run commands interactively against one open tree
    #[command(
        name = "shell",
        long_about = "Run commands interactively against one open tree.\n\n\
            Reads one command per line from stdin, e.g. `checkout feature` or \
            `git merge hotfix`. A leading `git` is ignored. Type `exit` to quit."
    )]
    Shell,

    /// Get, set, or list configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Command {
    /// Check if the command can change the branch tree.
    pub fn is_mutating(&self) -> bool {
        match self {
            Command::Branch { list, .. } => !list,
            Command::Checkout { .. } | Command::Merge { .. } | Command::Shell => true,
            Command::Status
            | Command::Log { .. }
            | Command::Config { .. }
            | Command::Completion { .. } => false,
        }
    }
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a repo configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("bw").chain(args.iter().copied()))
    }

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
        ShellLine::command().debug_assert();
    }

    #[test]
    fn branch_create() {
        let cli = parse(&["branch", "feature"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Branch { name: Some(ref n), delete: None, list: false } if n == "feature"
        ));
    }

    #[test]
    fn branch_delete() {
        let cli = parse(&["branch", "-d", "feature"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Branch { name: None, delete: Some(ref n), list: false } if n == "feature"
        ));
    }

    #[test]
    fn branch_list() {
        let cli = parse(&["branch", "--list"]).unwrap();
        assert!(matches!(cli.command, Command::Branch { list: true, .. }));
        assert!(!cli.command.is_mutating());
    }

    #[test]
    fn branch_requires_exactly_one_mode() {
        assert!(parse(&["branch"]).is_err());
        assert!(parse(&["branch", "--list", "x"]).is_err());
        assert!(parse(&["branch", "-d", "a", "b"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["merge", "feature", "--quiet", "--cwd", "/tmp"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.cwd, Some(PathBuf::from("/tmp")));
        assert!(cli.command.is_mutating());
    }

    #[test]
    fn shell_line_without_binary_name() {
        let line = ShellLine::try_parse_from(["checkout", "feature"]).unwrap();
        assert!(matches!(line.command, Command::Checkout { ref name } if name == "feature"));
    }
}
