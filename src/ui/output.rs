//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! Diagnostics go to stderr; command results go to stdout. Debug detail is
//! not printed here, it is emitted as `tracing` events.

use std::fmt::Display;

use crate::core::commit::Commit;
use crate::core::manager::BranchEntry;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Render a preorder branch listing, `indent` spaces per level.
///
/// The checked-out branch gets a ` (current)` suffix.
pub fn format_branch_listing(entries: &[BranchEntry], indent: usize) -> String {
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.current { " (current)" } else { "" };
            format!(
                "{}{}{}",
                " ".repeat(indent * entry.depth),
                entry.name,
                marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a commit log, newest first.
///
/// Each commit is a `<id> <message>` line followed by its files, one per
/// line as `    <path>: <content>`.
pub fn format_commit_log(commits: &[Commit]) -> String {
    let mut lines = Vec::new();
    for commit in commits.iter().rev() {
        lines.push(format!("{} {}", commit.id(), commit.message()));
        for (path, content) in commit.files() {
            lines.push(format!("    {}: {}", path, content));
        }
    }
    lines.join("\n")
}
