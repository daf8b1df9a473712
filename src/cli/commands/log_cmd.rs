//! log command - Show the commit log of a branch

use anyhow::{anyhow, Result};

use super::Session;
use crate::ui::output;

/// Print a branch's commits, newest first.
///
/// # Arguments
///
/// * `session` - Open branch tree
/// * `branch` - Branch to show, found by postorder search; defaults to the
///   current branch
pub fn log(session: &mut Session, branch: Option<&str>) -> Result<()> {
    let manager = session.manager();
    let node = match branch {
        Some(name) => manager
            .find_branch(name)
            .ok_or_else(|| anyhow!("Branch {} not found", name))?,
        None => manager.current_branch(),
    };

    if node.commits().is_empty() {
        output::print(
            format!("No commits on {}", node.name()),
            session.verbosity(),
        );
        return Ok(());
    }

    println!("{}", output::format_commit_log(node.commits()));
    Ok(())
}
