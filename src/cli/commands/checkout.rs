//! checkout command - Switch the current branch

use anyhow::{bail, Result};

use super::Session;
use crate::ui::output;

/// Switch to the named branch.
///
/// # Arguments
///
/// * `session` - Open branch tree
/// * `name` - Branch to check out
pub fn checkout(session: &mut Session, name: &str) -> Result<()> {
    if !session.manager_mut().checkout(name)? {
        bail!("Branch {} not found", name);
    }

    output::success(format!("Switched to branch {}", name), session.verbosity());
    Ok(())
}
