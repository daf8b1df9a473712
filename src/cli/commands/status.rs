//! status command - Show the current branch

use anyhow::Result;

use super::Session;

/// Print the name of the checked-out branch.
pub fn status(session: &mut Session) -> Result<()> {
    println!("{}", session.manager().current_branch_name());
    Ok(())
}
