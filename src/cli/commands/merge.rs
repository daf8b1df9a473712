//! merge command - Merge a branch into the current branch

use anyhow::Result;

use super::Session;
use crate::ui::output;

/// Merge `source` into the current branch.
///
/// The source is resolved by postorder search, so with duplicate names the
/// deepest match in the first matching subtree wins.
pub fn merge(session: &mut Session, source: &str) -> Result<()> {
    let commit = session.manager_mut().merge(source)?;
    let target = session.manager().current_branch_name();

    output::success(
        format!("Merged {} into {} ({})", source, target, commit.id()),
        session.verbosity(),
    );
    Ok(())
}
