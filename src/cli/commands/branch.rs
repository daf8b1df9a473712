//! branch command - Create, delete or list branches

use anyhow::{Context as _, Result};
use tracing::debug;

use super::Session;
use crate::core::types::BranchName;
use crate::ui::output;

/// Create a branch under the current branch.
pub fn create(session: &mut Session, name: &str) -> Result<()> {
    let name = BranchName::new(name).context("Invalid branch name")?;
    session.manager_mut().create_branch(name.clone())?;

    output::success(format!("Created branch {}", name), session.verbosity());
    Ok(())
}

/// Delete a branch.
///
/// Missing branches and branches with children are left alone without an
/// error; only an actual removal is reported.
pub fn delete(session: &mut Session, name: &str) -> Result<()> {
    if session.manager_mut().delete_branch(name)? {
        output::success(format!("Deleted branch {}", name), session.verbosity());
    } else {
        debug!(branch = name, "nothing deleted");
    }
    Ok(())
}

/// Print the branch tree in preorder.
pub fn list(session: &mut Session) -> Result<()> {
    let entries = session.manager().list_branches();

    println!("Branches:");
    println!(
        "{}",
        output::format_branch_listing(&entries, session.list_indent())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::context;
    use super::*;

    #[test]
    fn create_then_delete() {
        let (_dir, ctx) = context();
        let mut session = Session::open(&ctx, true).unwrap();

        create(&mut session, "feature").unwrap();
        assert_eq!(session.manager().tree().len(), 2);

        delete(&mut session, "feature").unwrap();
        assert_eq!(session.manager().tree().len(), 1);
    }

    #[test]
    fn create_rejects_invalid_name() {
        let (_dir, ctx) = context();
        let mut session = Session::open(&ctx, true).unwrap();

        let err = create(&mut session, "-x").unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid branch name"));
        assert_eq!(session.manager().tree().len(), 1);
    }

    #[test]
    fn create_duplicate_sibling_fails() {
        let (_dir, ctx) = context();
        let mut session = Session::open(&ctx, true).unwrap();

        create(&mut session, "feature").unwrap();
        let err = create(&mut session, "feature").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn delete_missing_is_not_an_error() {
        let (_dir, ctx) = context();
        let mut session = Session::open(&ctx, true).unwrap();
        assert!(delete(&mut session, "ghost").is_ok());
    }
}
