//! core::manager
//!
//! The branch manager: owner of the tree and the checkout cursor.
//!
//! # Architecture
//!
//! `BranchManager` is the only mutator of tree structure. Every mutating
//! call updates the in-memory tree and then saves the whole tree through
//! its [`TreeStore`] before returning. Queries never save.
//!
//! The cursor (`current`) is a [`NodePath`] rather than a reference, so
//! structural changes re-derive it instead of leaving it dangling. It is
//! never persisted: opening a manager always starts at the root.
//!
//! # Failure Policy
//!
//! The operations deliberately report failures differently:
//!
//! | Operation | Failure | Reported as |
//! |---|---|---|
//! | `create_branch` | sibling with that name exists | `ManagerError::DuplicateBranch` |
//! | `merge` | source not found | `ManagerError::BranchNotFound` |
//! | `delete_branch` | not found, has children, or root | `Ok(false)`, nothing saved |
//! | `checkout` | not found | `Ok(false)`, cursor unchanged |
//!
//! Store failures always propagate as `ManagerError::Store`.
//!
//! # Example
//!
//! ```no_run
//! use branchwork::core::manager::BranchManager;
//! use branchwork::core::store::TreeStore;
//! use branchwork::core::types::BranchName;
//!
//! let mut manager = BranchManager::open(TreeStore::new(".branchwork/branches.json"))?;
//! manager.create_branch(BranchName::new("feature")?)?;
//! assert!(manager.checkout("feature")?);
//! manager.checkout("main")?;
//! manager.merge("feature")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;
use tracing::debug;

use super::commit::Commit;
use super::merge::MergePlan;
use super::store::{StoreError, TreeStore};
use super::traverse::{find_checkout, find_postorder, preorder};
use super::tree::{BranchNode, BranchTree, NodePath, TreeError};
use super::types::BranchName;

/// Errors from branch manager operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The current branch already has a child with this name.
    #[error("branch {0} already exists")]
    DuplicateBranch(String),

    /// The merge source could not be found.
    #[error("source branch {0} not found")]
    BranchNotFound(String),

    /// Loading or saving the tree failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One line of a branch listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEntry {
    /// Distance from the root (root is 0).
    pub depth: usize,
    pub name: BranchName,
    /// Whether this is the checked-out branch.
    pub current: bool,
}

/// Owns the branch tree and the checkout cursor.
#[derive(Debug)]
pub struct BranchManager {
    tree: BranchTree,
    current: NodePath,
    store: TreeStore,
}

impl BranchManager {
    /// Open the tree held by `store`, or start a fresh `main`-only tree if
    /// the store has nothing yet. The cursor starts at the root.
    ///
    /// # Errors
    ///
    /// Propagates any [`StoreError`] from loading, including malformed or
    /// invalid documents.
    pub fn open(store: TreeStore) -> Result<Self, StoreError> {
        let tree = store.load()?.unwrap_or_default();
        Ok(Self::with_tree(tree, store))
    }

    /// Wrap an already built tree. Nothing is saved until the first mutation.
    pub fn with_tree(tree: BranchTree, store: TreeStore) -> Self {
        Self {
            tree,
            current: NodePath::root(),
            store,
        }
    }

    pub fn tree(&self) -> &BranchTree {
        &self.tree
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// Path of the checked-out branch.
    pub fn current_path(&self) -> &NodePath {
        &self.current
    }

    /// The checked-out branch.
    pub fn current_branch(&self) -> &BranchNode {
        // The cursor is re-derived on every structural change.
        self.tree.node(&self.current).unwrap_or_else(|| self.tree.root())
    }

    /// Name of the checked-out branch.
    pub fn current_branch_name(&self) -> &BranchName {
        self.current_branch().name()
    }

    /// Add an empty branch named `name` under the current branch.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::DuplicateBranch`] if the current branch already has
    ///   a child with that name (branches elsewhere may share it)
    /// - [`ManagerError::Store`] if saving fails
    pub fn create_branch(&mut self, name: BranchName) -> Result<(), ManagerError> {
        let path = self
            .tree
            .add_child(&self.current, name.clone())
            .map_err(|e| match e {
                TreeError::DuplicateChild(name) => ManagerError::DuplicateBranch(name),
                TreeError::InvalidPath(path) => ManagerError::BranchNotFound(path.to_string()),
            })?;

        debug!(branch = %name, path = %path, "created branch");
        self.save()
    }

    /// Delete the first branch named `name` in postorder, if it is a leaf.
    ///
    /// Returns `Ok(true)` if a branch was removed. A missing name, a branch
    /// with children, or the root are all silent no-ops returning
    /// `Ok(false)`; nothing is saved in that case.
    pub fn delete_branch(&mut self, name: &str) -> Result<bool, ManagerError> {
        let Some(path) = find_postorder(self.tree.root(), name) else {
            debug!(branch = name, "delete: no such branch");
            return Ok(false);
        };

        if self.tree.remove_leaf(&path).is_none() {
            debug!(branch = name, path = %path, "delete: branch is root or has children");
            return Ok(false);
        }

        self.current = self.current.after_removal(&path);
        debug!(branch = name, path = %path, current = %self.current, "deleted branch");
        self.save()?;
        Ok(true)
    }

    /// Move the cursor to the first branch named `name` found by the
    /// deferred-last-child search.
    ///
    /// Returns `Ok(false)` and leaves the cursor alone if no branch has that
    /// name. A successful checkout saves the tree.
    pub fn checkout(&mut self, name: &str) -> Result<bool, ManagerError> {
        let Some(path) = find_checkout(self.tree.root(), name) else {
            debug!(branch = name, "checkout: no such branch");
            return Ok(false);
        };

        debug!(branch = name, path = %path, "checked out branch");
        self.current = path;
        self.save()?;
        Ok(true)
    }

    /// All branches in preorder, for display.
    pub fn list_branches(&self) -> Vec<BranchEntry> {
        let current = self.current_branch();
        preorder(self.tree.root())
            .into_iter()
            .map(|visit| BranchEntry {
                depth: visit.depth,
                name: visit.node.name().clone(),
                current: std::ptr::eq(visit.node, current),
            })
            .collect()
    }

    /// The first branch named `name` in postorder.
    pub fn find_branch(&self, name: &str) -> Option<&BranchNode> {
        find_postorder(self.tree.root(), name).and_then(|path| self.tree.node(&path))
    }

    /// Merge the branch named `source` (found in postorder) into the
    /// current branch and return the commit appended to it.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::BranchNotFound`] if no branch has that name
    /// - [`ManagerError::Store`] if saving fails
    pub fn merge(&mut self, source: &str) -> Result<Commit, ManagerError> {
        let source_path = find_postorder(self.tree.root(), source)
            .ok_or_else(|| ManagerError::BranchNotFound(source.to_string()))?;

        let plan = {
            let source_node = self
                .tree
                .node(&source_path)
                .ok_or_else(|| ManagerError::BranchNotFound(source.to_string()))?;
            let target_node = self.current_branch();
            MergePlan::build(
                source_node.name(),
                target_node.name(),
                &source_node.latest_files(),
                &target_node.latest_files(),
            )
        };

        debug!(
            source = source,
            target = %self.current_branch_name(),
            changed = plan.diff.len(),
            commit = %plan.commit.id(),
            marker = %plan.marker.id(),
            "merged branch"
        );

        let commit = plan.commit;
        self.tree
            .node_or_root_mut(&self.current)
            .push_commit(commit.clone());

        self.save()?;
        Ok(commit)
    }

    fn save(&self) -> Result<(), ManagerError> {
        self.store.save(&self.tree)?;
        Ok(())
    }
}
