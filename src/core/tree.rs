//! core::tree
//!
//! The branch tree.
//!
//! # Architecture
//!
//! The tree is an owned N-ary tree:
//! - Each [`BranchNode`] owns its children in insertion order
//! - Nodes are addressed by [`NodePath`], the child indices from the root
//! - The parent of a node is its path with the last index dropped
//!
//! Addressing by path instead of by reference keeps the tree free of
//! parent pointers; the path doubles as the non-owning back-reference
//! needed to splice a node out of its parent on deletion.
//!
//! # Invariants
//!
//! - Exactly one root, named `main`
//! - No two siblings share a name (checked on insertion)
//! - Only leaves are removed; the root is never removed
//! - Commit logs are append-only

use std::fmt;

use thiserror::Error;

use super::commit::Commit;
use super::types::{BranchName, FileTable};

/// Errors from structural tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A sibling with the same name already exists.
    #[error("branch {0} already exists")]
    DuplicateChild(String),

    /// The path does not address a node.
    #[error("no branch at path {0}")]
    InvalidPath(NodePath),
}

/// Location of a node: child indices walked from the root.
///
/// The root is the empty path.
///
/// # Example
///
/// ```
/// use branchwork::core::tree::NodePath;
///
/// let path = NodePath::root().child(0).child(2);
/// assert_eq!(path.depth(), 2);
/// assert_eq!(path.parent(), Some(NodePath::root().child(0)));
/// assert_eq!(NodePath::root().parent(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The path of the root node.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Check if this path addresses the root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of edges between the root and this node.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The path of the `index`th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// The path of this node's parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// Position of this node among its siblings, or `None` for the root.
    pub fn index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Rewrite this path so it keeps addressing the same node after the
    /// node at `removed` has been detached.
    ///
    /// If this path addresses the removed node (or something under it), the
    /// result is the removed node's parent. Paths through later siblings of
    /// the removed node shift one position left. Everything else is
    /// unchanged.
    pub fn after_removal(&self, removed: &NodePath) -> NodePath {
        let Some(removed_index) = removed.index() else {
            return self.clone();
        };
        let depth = removed.depth() - 1;

        if self.0.starts_with(&removed.0) {
            return NodePath(removed.0[..depth].to_vec());
        }

        let mut indices = self.0.clone();
        if indices.len() > depth
            && indices[..depth] == removed.0[..depth]
            && indices[depth] > removed_index
        {
            indices[depth] -= 1;
        }
        NodePath(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

/// A branch: a name, an ordered commit log and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchNode {
    name: BranchName,
    commits: Vec<Commit>,
    children: Vec<BranchNode>,
}

impl BranchNode {
    /// Create a branch with no commits and no children.
    pub fn new(name: BranchName) -> Self {
        Self {
            name,
            commits: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        name: BranchName,
        commits: Vec<Commit>,
        children: Vec<BranchNode>,
    ) -> Self {
        Self {
            name,
            commits,
            children,
        }
    }

    pub fn name(&self) -> &BranchName {
        &self.name
    }

    /// Commit log, oldest first.
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[BranchNode] {
        &self.children
    }

    /// Check if this branch has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The most recent commit, if any.
    pub fn latest_commit(&self) -> Option<&Commit> {
        self.commits.last()
    }

    /// File table of the most recent commit; empty when there are no commits.
    pub fn latest_files(&self) -> FileTable {
        self.latest_commit()
            .map(|commit| commit.files().clone())
            .unwrap_or_default()
    }

    /// Check if a direct child has the given name.
    pub fn has_child(&self, name: &BranchName) -> bool {
        self.children.iter().any(|child| child.name == *name)
    }

    /// Append a commit to this branch's log.
    pub fn push_commit(&mut self, commit: Commit) {
        self.commits.push(commit);
    }
}

/// The whole branch tree, rooted at `main`.
///
/// # Example
///
/// ```
/// use branchwork::core::tree::{BranchTree, NodePath};
/// use branchwork::core::types::BranchName;
///
/// let mut tree = BranchTree::new();
/// let feature = tree
///     .add_child(&NodePath::root(), BranchName::new("feature").unwrap())
///     .unwrap();
///
/// assert_eq!(tree.node(&feature).unwrap().name().as_str(), "feature");
/// assert!(tree
///     .add_child(&NodePath::root(), BranchName::new("feature").unwrap())
///     .is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTree {
    root: BranchNode,
}

impl Default for BranchTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchTree {
    /// Create a tree holding only the root branch.
    pub fn new() -> Self {
        Self {
            root: BranchNode::new(BranchName::root()),
        }
    }

    /// Wrap an existing root node. The caller is responsible for the
    /// root-name and sibling-uniqueness invariants (see `core::verify`).
    pub(crate) fn from_root(root: BranchNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &BranchNode {
        &self.root
    }

    /// Get the node at `path`.
    pub fn node(&self, path: &NodePath) -> Option<&BranchNode> {
        let mut node = &self.root;
        for &index in path.indices() {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Get the node at `path` mutably.
    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut BranchNode> {
        let mut node = &mut self.root;
        for &index in path.indices() {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }

    /// Get the node at `path` mutably, falling back to the root if the
    /// path does not address a node.
    pub(crate) fn node_or_root_mut(&mut self, path: &NodePath) -> &mut BranchNode {
        if self.node(path).is_none() {
            return &mut self.root;
        }
        let mut node = &mut self.root;
        for &index in path.indices() {
            node = &mut node.children[index];
        }
        node
    }

    /// Append a new, empty child named `name` under the node at `parent`.
    ///
    /// Returns the path of the new node.
    ///
    /// # Errors
    ///
    /// - [`TreeError::DuplicateChild`] if a sibling already has that name
    /// - [`TreeError::InvalidPath`] if `parent` does not address a node
    pub fn add_child(&mut self, parent: &NodePath, name: BranchName) -> Result<NodePath, TreeError> {
        let node = self
            .node_mut(parent)
            .ok_or_else(|| TreeError::InvalidPath(parent.clone()))?;

        if node.has_child(&name) {
            return Err(TreeError::DuplicateChild(name.to_string()));
        }

        node.children.push(BranchNode::new(name));
        Ok(parent.child(node.children.len() - 1))
    }

    /// Detach the leaf at `path` from its parent and return it.
    ///
    /// Returns `None` (and leaves the tree untouched) if `path` is the
    /// root, does not address a node, or addresses a node with children.
    pub fn remove_leaf(&mut self, path: &NodePath) -> Option<BranchNode> {
        let parent_path = path.parent()?;
        let index = path.index()?;

        let parent = self.node_mut(&parent_path)?;
        if !parent.children.get(index)?.is_leaf() {
            return None;
        }
        Some(parent.children.remove(index))
    }

    /// Total number of branches, root included.
    pub fn len(&self) -> usize {
        fn count(node: &BranchNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Always false: the root exists.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> BranchName {
        BranchName::new(s).unwrap()
    }

    #[test]
    fn new_tree_is_single_main_node() {
        let tree = BranchTree::new();
        assert_eq!(tree.root().name().as_str(), "main");
        assert!(tree.root().is_leaf());
        assert!(tree.root().commits().is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn add_child_appends_in_order() {
        let mut tree = BranchTree::new();
        let root = NodePath::root();
        let a = tree.add_child(&root, name("a")).unwrap();
        let b = tree.add_child(&root, name("b")).unwrap();

        assert_eq!(a, root.child(0));
        assert_eq!(b, root.child(1));
        let names: Vec<_> = tree
            .root()
            .children()
            .iter()
            .map(|c| c.name().as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_sibling_rejected() {
        let mut tree = BranchTree::new();
        let root = NodePath::root();
        tree.add_child(&root, name("a")).unwrap();
        assert_eq!(
            tree.add_child(&root, name("a")),
            Err(TreeError::DuplicateChild("a".into()))
        );
    }

    #[test]
    fn same_name_under_different_parents() {
        let mut tree = BranchTree::new();
        let root = NodePath::root();
        let a = tree.add_child(&root, name("a")).unwrap();
        let b = tree.add_child(&root, name("b")).unwrap();

        assert!(tree.add_child(&a, name("x")).is_ok());
        assert!(tree.add_child(&b, name("x")).is_ok());
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn add_child_invalid_parent() {
        let mut tree = BranchTree::new();
        let bogus = NodePath::root().child(3);
        assert_eq!(
            tree.add_child(&bogus, name("a")),
            Err(TreeError::InvalidPath(bogus))
        );
    }

    #[test]
    fn remove_leaf_detaches() {
        let mut tree = BranchTree::new();
        let root = NodePath::root();
        tree.add_child(&root, name("a")).unwrap();
        let b = tree.add_child(&root, name("b")).unwrap();

        let removed = tree.remove_leaf(&b).unwrap();
        assert_eq!(removed.name().as_str(), "b");
        assert_eq!(tree.root().children().len(), 1);
    }

    #[test]
    fn remove_leaf_refuses_root_and_inner_nodes() {
        let mut tree = BranchTree::new();
        let root = NodePath::root();
        let a = tree.add_child(&root, name("a")).unwrap();
        tree.add_child(&a, name("a1")).unwrap();

        assert!(tree.remove_leaf(&root).is_none());
        assert!(tree.remove_leaf(&a).is_none());
        assert!(tree.remove_leaf(&root.child(7)).is_none());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn latest_files_empty_without_commits() {
        let tree = BranchTree::new();
        assert!(tree.root().latest_files().is_empty());
        assert!(tree.root().latest_commit().is_none());
    }

    #[test]
    fn push_commit_appends() {
        let mut tree = BranchTree::new();
        let mut files = FileTable::new();
        files.insert("a.txt".into(), "1".into());

        let root = tree.node_mut(&NodePath::root()).unwrap();
        root.push_commit(Commit::new("one", FileTable::new()));
        root.push_commit(Commit::new("two", files.clone()));

        assert_eq!(tree.root().commits().len(), 2);
        assert_eq!(tree.root().latest_files(), files);
    }

    mod node_path {
        use super::*;

        fn path(indices: &[usize]) -> NodePath {
            indices
                .iter()
                .fold(NodePath::root(), |path, &i| path.child(i))
        }

        #[test]
        fn display() {
            assert_eq!(NodePath::root().to_string(), "/");
            assert_eq!(path(&[0, 2]).to_string(), "/0/2");
        }

        #[test]
        fn removal_of_self_moves_to_parent() {
            let current = path(&[1, 0]);
            assert_eq!(current.after_removal(&path(&[1, 0])), path(&[1]));
        }

        #[test]
        fn removal_of_earlier_sibling_shifts_left() {
            let current = path(&[2, 1]);
            assert_eq!(current.after_removal(&path(&[0])), path(&[1, 1]));
            assert_eq!(path(&[1, 3]).after_removal(&path(&[1, 0])), path(&[1, 2]));
        }

        #[test]
        fn removal_elsewhere_is_noop() {
            let current = path(&[0, 1]);
            assert_eq!(current.after_removal(&path(&[1])), current);
            assert_eq!(current.after_removal(&path(&[0, 2])), current);
            assert_eq!(current.after_removal(&path(&[0, 1, 0])), current);
            assert_eq!(NodePath::root().after_removal(&path(&[0])), NodePath::root());
        }
    }
}
