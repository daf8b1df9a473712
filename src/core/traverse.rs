//! core::traverse
//!
//! Traversal strategies over the branch tree.
//!
//! Names are only unique among siblings, so which node a lookup lands on
//! depends on visiting order. Each operation uses a fixed strategy:
//!
//! | Strategy | Order | Used by |
//! |---|---|---|
//! | [`preorder`] | node, then children left to right | listing |
//! | [`find_postorder`] | children left to right, then node | delete, merge source |
//! | [`find_checkout`] | node, earlier children, last child | checkout |
//!
//! # Example
//!
//! ```
//! use branchwork::core::traverse::{find_checkout, find_postorder};
//! use branchwork::core::tree::{BranchTree, NodePath};
//! use branchwork::core::types::BranchName;
//!
//! // main -> x -> x
//! let mut tree = BranchTree::new();
//! let outer = tree.add_child(&NodePath::root(), BranchName::new("x").unwrap()).unwrap();
//! let inner = tree.add_child(&outer, BranchName::new("x").unwrap()).unwrap();
//!
//! // Postorder prefers the deepest match, checkout the shallowest.
//! assert_eq!(find_postorder(tree.root(), "x"), Some(inner));
//! assert_eq!(find_checkout(tree.root(), "x"), Some(outer));
//! ```

use super::tree::{BranchNode, NodePath};

/// A node visited during a preorder walk.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Distance from the root (root is 0).
    pub depth: usize,
    pub node: &'a BranchNode,
}

/// Walk the tree in preorder: node first, then each child in list order.
pub fn preorder(root: &BranchNode) -> Vec<Visit<'_>> {
    fn walk<'a>(node: &'a BranchNode, depth: usize, out: &mut Vec<Visit<'a>>) {
        out.push(Visit { depth, node });
        for child in node.children() {
            walk(child, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(root, 0, &mut out);
    out
}

/// Postorder-first-match search.
///
/// Every child subtree is searched (left to right) before the node's own
/// name is compared, so a descendant always wins over an ancestor with the
/// same name, and the first child subtree containing a match wins over
/// later ones.
pub fn find_postorder(root: &BranchNode, name: &str) -> Option<NodePath> {
    fn search(node: &BranchNode, path: NodePath, name: &str) -> Option<NodePath> {
        for (index, child) in node.children().iter().enumerate() {
            if let Some(found) = search(child, path.child(index), name) {
                return Some(found);
            }
        }
        if node.name() == name {
            return Some(path);
        }
        None
    }

    search(root, NodePath::root(), name)
}

/// Deferred-last-child depth-first search.
///
/// The node itself is compared first. Then every child except the last is
/// searched left to right, and only after they are exhausted is the last
/// child searched. The outcome matches a plain left-to-right preorder
/// search.
pub fn find_checkout(root: &BranchNode, name: &str) -> Option<NodePath> {
    fn search(node: &BranchNode, path: NodePath, name: &str) -> Option<NodePath> {
        if node.name() == name {
            return Some(path);
        }

        let children = node.children();
        let Some((last, earlier)) = children.split_last() else {
            return None;
        };

        for (index, child) in earlier.iter().enumerate() {
            if let Some(found) = search(child, path.child(index), name) {
                return Some(found);
            }
        }

        search(last, path.child(earlier.len()), name)
    }

    search(root, NodePath::root(), name)
}
