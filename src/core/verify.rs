//! core::verify
//!
//! Structural verification of a branch tree.
//!
//! Trees built through [`BranchTree`](super::tree::BranchTree) methods
//! satisfy these checks by construction. Trees decoded from disk do not,
//! so the store runs [`verify_tree`] after every load.
//!
//! # Checks
//!
//! - Root is named `main`
//! - No two siblings share a name
//!
//! # Invariants
//!
//! - Never mutates the tree
//! - Must be deterministic (errors reported in preorder)

use thiserror::Error;

use super::traverse::preorder;
use super::tree::BranchTree;
use super::types::BranchName;

/// Errors from verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("root branch must be named 'main', found '{0}'")]
    RootName(String),

    #[error("branch '{parent}' has more than one child named '{name}'")]
    DuplicateSibling { parent: String, name: String },
}

/// Result of verification.
#[derive(Debug)]
pub struct VerifyResult {
    /// Whether verification passed
    pub ok: bool,
    /// Errors found during verification
    pub errors: Vec<VerifyError>,
}

impl VerifyResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: vec![],
        }
    }

    /// Create a failed result with errors.
    pub fn failure(errors: Vec<VerifyError>) -> Self {
        Self { ok: false, errors }
    }
}

/// Check the tree invariants that decoding cannot enforce.
pub fn verify_tree(tree: &BranchTree) -> VerifyResult {
    let mut errors = Vec::new();

    let root = tree.root();
    if root.name().as_str() != BranchName::ROOT {
        errors.push(VerifyError::RootName(root.name().to_string()));
    }

    for visit in preorder(root) {
        let children = visit.node.children();
        for (i, child) in children.iter().enumerate() {
            let repeated = children[..i].iter().any(|c| c.name() == child.name());
            let last = children[i + 1..].iter().all(|c| c.name() != child.name());
            // Report each duplicated name once, at its last occurrence.
            if repeated && last {
                errors.push(VerifyError::DuplicateSibling {
                    parent: visit.node.name().to_string(),
                    name: child.name().to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        VerifyResult::success()
    } else {
        VerifyResult::failure(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::{BranchNode, NodePath};

    fn name(s: &str) -> BranchName {
        BranchName::new(s).unwrap()
    }

    fn leaf(s: &str) -> BranchNode {
        BranchNode::new(name(s))
    }

    #[test]
    fn fresh_tree_passes() {
        let result = verify_tree(&BranchTree::new());
        assert!(result.ok);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn built_tree_passes() {
        let mut tree = BranchTree::new();
        let a = tree.add_child(&NodePath::root(), name("a")).unwrap();
        let b = tree.add_child(&NodePath::root(), name("b")).unwrap();
        tree.add_child(&a, name("x")).unwrap();
        tree.add_child(&b, name("x")).unwrap();

        assert!(verify_tree(&tree).ok);
    }

    #[test]
    fn wrong_root_name_fails() {
        let tree = BranchTree::from_root(leaf("trunk"));
        let result = verify_tree(&tree);
        assert!(!result.ok);
        assert_eq!(result.errors, vec![VerifyError::RootName("trunk".into())]);
    }

    #[test]
    fn duplicate_siblings_reported_once() {
        let root = BranchNode::from_parts(
            name("main"),
            vec![],
            vec![leaf("a"), leaf("b"), leaf("a"), leaf("a")],
        );
        let result = verify_tree(&BranchTree::from_root(root));

        assert!(!result.ok);
        assert_eq!(
            result.errors,
            vec![VerifyError::DuplicateSibling {
                parent: "main".into(),
                name: "a".into(),
            }]
        );
    }

    #[test]
    fn nested_duplicates_found() {
        let inner = BranchNode::from_parts(name("a"), vec![], vec![leaf("x"), leaf("x")]);
        let root = BranchNode::from_parts(name("main"), vec![], vec![inner]);
        let result = verify_tree(&BranchTree::from_root(root));

        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].to_string().contains("'a'"));
    }
}
