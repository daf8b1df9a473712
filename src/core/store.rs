//! core::store
//!
//! Persistence of the whole branch tree as one JSON document.
//!
//! # Format
//!
//! Each branch is encoded recursively as:
//!
//! ```json
//! {
//!   "name": "main",
//!   "commits": [{ "id": "3c3b2a1", "message": "Merge commit", "files": { "a.txt": "1" } }],
//!   "children": [ { "name": "feature", "commits": [], "children": [] } ]
//! }
//! ```
//!
//! There is no parent field and no record of the checked-out branch: after
//! a load the cursor always starts at the root.
//!
//! # Write Strategy
//!
//! Every save rewrites the whole document. Writes go to `<file>.tmp`, are
//! fsynced, then renamed over the target, so a crash leaves either the old
//! or the new document.
//!
//! # Example
//!
//! ```no_run
//! use branchwork::core::store::TreeStore;
//! use branchwork::core::tree::BranchTree;
//!
//! let store = TreeStore::new(".branchwork/branches.json");
//! let tree = store.load()?.unwrap_or_default();
//! store.save(&tree)?;
//! # Ok::<(), branchwork::core::store::StoreError>(())
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::commit::Commit;
use super::tree::{BranchNode, BranchTree};
use super::types::BranchName;
use super::verify::{verify_tree, VerifyError};

/// Errors from tree storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write the store file.
    #[error("store i/o error at '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    /// The document is not valid JSON or does not match the schema.
    #[error("failed to parse branch tree '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// Failed to serialize the tree.
    #[error("failed to serialize branch tree: {0}")]
    Serialize(String),

    /// The document parsed but violates a tree invariant.
    #[error("invalid branch tree '{path}': {}", format_errors(.errors))]
    Invalid {
        path: PathBuf,
        errors: Vec<VerifyError>,
    },
}

fn format_errors(errors: &[VerifyError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Serialized form of one branch and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeDocument {
    pub name: BranchName,
    pub commits: Vec<Commit>,
    pub children: Vec<TreeDocument>,
}

impl TreeDocument {
    /// Encode a node and everything below it.
    pub fn from_node(node: &BranchNode) -> Self {
        Self {
            name: node.name().clone(),
            commits: node.commits().to_vec(),
            children: node.children().iter().map(Self::from_node).collect(),
        }
    }

    /// Rebuild the node, top-down.
    pub fn into_node(self) -> BranchNode {
        let children = self.children.into_iter().map(Self::into_node).collect();
        BranchNode::from_parts(self.name, self.commits, children)
    }
}

/// File-backed store for the branch tree.
#[derive(Debug, Clone)]
pub struct TreeStore {
    path: PathBuf,
}

impl TreeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the tree.
    ///
    /// Returns `Ok(None)` if the store file does not exist yet.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file exists but cannot be read
    /// - [`StoreError::Parse`] if the content is not a valid document
    /// - [`StoreError::Invalid`] if the decoded tree breaks an invariant
    pub fn load(&self) -> Result<Option<BranchTree>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no branch tree on disk");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let tree = decode(&json).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let result = verify_tree(&tree);
        if !result.ok {
            return Err(StoreError::Invalid {
                path: self.path.clone(),
                errors: result.errors,
            });
        }

        debug!(path = %self.path.display(), branches = tree.len(), "loaded branch tree");
        Ok(Some(tree))
    }

    /// Save the whole tree, replacing the previous document atomically.
    pub fn save(&self, tree: &BranchTree) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_error(parent))?;
            }
        }

        let contents = encode(tree).map_err(|e| StoreError::Serialize(e.to_string()))?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).map_err(io_error(&temp_path))?;
        file.write_all(contents.as_bytes())
            .map_err(io_error(&temp_path))?;
        file.sync_all().map_err(io_error(&temp_path))?;

        fs::rename(&temp_path, &self.path).map_err(io_error(&self.path))?;

        debug!(path = %self.path.display(), branches = tree.len(), "saved branch tree");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

/// Serialize a tree to its JSON document.
pub fn encode(tree: &BranchTree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TreeDocument::from_node(tree.root()))
}

/// Parse a JSON document into a tree. Does not verify invariants.
pub fn decode(json: &str) -> Result<BranchTree, serde_json::Error> {
    let document: TreeDocument = serde_json::from_str(json)?;
    Ok(BranchTree::from_root(document.into_node()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::NodePath;
    use crate::core::types::FileTable;
    use tempfile::TempDir;

    fn name(s: &str) -> BranchName {
        BranchName::new(s).unwrap()
    }

    fn sample_tree() -> BranchTree {
        let mut tree = BranchTree::new();
        let root = NodePath::root();
        let a = tree.add_child(&root, name("a")).unwrap();
        tree.add_child(&a, name("x")).unwrap();
        tree.add_child(&root, name("b")).unwrap();

        let mut files = FileTable::new();
        files.insert("a.txt".into(), "1".into());
        tree.node_mut(&a)
            .unwrap()
            .push_commit(Commit::new("seed", files));
        tree
    }

    #[test]
    fn encode_layout() {
        let json = encode(&sample_tree()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "main");
        assert_eq!(value["commits"], serde_json::json!([]));
        assert_eq!(value["children"][0]["name"], "a");
        assert_eq!(value["children"][0]["commits"][0]["message"], "seed");
        assert_eq!(value["children"][0]["commits"][0]["files"]["a.txt"], "1");
        assert_eq!(value["children"][0]["children"][0]["name"], "x");
        assert_eq!(value["children"][1]["name"], "b");
        assert!(value.get("parent").is_none());
    }

    #[test]
    fn decode_roundtrip() {
        let tree = sample_tree();
        let decoded = decode(&encode(&tree).unwrap()).unwrap();
        assert_eq!(decoded, tree);
    }

    #[test]
    fn decode_rejects_missing_fields() {
        assert!(decode(r#"{"name":"main","children":[]}"#).is_err());
    }

    #[test]
    fn decode_rejects_unknown_fields() {
        assert!(decode(r#"{"name":"main","commits":[],"children":[],"parent":null}"#).is_err());
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::new(dir.path().join("branches.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = TreeStore::new(dir.path().join("nested/branches.json"));
        let tree = sample_tree();

        store.save(&tree).unwrap();
        assert!(!dir.path().join("nested/branches.json.tmp").exists());
        assert_eq!(store.load().unwrap(), Some(tree));
    }

    #[test]
    fn load_malformed_json_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("branches.json");
        fs::write(&path, "{ not json").unwrap();

        let err = TreeStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn load_null_file_value_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("branches.json");
        fs::write(
            &path,
            r#"{"name": "main", "commits": [
                {"id": "0000000", "message": "Merge commit", "files": {"a.txt": null}}
            ], "children": []}"#,
        )
        .unwrap();

        let err = TreeStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn load_invalid_tree_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("branches.json");
        fs::write(
            &path,
            r#"{"name":"trunk","commits":[],"children":[]}"#,
        )
        .unwrap();

        let err = TreeStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Invalid { .. }));
        assert!(err.to_string().contains("trunk"));
    }
}
