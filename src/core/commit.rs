//! core::commit
//!
//! Immutable commit records.
//!
//! A commit stores the complete file table of its branch at the time it
//! was created, not a delta against the previous commit. Its id is the
//! short content hash of that table (see [`CommitId::of`]).

use serde::{Deserialize, Serialize};

use super::types::{CommitId, FileTable};

/// A snapshot of a branch's tracked files.
///
/// # Example
///
/// ```
/// use branchwork::core::commit::Commit;
/// use branchwork::core::types::FileTable;
///
/// let mut files = FileTable::new();
/// files.insert("a.txt".into(), "1".into());
///
/// let commit = Commit::new("Merge commit", files.clone());
/// assert_eq!(commit.files(), &files);
/// assert_eq!(commit.id().as_str().len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Commit {
    id: CommitId,
    message: String,
    files: FileTable,
}

impl Commit {
    /// Create a commit whose id is the hash of `files`.
    pub fn new(message: impl Into<String>, files: FileTable) -> Self {
        Self {
            id: CommitId::of(&files),
            message: message.into(),
            files,
        }
    }

    pub fn id(&self) -> &CommitId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn files(&self) -> &FileTable {
        &self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> FileTable {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn id_matches_files_hash() {
        let files = table(&[("a.txt", "1"), ("b.txt", "2")]);
        let commit = Commit::new("msg", files.clone());
        assert_eq!(commit.id(), &CommitId::of(&files));
        assert_eq!(commit.message(), "msg");
    }

    #[test]
    fn same_files_same_id() {
        let a = Commit::new("first", table(&[("a.txt", "1")]));
        let b = Commit::new("second", table(&[("a.txt", "1")]));
        assert_eq!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn json_layout() {
        let commit = Commit::new("Merge commit", table(&[("a.txt", "1")]));
        let value = serde_json::to_value(&commit).unwrap();

        assert_eq!(value["id"], commit.id().as_str());
        assert_eq!(value["message"], "Merge commit");
        assert_eq!(value["files"]["a.txt"], "1");
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = r#"{"id":"da39a3e","message":"m","files":{},"author":"x"}"#;
        let result: Result<Commit, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_malformed_id() {
        let json = r#"{"id":"zzz","message":"m","files":{}}"#;
        let result: Result<Commit, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
