//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated branch name
//! - [`CommitId`] - Short content hash identifying a commit
//! - [`FileTable`] - Snapshot of tracked files (path -> content)
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use branchwork::core::types::{BranchName, CommitId};
//!
//! let branch = BranchName::new("feature/login").unwrap();
//! let id = CommitId::new("ABC1234").unwrap();
//! assert_eq!(id.as_str(), "abc1234");
//!
//! assert!(BranchName::new("-d").is_err());
//! assert!(CommitId::new("not-hex").is_err());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid commit id: {0}")]
    InvalidCommitId(String),
}

/// Snapshot of tracked files, keyed by path.
///
/// Ordered by path so that iteration (and therefore hashing) is
/// independent of insertion order.
pub type FileTable = BTreeMap<String, String>;

/// A validated branch name.
///
/// Branch names:
/// - Cannot be empty
/// - Cannot start with `-` (would be read as a flag)
/// - Cannot contain whitespace or ASCII control characters
///
/// Names are unique only among siblings; the same name may appear in
/// several subtrees.
///
/// # Example
///
/// ```
/// use branchwork::core::types::BranchName;
///
/// let name = BranchName::new("feature/my-branch").unwrap();
/// assert_eq!(name.as_str(), "feature/my-branch");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("has space").is_err());
/// assert!(BranchName::new("--list").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Name of the root branch.
    pub const ROOT: &'static str = "main";

    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name is empty, starts
    /// with `-`, or contains whitespace/control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// The root branch name (`main`).
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be empty".into(),
            ));
        }

        if name.starts_with('-') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '-'".into(),
            ));
        }

        for c in name.chars() {
            if c.is_whitespace() {
                return Err(TypeError::InvalidBranchName(
                    "branch name cannot contain whitespace".into(),
                ));
            }
            if c.is_ascii_control() {
                return Err(TypeError::InvalidBranchName(
                    "branch name cannot contain control characters".into(),
                ));
            }
        }

        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BranchName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A short commit identifier: 7 lowercase hex characters.
///
/// Ids only distinguish commits locally. Two commits with identical file
/// tables share an id.
///
/// # Example
///
/// ```
/// use branchwork::core::types::{CommitId, FileTable};
///
/// // Empty table hashes the empty input
/// assert_eq!(CommitId::of(&FileTable::new()).as_str(), "da39a3e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    /// Number of hex characters kept from the digest.
    pub const LEN: usize = 7;

    /// Create a validated commit id (normalized to lowercase).
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCommitId` if the string is not 7 hex chars.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into().to_ascii_lowercase();
        if id.len() != Self::LEN {
            return Err(TypeError::InvalidCommitId(format!(
                "expected {} hex characters, got {}",
                Self::LEN,
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidCommitId(
                "commit id must be hexadecimal".into(),
            ));
        }
        Ok(Self(id))
    }

    /// Compute the id of a file table.
    ///
    /// Canonical form: for each entry in ascending path order, the path,
    /// a NUL byte, the content and a newline. The id is the first 7 hex
    /// characters of the SHA-1 digest of that byte stream.
    pub fn of(files: &FileTable) -> Self {
        let mut hasher = Sha1::new();
        for (path, content) in files {
            hasher.update(path.as_bytes());
            hasher.update(b"\0");
            hasher.update(content.as_bytes());
            hasher.update(b"\n");
        }

        let digest = hex::encode(hasher.finalize());
        Self(digest[..Self::LEN].to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommitId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.0
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
