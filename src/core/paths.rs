//! core::paths
//!
//! Centralized path routing for branchwork storage locations.
//!
//! # Storage Layout
//!
//! All data for a working directory is stored under `<work_dir>/.branchwork/`:
//! - `branches.json` - The branch tree (name configurable)
//! - `config.toml` - Repository configuration
//! - `lock` - Exclusive lock file
//!
//! No code outside this module should compute `.join(".branchwork")` paths.
//!
//! # Example
//!
//! ```
//! use branchwork::core::paths::RepoPaths;
//! use std::path::PathBuf;
//!
//! let paths = RepoPaths::new("/work");
//!
//! assert_eq!(
//!     paths.repo_config_path(),
//!     PathBuf::from("/work/.branchwork/config.toml")
//! );
//! assert_eq!(
//!     paths.store_path("branches.json"),
//!     PathBuf::from("/work/.branchwork/branches.json")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Name of the per-directory data directory.
pub const DATA_DIR: &str = ".branchwork";

/// Default file name of the persisted branch tree.
pub const DEFAULT_STORE_FILE: &str = "branches.json";

/// Storage locations for one working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    /// The directory commands operate in.
    pub work_dir: PathBuf,
}

impl RepoPaths {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// `<work_dir>/.branchwork`
    pub fn data_dir(&self) -> PathBuf {
        self.work_dir.join(DATA_DIR)
    }

    /// `<work_dir>/.branchwork/<file_name>`
    pub fn store_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.data_dir().join(file_name)
    }

    /// `<work_dir>/.branchwork/config.toml`
    pub fn repo_config_path(&self) -> PathBuf {
        self.data_dir().join("config.toml")
    }

    /// `<work_dir>/.branchwork/lock`
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir().join("lock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_paths_under_data_dir() {
        let paths = RepoPaths::new("/tmp/w");
        let data = paths.data_dir();

        assert_eq!(data, PathBuf::from("/tmp/w/.branchwork"));
        assert!(paths.repo_config_path().starts_with(&data));
        assert!(paths.lock_path().starts_with(&data));
        assert!(paths.store_path(DEFAULT_STORE_FILE).starts_with(&data));
    }
}
