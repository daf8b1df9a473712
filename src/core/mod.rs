//! core
//!
//! Core domain types, storage and operations for branchwork.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, CommitId, FileTable
//! - [`commit`] - Immutable commit records
//! - [`tree`] - The owned branch tree and index paths into it
//! - [`traverse`] - Preorder listing and the two name searches
//! - [`merge`] - File-level diff and merge planning
//! - [`store`] - JSON persistence of the whole tree
//! - [`verify`] - Structural verification of loaded trees
//! - [`manager`] - The branch manager, sole mutator of the tree
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for branchwork storage
//! - [`lock`] - Single-writer lock for mutating commands
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Hashing and traversal order are deterministic

pub mod commit;
pub mod config;
pub mod lock;
pub mod manager;
pub mod merge;
pub mod paths;
pub mod store;
pub mod traverse;
pub mod tree;
pub mod types;
pub mod verify;
