//! branchwork - a branch tree with file-level merges
//!
//! branchwork keeps a tree of named branches rooted at `main`. Each branch
//! carries an append-only log of commits, where a commit is a full snapshot
//! of a path-to-content file table identified by a short content hash.
//! Branches can be created under the current branch, deleted when they have
//! no children, checked out, and merged into the current branch.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, drives the manager)
//! - [`core`] - Domain types, tree, traversal, merge, persistence and config
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. The tree has exactly one root, named `main`, which is never deleted
//! 2. Sibling branches never share a name
//! 3. Only branches without children are deleted
//! 4. Every mutation is followed by a save of the whole tree

pub mod cli;
pub mod core;
pub mod ui;
