//! core::merge
//!
//! File-level diff and merge between two branches' latest snapshots.
//!
//! # Algorithm
//!
//! Given the source table `S` and the target (current branch) table `T`:
//!
//! 1. For every path in `S ∪ T` whose values differ (a missing side counts
//!    as different), the diff takes `S[path]` if it is non-empty, else
//!    `T[path]`. Paths with equal values are left out.
//! 2. The merged table is `T` with the diff entries written over it.
//!
//! There is no content-level diffing and no conflict detection: a differing
//! non-empty source value always replaces the target value.
//!
//! # Quirks
//!
//! Both of these are kept as-is rather than normalized to three-way merge
//! semantics:
//!
//! - A source value that is the empty string never wins. If the source
//!   empties a file the target still has, the target content is kept.
//!   A path only in the source with empty content is dropped from the
//!   merge entirely: the diff falls back to the (missing) target value.
//!   File values are never null, so a store that records such a path as
//!   `null` fails to load with `StoreError::Parse`.
//! - A second "marker" commit is built from the diff alone and then
//!   discarded. Only the commit carrying the full merged table is stored.

use super::commit::Commit;
use super::types::{BranchName, FileTable};

/// Message of the commit appended by a merge.
pub const MERGE_COMMIT_MESSAGE: &str = "Merge commit";

/// Compute the file-level diff of `source` against `target`.
///
/// # Example
///
/// ```
/// use branchwork::core::merge::diff;
/// use branchwork::core::types::FileTable;
///
/// let source: FileTable = [("a.txt".to_string(), "new".to_string())].into();
/// let target: FileTable = [
///     ("a.txt".to_string(), "old".to_string()),
///     ("b.txt".to_string(), "keep".to_string()),
/// ]
/// .into();
///
/// let d = diff(&source, &target);
/// assert_eq!(d.get("a.txt").map(String::as_str), Some("new"));
/// // b.txt differs (missing in source) and falls back to the target value
/// assert_eq!(d.get("b.txt").map(String::as_str), Some("keep"));
/// ```
pub fn diff(source: &FileTable, target: &FileTable) -> FileTable {
    let mut out = FileTable::new();

    for path in source.keys().chain(target.keys()) {
        if out.contains_key(path) {
            continue;
        }

        let s = source.get(path);
        let t = target.get(path);
        if s == t {
            continue;
        }

        let chosen = match s {
            Some(value) if !value.is_empty() => Some(value),
            _ => t,
        };
        if let Some(value) = chosen {
            out.insert(path.clone(), value.clone());
        }
    }

    out
}

/// Write `diff` over a copy of `target`.
pub fn apply(target: &FileTable, diff: &FileTable) -> FileTable {
    let mut merged = target.clone();
    merged.extend(diff.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// The commits produced by merging one branch into another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    /// The diff that was folded into the target.
    pub diff: FileTable,
    /// Commit carrying the full merged table; this is what gets stored.
    pub commit: Commit,
    /// Commit carrying only the diff, hashed from the diff. Never stored.
    pub marker: Commit,
}

impl MergePlan {
    /// Build the merge of `source_files` (from branch `source`) into
    /// `target_files` (from branch `target`).
    ///
    /// # Example
    ///
    /// ```
    /// use branchwork::core::merge::MergePlan;
    /// use branchwork::core::types::{BranchName, FileTable};
    ///
    /// let source: FileTable = [("a.txt".to_string(), "1".to_string())].into();
    /// let plan = MergePlan::build(
    ///     &BranchName::new("feature").unwrap(),
    ///     &BranchName::new("main").unwrap(),
    ///     &source,
    ///     &FileTable::new(),
    /// );
    ///
    /// assert_eq!(plan.commit.files(), &source);
    /// assert_eq!(plan.commit.message(), "Merge commit");
    /// assert_eq!(plan.marker.message(), "Merge feature into main");
    /// ```
    pub fn build(
        source: &BranchName,
        target: &BranchName,
        source_files: &FileTable,
        target_files: &FileTable,
    ) -> Self {
        let diff = diff(source_files, target_files);
        let merged = apply(target_files, &diff);

        let commit = Commit::new(MERGE_COMMIT_MESSAGE, merged);
        let marker = Commit::new(format!("Merge {} into {}", source, target), diff.clone());

        Self {
            diff,
            commit,
            marker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CommitId;

    fn table(entries: &[(&str, &str)]) -> FileTable {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn name(s: &str) -> BranchName {
        BranchName::new(s).unwrap()
    }

    #[test]
    fn identical_tables_have_empty_diff() {
        let files = table(&[("a.txt", "1"), ("b.txt", "2")]);
        assert!(diff(&files, &files).is_empty());
    }

    #[test]
    fn both_empty() {
        assert!(diff(&FileTable::new(), &FileTable::new()).is_empty());
    }

    #[test]
    fn source_only_path_is_added() {
        let d = diff(&table(&[("a.txt", "1")]), &FileTable::new());
        assert_eq!(d, table(&[("a.txt", "1")]));
    }

    #[test]
    fn target_only_path_keeps_target_value() {
        let d = diff(&FileTable::new(), &table(&[("b.txt", "2")]));
        assert_eq!(d, table(&[("b.txt", "2")]));
    }

    #[test]
    fn differing_value_takes_source() {
        let d = diff(&table(&[("a.txt", "new")]), &table(&[("a.txt", "old")]));
        assert_eq!(d, table(&[("a.txt", "new")]));
    }

    #[test]
    fn empty_source_value_falls_back_to_target() {
        let d = diff(&table(&[("a.txt", "")]), &table(&[("a.txt", "old")]));
        assert_eq!(d, table(&[("a.txt", "old")]));
    }

    #[test]
    fn empty_source_value_without_target_is_dropped() {
        let d = diff(&table(&[("a.txt", "")]), &FileTable::new());
        assert!(d.is_empty());
    }

    #[test]
    fn empty_target_value_is_replaced() {
        let d = diff(&table(&[("a.txt", "x")]), &table(&[("a.txt", "")]));
        assert_eq!(d, table(&[("a.txt", "x")]));
    }

    #[test]
    fn apply_overwrites_and_keeps_rest() {
        let target = table(&[("a.txt", "old"), ("b.txt", "keep")]);
        let merged = apply(&target, &table(&[("a.txt", "new"), ("c.txt", "add")]));
        assert_eq!(
            merged,
            table(&[("a.txt", "new"), ("b.txt", "keep"), ("c.txt", "add")])
        );
    }

    #[test]
    fn plan_with_empty_diff_keeps_target_table() {
        let files = table(&[("a.txt", "1")]);
        let plan = MergePlan::build(&name("f"), &name("main"), &files, &files);

        assert!(plan.diff.is_empty());
        assert_eq!(plan.commit.files(), &files);
        assert_eq!(plan.commit.id(), &CommitId::of(&files));
    }

    #[test]
    fn marker_is_hashed_from_diff() {
        let source = table(&[("a.txt", "1")]);
        let target = table(&[("b.txt", "2")]);
        let plan = MergePlan::build(&name("feature"), &name("main"), &source, &target);

        assert_eq!(plan.marker.files(), &plan.diff);
        assert_eq!(plan.marker.id(), &CommitId::of(&plan.diff));
        assert_eq!(plan.marker.message(), "Merge feature into main");

        assert_eq!(
            plan.commit.files(),
            &table(&[("a.txt", "1"), ("b.txt", "2")])
        );
        assert_eq!(plan.commit.id(), &CommitId::of(plan.commit.files()));
        assert_eq!(plan.commit.message(), MERGE_COMMIT_MESSAGE);
    }
}
