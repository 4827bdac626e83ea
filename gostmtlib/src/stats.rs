//! Core data structures for statement statistics

use crate::classifier::StatementKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// Statement counts for one file, or a sum over many files.
///
/// `by_kind` breaks the total down by taxonomy entry; its values always sum
/// to [`StatementCounts::count`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementCounts {
    /// Total countable statements
    pub total: u64,
    /// Breakdown per statement kind (kinds with zero occurrences are omitted)
    pub by_kind: BTreeMap<StatementKind, u64>,
}

impl StatementCounts {
    /// Create new empty counts
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one statement of the given kind.
    pub fn record(&mut self, kind: StatementKind) {
        self.total += 1;
        *self.by_kind.entry(kind).or_insert(0) += 1;
    }

    /// Total number of statements.
    pub fn count(&self) -> u64 {
        self.total
    }

    /// Number of statements of a single kind.
    pub fn of_kind(&self, kind: StatementKind) -> u64 {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

impl Add for StatementCounts {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for StatementCounts {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        for (kind, n) in other.by_kind {
            *self.by_kind.entry(kind).or_insert(0) += n;
        }
    }
}

/// Statistics for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Path to the file, as reached from the walk root
    pub path: PathBuf,
    /// Statement counts for this file
    pub stats: StatementCounts,
}

impl FileStats {
    /// Create new file stats
    pub fn new(path: PathBuf, stats: StatementCounts) -> Self {
        Self { path, stats }
    }
}

/// Direct and recursive statement counts for one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    /// Directory path, as reached from the walk root
    pub path: PathBuf,
    /// Statements in files located immediately inside this directory
    pub direct: u64,
    /// `direct` plus the recursive count of every child directory
    pub recursive: u64,
}

impl DirectoryStats {
    pub fn new(path: PathBuf, direct: u64, recursive: u64) -> Self {
        Self {
            path,
            direct,
            recursive,
        }
    }
}
