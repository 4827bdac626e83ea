//! High-level statement counting API.
//!
//! This module provides the main entry points for counting statements in Go
//! source trees, with optional glob filtering and directory rollups.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregate::DirectoryTree;
use crate::filter::FilterConfig;
use crate::options::Aggregation;
use crate::parser::parse_file;
use crate::stats::{DirectoryStats, FileStats, StatementCounts};
use crate::walker::{walk, WalkEntry};
use crate::Result;

/// Options for counting statements.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// File filter configuration
    pub file_filter: FilterConfig,
    /// Whether to roll counts up per directory
    pub aggregation: Aggregation,
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Set aggregation level.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }
}

/// Result of counting statements below a root path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    /// Path the walk started from, as given
    pub root: PathBuf,
    /// Aggregated counts across all files
    pub total: StatementCounts,
    /// Per-file counts, in walk order
    pub files: Vec<FileStats>,
    /// Per-directory rollups (only with [`Aggregation::ByDirectory`])
    pub directories: Vec<DirectoryStats>,
}

impl CountResult {
    /// Create a new empty result for `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

/// Count statements in every Go file below `path`.
///
/// Stops at the first traversal or parse error; no partial result is
/// returned in that case.
///
/// # Example
///
/// ```rust,ignore
/// use gostmtlib::{count_directory, Aggregation, CountOptions};
///
/// let result = count_directory("./cmd", &CountOptions::new())?;
/// println!("{} statements", result.total.count());
///
/// let options = CountOptions::new().aggregation(Aggregation::ByDirectory);
/// for dir in count_directory(".", &options)?.directories {
///     println!("{}: {}", dir.path.display(), dir.recursive);
/// }
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: &CountOptions) -> Result<CountResult> {
    let path = path.as_ref();
    let mut result = CountResult::new(path);
    let mut tree = DirectoryTree::new();

    for entry in walk(path, options.file_filter.clone())? {
        let entry = entry?;
        if options.aggregation == Aggregation::ByDirectory {
            tree.record(&entry);
        }
        if let WalkEntry::File(file) = entry {
            result.total += file.stats.clone();
            result.files.push(file);
        }
    }

    if options.aggregation == Aggregation::ByDirectory {
        result.directories = tree.finish();
    }

    Ok(result)
}

/// Count statements in a single file.
///
/// # Example
///
/// ```rust,ignore
/// use gostmtlib::count_file;
///
/// let stats = count_file("main.go")?;
/// println!("{} statements", stats.count());
/// ```
pub fn count_file(path: impl AsRef<Path>) -> Result<StatementCounts> {
    parse_file(path)
}
