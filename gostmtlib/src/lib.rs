//! # gostmtlib
//!
//! Counts statements in Go source trees, per file and per directory.
//!
//! ## Overview
//!
//! Line counts say little about how much logic a file holds: a long struct
//! literal and a dense state machine can have the same number of lines. This
//! library parses each Go file with tree-sitter and counts the syntax nodes
//! that are statements (assignments, calls, returns, branches, loops, blocks
//! and so on), skipping imports and top-level declarations.
//!
//! The pipeline has four stages:
//!
//! - **Walk**: [`walk`] enumerates every directory and `.go` file below a root
//! - **Classify**: [`classify`] counts the statements in one parsed tree
//! - **Aggregate**: [`aggregate`] rolls direct directory counts up the tree
//! - **Report**: [`Reporter`] writes the plain-text lines
//!
//! ## Example
//!
//! ```rust
//! use gostmtlib::{count_directory, count_file, Aggregation, CountOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::create_dir(dir.path().join("pkg")).unwrap();
//! let file_path = dir.path().join("pkg/f.go");
//! fs::write(&file_path, "package pkg\n\nfunc f() int { x := 1; return x }\n").unwrap();
//!
//! // Count a single file: the body block, the assignment and the return
//! let stats = count_file(&file_path).unwrap();
//! assert_eq!(stats.count(), 3);
//!
//! // Count a whole tree, rolled up per directory
//! let options = CountOptions::new().aggregation(Aggregation::ByDirectory);
//! let result = count_directory(dir.path(), &options).unwrap();
//! assert_eq!(result.total.count(), 3);
//! assert_eq!(result.directories[0].recursive, 3);
//! ```

pub mod aggregate;
pub mod classifier;
pub mod counter;
pub mod error;
pub mod filter;
pub mod options;
pub mod parser;
pub mod report;
pub mod stats;
pub mod walker;

pub use aggregate::{aggregate, DirectoryTree};
pub use classifier::{classify, StatementKind};
pub use counter::{count_directory, count_file, CountOptions, CountResult};
pub use error::GostmtError;
pub use filter::FilterConfig;
pub use options::Aggregation;
pub use parser::{count_source, parse_file, SourceParser};
pub use report::Reporter;
pub use stats::{DirectoryStats, FileStats, StatementCounts};
pub use walker::{walk, WalkEntry, Walker};

/// Result type for gostmtlib operations
pub type Result<T> = std::result::Result<T, GostmtError>;
