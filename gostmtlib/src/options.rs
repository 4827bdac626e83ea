//! Input options for statement counting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregation level for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    /// One row per file plus a grand total
    #[default]
    ByFile,
    /// One row per directory with direct and recursive counts
    ByDirectory,
}

impl FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "files" | "flat" => Ok(Aggregation::ByFile),
            "dir" | "dirs" | "directory" | "directories" => Ok(Aggregation::ByDirectory),
            _ => Err(format!("Unknown aggregation: {}", s)),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::ByFile => write!(f, "file"),
            Aggregation::ByDirectory => write!(f, "directory"),
        }
    }
}
