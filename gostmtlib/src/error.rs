//! Error types for gostmtlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while counting statements
#[derive(Error, Debug)]
pub enum GostmtError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Source file is not valid Go
    #[error("{}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Directory traversal failed (permissions, vanished entries)
    #[error("{0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// The Go grammar could not be loaded into the parser
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}
