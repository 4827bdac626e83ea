//! Go source parsing.
//!
//! Wraps a tree-sitter parser loaded with the Go grammar. tree-sitter recovers
//! from syntax errors by inserting ERROR and MISSING nodes; such trees are
//! rejected here so that a malformed file fails the run instead of being
//! counted from a partial tree.

use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser, Tree};

use crate::classifier::classify;
use crate::error::GostmtError;
use crate::stats::StatementCounts;
use crate::Result;

/// A parser for Go source files.
pub struct SourceParser {
    parser: Parser,
}

impl SourceParser {
    /// Create a parser bound to the Go grammar.
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(tree_sitter_go::language())?;
        Ok(Self { parser })
    }

    /// Parse `source` into a syntax tree.
    ///
    /// `path` is only used to label errors.
    pub fn parse(&mut self, path: &Path, source: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| parse_error(path, 1, 1, "parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            let (node, message) = match first_error(root) {
                Some(node) if node.is_missing() => (node, format!("expected '{}'", node.kind())),
                Some(node) => (node, "syntax error".to_string()),
                None => (root, "syntax error".to_string()),
            };
            let pos = node.start_position();
            return Err(parse_error(path, pos.row + 1, pos.column + 1, &message));
        }

        if !has_package_clause(root) {
            return Err(parse_error(path, 1, 1, "expected 'package'"));
        }

        Ok(tree)
    }

    /// Parse and classify a file on disk.
    pub fn count_file(&mut self, path: &Path) -> Result<StatementCounts> {
        let source = fs::read_to_string(path).map_err(|e| GostmtError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::trace!(path = %path.display(), bytes = source.len(), "parsing");
        let tree = self.parse(path, &source)?;
        Ok(classify(&tree))
    }
}

/// Parse and classify a single Go file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<StatementCounts> {
    SourceParser::new()?.count_file(path.as_ref())
}

/// Parse and classify Go source held in memory.
pub fn count_source(source: &str) -> Result<StatementCounts> {
    let tree = SourceParser::new()?.parse(Path::new("<source>"), source)?;
    Ok(classify(&tree))
}

fn parse_error(path: &Path, line: usize, column: usize, message: &str) -> GostmtError {
    GostmtError::Parse {
        path: PathBuf::from(path),
        line,
        column,
        message: message.to_string(),
    }
}

/// First ERROR or MISSING node in source order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn has_package_clause(root: Node<'_>) -> bool {
    let mut cursor = root.walk();
    let found = root
        .named_children(&mut cursor)
        .any(|c| c.kind() == "package_clause");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_valid_source() {
        let mut parser = SourceParser::new().unwrap();
        let tree = parser
            .parse(Path::new("ok.go"), "package main\n\nfunc main() {}\n")
            .unwrap();
        assert_eq!(tree.root_node().kind(), "source_file");
    }

    #[test]
    fn test_unterminated_function_is_rejected() {
        let err = count_source("package main\n\nfunc main() {\n\tx := 1\n").unwrap_err();
        match err {
            GostmtError::Parse { line, .. } => assert!(line >= 3),
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = count_source("package main\n\nfunc main() { ) ( }\n").unwrap_err();
        assert!(matches!(err, GostmtError::Parse { .. }));
    }

    #[test]
    fn test_missing_package_clause() {
        let err = count_source("func main() {}\n").unwrap_err();
        match err {
            GostmtError::Parse {
                line,
                column,
                message,
                ..
            } => {
                assert_eq!((line, column), (1, 1));
                assert_eq!(message, "expected 'package'");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(count_source("").is_err());
    }

    #[test]
    fn test_parse_file_reports_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("bad.go");
        fs::write(&path, "package bad\n\nfunc f() {\n").unwrap();

        let err = parse_file(&path).unwrap_err();
        assert!(err.to_string().starts_with(&path.display().to_string()));
    }

    #[test]
    fn test_parse_file_missing() {
        let temp = tempdir().unwrap();
        let err = parse_file(temp.path().join("absent.go")).unwrap_err();
        assert!(matches!(err, GostmtError::FileRead { .. }));
    }

    #[test]
    fn test_parser_is_reusable() {
        let temp = tempdir().unwrap();
        let a = temp.path().join("a.go");
        let b = temp.path().join("b.go");
        fs::write(&a, "package p\n\nfunc a() { x() }\n").unwrap();
        fs::write(&b, "package p\n\nfunc b() {}\n").unwrap();

        let mut parser = SourceParser::new().unwrap();
        assert_eq!(parser.count_file(&a).unwrap().count(), 2);
        assert_eq!(parser.count_file(&b).unwrap().count(), 1);
    }
}
