//! Directory traversal.
//!
//! [`walk`] yields one [`WalkEntry`] per directory and per counted file, in a
//! single pass. Files are parsed and classified as they are reached, so a
//! caller can report each file before the next one is read.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::GostmtError;
use crate::filter::FilterConfig;
use crate::parser::SourceParser;
use crate::stats::FileStats;
use crate::Result;

/// One step of a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry {
    /// A directory was entered (reported before its contents)
    Directory(PathBuf),
    /// A source file was parsed and classified
    File(FileStats),
}

/// Iterator over the directories and counted files below a root.
///
/// Yields `Err` for the first traversal, read or parse failure and then
/// stops.
pub struct Walker {
    entries: walkdir::IntoIter,
    filter: FilterConfig,
    parser: SourceParser,
    root_parent: Option<PathBuf>,
    done: bool,
}

/// Start walking `root`.
///
/// Symbolic links are never followed. When `root` is a regular file, the walk
/// is a one-entry tree: its parent directory followed by the file itself
/// (if it passes the filter).
pub fn walk(root: impl AsRef<Path>, filter: FilterConfig) -> Result<Walker> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(GostmtError::PathNotFound(root.to_path_buf()));
    }

    let root_parent = if root.is_file() {
        Some(parent_dir(root))
    } else {
        None
    };

    let entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(Walker {
        entries,
        filter,
        parser: SourceParser::new()?,
        root_parent,
        done: false,
    })
}

/// Directory that holds `path`; `.` for a bare file name.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl Walker {
    fn fail(&mut self, err: GostmtError) -> Option<Result<WalkEntry>> {
        self.done = true;
        Some(Err(err))
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(dir) = self.root_parent.take() {
            return Some(Ok(WalkEntry::Directory(dir)));
        }

        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return self.fail(e.into()),
            };

            let file_type = entry.file_type();

            if file_type.is_dir() {
                tracing::debug!(dir = %entry.path().display(), "entering directory");
                return Some(Ok(WalkEntry::Directory(entry.into_path())));
            }

            if !file_type.is_file() || !self.filter.matches(entry.path()) {
                continue;
            }

            match self.parser.count_file(entry.path()) {
                Ok(stats) => {
                    tracing::debug!(
                        file = %entry.path().display(),
                        statements = stats.count(),
                        "counted"
                    );
                    return Some(Ok(WalkEntry::File(FileStats::new(
                        entry.into_path(),
                        stats,
                    ))));
                }
                Err(e) => return self.fail(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn collect(root: &Path) -> Vec<WalkEntry> {
        walk(root, FilterConfig::new())
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn dirs(entries: &[WalkEntry]) -> Vec<PathBuf> {
        entries
            .iter()
            .filter_map(|e| match e {
                WalkEntry::Directory(p) => Some(p.clone()),
                WalkEntry::File(_) => None,
            })
            .collect()
    }

    fn files(entries: &[WalkEntry]) -> Vec<FileStats> {
        entries
            .iter()
            .filter_map(|e| match e {
                WalkEntry::File(f) => Some(f.clone()),
                WalkEntry::Directory(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_walk_visits_every_go_file_once() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("main.go"), "package main\n\nfunc main() {}\n").unwrap();
        fs::write(root.join("a/a.go"), "package a\n\nfunc A() { x() }\n").unwrap();
        fs::write(root.join("a/b/b.go"), "package b\n").unwrap();
        fs::write(root.join("a/notes.txt"), "not go").unwrap();

        let entries = collect(root);
        let files = files(&entries);

        assert_eq!(files.len(), 3);
        let a = files.iter().find(|f| f.path.ends_with("a/a.go")).unwrap();
        assert_eq!(a.stats.count(), 2);
        assert!(!files.iter().any(|f| f.path.ends_with("notes.txt")));
    }

    #[test]
    fn test_walk_reports_every_directory() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::create_dir_all(root.join("docs/img")).unwrap();
        fs::write(root.join("docs/README.md"), "# docs").unwrap();

        let dirs = dirs(&collect(root));

        assert_eq!(dirs.len(), 4);
        assert_eq!(dirs[0], root);
        assert!(dirs.contains(&root.join("empty")));
        assert!(dirs.contains(&root.join("docs/img")));
    }

    #[test]
    fn test_directory_precedes_its_files() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("pkg")).unwrap();
        fs::write(root.join("pkg/p.go"), "package pkg\n").unwrap();

        let entries = collect(root);
        let dir_pos = entries
            .iter()
            .position(|e| *e == WalkEntry::Directory(root.join("pkg")))
            .unwrap();
        let file_pos = entries
            .iter()
            .position(|e| matches!(e, WalkEntry::File(f) if f.path.ends_with("pkg/p.go")))
            .unwrap();
        assert!(dir_pos < file_pos);
    }

    #[test]
    fn test_walk_stops_at_first_parse_error() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(root.join("a.go"), "package p\n\nfunc a() {}\n").unwrap();
        fs::write(root.join("b.go"), "package p\n\nfunc b() {\n").unwrap();
        fs::write(root.join("c.go"), "package p\n\nfunc c() {}\n").unwrap();

        let results: Vec<_> = walk(root, FilterConfig::new()).unwrap().collect();

        // root dir, a.go, then the failure on b.go; c.go is never reached
        assert_eq!(results.len(), 3);
        assert!(results[1].is_ok());
        match &results[2] {
            Err(GostmtError::Parse { path, .. }) => assert!(path.ends_with("b.go")),
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_walk_nonexistent_root() {
        let result = walk("/nonexistent/path", FilterConfig::new());
        assert!(matches!(result, Err(GostmtError::PathNotFound(_))));
    }

    #[test]
    fn test_walk_stops_at_traversal_error() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("gone");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.go"), "package gone\n").unwrap();

        let mut walker = walk(&root, FilterConfig::new()).unwrap();
        fs::remove_dir_all(&root).unwrap();

        assert!(matches!(walker.next(), Some(Err(GostmtError::Walk(_)))));
        assert!(walker.next().is_none());
    }

    #[test]
    fn test_walk_single_file_root() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("solo.go");
        fs::write(&file, "package solo\n\nfunc f() { g() }\n").unwrap();

        let entries = collect(&file);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], WalkEntry::Directory(temp.path().to_path_buf()));
        let files = files(&entries);
        assert_eq!(files[0].path, file);
        assert_eq!(files[0].stats.count(), 2);
    }

    #[test]
    fn test_walk_applies_filter_to_files_only() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("vendor/lib")).unwrap();
        fs::write(root.join("vendor/lib/l.go"), "package lib\n").unwrap();
        fs::write(root.join("m.go"), "package m\n").unwrap();

        let filter = FilterConfig::new().exclude("**/vendor/**").unwrap();
        let entries: Vec<_> = walk(root, filter)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(files(&entries).len(), 1);
        assert!(dirs(&entries).contains(&root.join("vendor/lib")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/s.go"), "package sub\n\nfunc s() {}\n").unwrap();
        symlink(&root, root.join("sub/loop")).unwrap();
        symlink(root.join("sub/s.go"), root.join("alias.go")).unwrap();

        let entries = collect(&root);

        assert_eq!(files(&entries).len(), 1);
        assert_eq!(dirs(&entries).len(), 2);
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("main.go")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("a/b/c.go")), PathBuf::from("a/b"));
    }
}
