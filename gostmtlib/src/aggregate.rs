//! Directory rollups.
//!
//! A directory's recursive count is its direct count plus the recursive count
//! of each known child directory. [`aggregate`] computes this bottom-up over an
//! explicit parent→children index, deepest directories first.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::stats::{DirectoryStats, FileStats};
use crate::walker::{parent_dir, WalkEntry};

/// Compute recursive counts for every known directory.
///
/// `direct` maps a directory to the statements found in files immediately
/// inside it; `dirs` is every directory the walk reached. A directory present
/// only in `direct` is still treated as known. Directories without an entry in
/// `direct` have a direct count of zero.
pub fn aggregate(
    direct: &BTreeMap<PathBuf, u64>,
    dirs: &BTreeSet<PathBuf>,
) -> BTreeMap<PathBuf, u64> {
    let known: BTreeSet<&Path> = dirs
        .iter()
        .chain(direct.keys())
        .map(PathBuf::as_path)
        .collect();

    let mut children: BTreeMap<&Path, Vec<&Path>> = BTreeMap::new();
    for &dir in &known {
        if let Some(parent) = dir.parent().filter(|p| known.contains(p)) {
            children.entry(parent).or_default().push(dir);
        }
    }

    let mut order: Vec<&Path> = known.iter().copied().collect();
    order.sort_by_key(|dir| Reverse(dir.components().count()));

    let mut recursive: BTreeMap<PathBuf, u64> = BTreeMap::new();
    for dir in order {
        let below: u64 = children.get(dir).map_or(0, |kids| {
            kids.iter()
                .map(|kid| recursive.get(*kid).copied().unwrap_or(0))
                .sum()
        });
        let own = direct.get(dir).copied().unwrap_or(0);
        recursive.insert(dir.to_path_buf(), own + below);
    }

    recursive
}

/// Accumulates walk output into per-directory statistics.
#[derive(Debug, Clone, Default)]
pub struct DirectoryTree {
    direct: BTreeMap<PathBuf, u64>,
    dirs: BTreeSet<PathBuf>,
}

impl DirectoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one walk entry.
    pub fn record(&mut self, entry: &WalkEntry) {
        match entry {
            WalkEntry::Directory(path) => self.record_dir(path.clone()),
            WalkEntry::File(file) => self.record_file(file),
        }
    }

    /// Note that a directory exists, even if it holds no source files.
    pub fn record_dir(&mut self, path: PathBuf) {
        self.dirs.insert(path);
    }

    /// Add a file's statements to its containing directory.
    pub fn record_file(&mut self, file: &FileStats) {
        let dir = parent_dir(&file.path);
        *self.direct.entry(dir.clone()).or_insert(0) += file.stats.count();
        self.dirs.insert(dir);
    }

    /// Direct and recursive counts for every directory, sorted by path string.
    pub fn finish(self) -> Vec<DirectoryStats> {
        let recursive = aggregate(&self.direct, &self.dirs);

        let mut rows: Vec<DirectoryStats> = recursive
            .into_iter()
            .map(|(path, total)| {
                let own = self.direct.get(&path).copied().unwrap_or(0);
                DirectoryStats::new(path, own, total)
            })
            .collect();

        // Byte order of the path text, not component order: "a-b" sorts before "a/b".
        rows.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
        rows
    }
}
