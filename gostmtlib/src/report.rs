//! Plain-text report lines.
//!
//! The line formats are a stable contract for scripts consuming the output:
//!
//! ```text
//! {path}: {count} statements
//! Total statements in directory '{dir}': {total}
//! {path}: {direct} statements (direct), {recursive} statements (recursive)
//! ```

use std::io::{self, Write};
use std::path::Path;

use crate::counter::CountResult;
use crate::options::Aggregation;
use crate::stats::{DirectoryStats, FileStats};

/// Per-file line of the flat report.
pub fn file_line(file: &FileStats) -> String {
    format!("{}: {} statements", file.path.display(), file.stats.count())
}

/// Closing line of the flat report.
pub fn total_line(root: &Path, total: u64) -> String {
    format!(
        "Total statements in directory '{}': {}",
        root.display(),
        total
    )
}

/// Per-directory line of the directory report.
pub fn directory_line(dir: &DirectoryStats) -> String {
    format!(
        "{}: {} statements (direct), {} statements (recursive)",
        dir.path.display(),
        dir.direct,
        dir.recursive
    )
}

/// Writes report lines to an output stream.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_file(&mut self, file: &FileStats) -> io::Result<()> {
        writeln!(self.out, "{}", file_line(file))
    }

    pub fn write_total(&mut self, root: &Path, total: u64) -> io::Result<()> {
        writeln!(self.out, "{}", total_line(root, total))
    }

    pub fn write_directories(&mut self, dirs: &[DirectoryStats]) -> io::Result<()> {
        for dir in dirs {
            writeln!(self.out, "{}", directory_line(dir))?;
        }
        Ok(())
    }

    /// Write a finished result in the layout of `aggregation`.
    pub fn write_result(&mut self, result: &CountResult, aggregation: Aggregation) -> io::Result<()> {
        match aggregation {
            Aggregation::ByFile => {
                for file in &result.files {
                    self.write_file(file)?;
                }
                self.write_total(&result.root, result.total.count())
            }
            Aggregation::ByDirectory => self.write_directories(&result.directories),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
