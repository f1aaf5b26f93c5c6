//! Testing utilities for split batches.
//!
//! - **Fixtures**: write small or large CSV inputs into a scratch directory
//! - **Chunk inspection**: parse an output chunk back into header and rows
//! - **Progress capture**: [`RecordingProgress`] remembers every update
//!
//! # Quick Start
//!
//! ```no_run
//! use csvsplit::testing::*;
//! use csvsplit::{SplitConfig, split_batch};
//!
//! # fn main() -> anyhow::Result<()> {
//! let tmp = tempfile::tempdir()?;
//! let input = write_numbered_csv(tmp.path(), "orders.csv", 25)?;
//! let mut progress = RecordingProgress::default();
//! let report = split_batch(&[input], &SplitConfig::default().chunk_size(10), &mut progress)?;
//! assert_eq!(report.chunk_count(), 3);
//! assert_eq!(progress.values, vec![100]);
//! # Ok(())
//! # }
//! ```

use crate::progress::ProgressSink;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Header used by [`write_numbered_csv`].
pub const NUMBERED_HEADER: [&str; 3] = ["id", "label", "amount"];

/// Row `i` as produced by [`write_numbered_csv`].
#[must_use]
pub fn numbered_row(i: usize) -> Vec<String> {
    vec![i.to_string(), format!("row-{i}"), format!("{}.{:02}", i * 3, i % 100)]
}

/// Write `text` verbatim to `dir/name`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_csv_text(dir: &Path, name: &str, text: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, text).with_context(|| format!("write fixture {}", path.display()))?;
    Ok(path)
}

/// Write a CSV with a header and `rows` data rows whose `id` column counts from 0.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_numbered_csv(dir: &Path, name: &str, rows: usize) -> Result<PathBuf> {
    let mut text = NUMBERED_HEADER.join(",");
    text.push('\n');
    for i in 0..rows {
        let _ = writeln!(text, "{}", numbered_row(i).join(","));
    }
    write_csv_text(dir, name, &text)
}

/// Parse a chunk file into its header and data rows.
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed.
pub fn read_chunk(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
    let headers = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for rec in rdr.records() {
        rows.push(rec?.iter().map(str::to_string).collect());
    }
    Ok((headers, rows))
}

/// File names in `dir`, sorted.
///
/// # Errors
/// Returns an error if the directory cannot be listed.
pub fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read_dir {}", dir.display()))? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Progress sink that records every value and counts flushes.
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    pub values: Vec<u8>,
    pub flushes: usize,
}

impl ProgressSink for RecordingProgress {
    fn set(&mut self, percent: u8) {
        self.values.push(percent);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
