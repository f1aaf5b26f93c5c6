//! Output naming: chunk file names and the batch output directory.
//!
//! Every chunk of input `sales.csv` written with prefix `part` lands at
//! `{out_dir}/sales_part_{n}.csv`, with `n` counting from 1. All inputs of a
//! batch share one `entries_{YYYYMMDD_HHMMSS}` directory.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

/// `strftime` pattern for the directory timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Base name of `input` with its last extension removed.
#[must_use]
pub fn input_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name for chunk `index` (0-based) of `input`.
#[must_use]
pub fn chunk_file_name(input: &Path, prefix: &str, index: usize) -> String {
    format!("{}_{}_{}.csv", input_stem(input), prefix, index + 1)
}

/// Full path for chunk `index` (0-based) of `input` inside `out_dir`.
#[must_use]
pub fn chunk_path(out_dir: &Path, input: &Path, prefix: &str, index: usize) -> PathBuf {
    out_dir.join(chunk_file_name(input, prefix, index))
}

/// Directory name `entries_{timestamp}` for a batch started at `now`.
#[must_use]
pub fn entries_dir_name(now: NaiveDateTime) -> String {
    format!("entries_{}", now.format(TIMESTAMP_FORMAT))
}

/// Resolve the batch output directory without touching the file system.
///
/// The parent is `user_dir` if given, otherwise the directory holding `first_input`.
#[must_use]
pub fn resolve_output_dir(
    first_input: &Path,
    user_dir: Option<&Path>,
    now: NaiveDateTime,
) -> PathBuf {
    let parent = match user_dir {
        Some(dir) => dir,
        None => first_input.parent().unwrap_or(Path::new("")),
    };
    parent.join(entries_dir_name(now))
}

/// Resolve and create (`mkdir -p`) the batch output directory.
///
/// An existing directory is reused as is.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn create_output_dir(
    first_input: &Path,
    user_dir: Option<&Path>,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    let dir = resolve_output_dir(first_input, user_dir, now);
    create_dir_all(&dir).with_context(|| format!("mkdir -p {}", dir.display()))?;
    Ok(dir)
}
