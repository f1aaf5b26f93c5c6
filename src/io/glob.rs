//! Glob expansion for batch inputs.
//!
//! Command-line inputs may be plain paths or patterns such as `exports/*.csv`.
//! Plain paths pass through untouched, so a missing file still fails later as
//! a processing error and a wrong extension still fails the pre-flight check.
//!
//! # Examples
//!
//! ```no_run
//! use csvsplit::io::glob::expand_inputs;
//!
//! let files = expand_inputs(&["exports/2024-*.csv", "extra.csv"])?;
//! # use anyhow::Error; Ok::<(), Error>(())
//! ```

use anyhow::{Context, Result, bail};
use glob::glob;
use std::path::PathBuf;

/// Returns `true` if `s` contains glob metacharacters.
#[must_use]
pub fn is_pattern(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Expand a glob pattern into a sorted vector of matching file paths.
///
/// Directories are skipped. Zero matches yield an empty vector.
///
/// # Errors
/// Returns an error if the pattern is invalid or a directory cannot be read.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;

    let mut result = Vec::new();
    for entry in paths {
        let path =
            entry.with_context(|| format!("error reading glob entry for pattern: {pattern}"))?;
        if path.is_file() {
            result.push(path);
        }
    }

    result.sort();
    Ok(result)
}

/// Like [`expand_glob`], but zero matches is an error.
///
/// # Errors
/// See [`expand_glob`]; additionally fails when nothing matches.
pub fn expand_glob_required(pattern: &str) -> Result<Vec<PathBuf>> {
    let files = expand_glob(pattern)?;
    if files.is_empty() {
        bail!("no files found matching pattern: {pattern}");
    }
    Ok(files)
}

/// Expand each input in order. Patterns are expanded (sorted within each
/// pattern), plain paths are kept as given.
///
/// # Errors
/// Returns an error if a pattern is invalid or matches nothing.
pub fn expand_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::with_capacity(inputs.len());
    for input in inputs {
        let input = input.as_ref();
        if is_pattern(input) {
            out.extend(expand_glob_required(input)?);
        } else {
            out.push(PathBuf::from(input));
        }
    }
    Ok(out)
}
