//! Pre-flight checks run before a batch touches the file system.
//!
//! Only the file extension is inspected here. Whether a file exists or parses
//! as CSV is discovered later, while the batch is running, and surfaces as a
//! processing error.
//!
//! # Example
//!
//! ```
//! use csvsplit::validation::{has_csv_extension, validate_inputs};
//!
//! assert!(has_csv_extension("data/Sales.CSV"));
//! assert!(validate_inputs(&["a.csv", "b.txt"]).is_err());
//! ```

use crate::error::{SplitError, SplitResult};
use std::path::Path;

/// Returns `true` if `path` ends in `.csv`, compared case-insensitively.
///
/// A bare `.csv` file name (no stem) is accepted, the same as a plain suffix test.
pub fn has_csv_extension(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match path.extension() {
        Some(ext) => ext.eq_ignore_ascii_case("csv"),
        None => path
            .file_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(".csv")),
    }
}

/// Check that every input path carries a `.csv` extension.
///
/// # Errors
/// Returns [`SplitError::EmptyBatch`] for an empty input list and
/// [`SplitError::InvalidExtension`] naming the first offending path.
pub fn validate_inputs<P: AsRef<Path>>(inputs: &[P]) -> SplitResult<()> {
    if inputs.is_empty() {
        return Err(SplitError::EmptyBatch);
    }
    match inputs.iter().find(|p| !has_csv_extension(p)) {
        Some(bad) => Err(SplitError::InvalidExtension {
            path: bad.as_ref().to_path_buf(),
        }),
        None => Ok(()),
    }
}

/// Validate a caller-supplied chunk size, rejecting zero and negatives.
///
/// # Errors
/// Returns [`SplitError::InvalidChunkSize`] if `raw < 1`.
pub fn validate_chunk_size(raw: i64) -> SplitResult<usize> {
    if raw < 1 {
        return Err(SplitError::InvalidChunkSize(raw));
    }
    usize::try_from(raw).map_err(|_| SplitError::InvalidChunkSize(raw))
}
