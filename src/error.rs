//! Error taxonomy for a split batch.
//!
//! A batch can fail in two ways:
//! - **Pre-flight** errors are raised before any file system access. Nothing is
//!   created or written.
//! - **Processing** errors wrap whatever went wrong once work started (directory
//!   creation, reading a source file, writing a chunk). Files already written
//!   for earlier inputs or chunks stay on disk.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for batch-level operations.
pub type SplitResult<T> = Result<T, SplitError>;

/// Batch-level error returned by [`split_batch`](crate::split_batch).
#[derive(Debug, Error)]
pub enum SplitError {
    // ── Pre-flight ────────────────────────────────────────────────────────────
    #[error("not a CSV file: {}", path.display())]
    InvalidExtension { path: PathBuf },

    #[error("chunk size must be a positive integer, got {0}")]
    InvalidChunkSize(i64),

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),

    #[error("no input files were supplied")]
    EmptyBatch,

    #[error("invalid settings: {0:#}")]
    Settings(anyhow::Error),

    // ── Processing ────────────────────────────────────────────────────────────
    #[error("{0:#}")]
    Processing(anyhow::Error),
}

impl SplitError {
    /// Returns `true` if the batch was rejected before any file I/O happened.
    #[must_use]
    pub fn is_preflight(&self) -> bool {
        !matches!(self, SplitError::Processing(_))
    }
}

impl From<anyhow::Error> for SplitError {
    fn from(err: anyhow::Error) -> Self {
        SplitError::Processing(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn preflight_classification() {
        assert!(SplitError::EmptyBatch.is_preflight());
        assert!(SplitError::InvalidChunkSize(0).is_preflight());
        assert!(SplitError::InvalidDelimiter("||".into()).is_preflight());
        assert!(SplitError::Settings(anyhow!("bad toml")).is_preflight());
        assert!(
            SplitError::InvalidExtension {
                path: "b.txt".into()
            }
            .is_preflight()
        );
        assert!(!SplitError::from(anyhow!("disk full")).is_preflight());
    }

    #[test]
    fn processing_message_keeps_context_chain() {
        let err = anyhow!("No such file or directory").context("open missing.csv");
        let msg = SplitError::from(err).to_string();
        assert!(msg.contains("open missing.csv"));
        assert!(msg.contains("No such file or directory"));
    }
}
