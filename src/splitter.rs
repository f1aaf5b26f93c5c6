//! Batch driver.
//!
//! [`split_batch`] runs the whole job for a list of inputs:
//! 1. pre-flight checks (extensions, chunk size) with no file system access,
//! 2. output directory resolution and creation,
//! 3. each input split in order, one progress update after each.
//!
//! The first failure aborts the batch. Files written before it are left in place.

use crate::config::{ReadMode, SplitConfig};
use crate::error::{SplitError, SplitResult};
use crate::io::csv::{split_in_memory, split_streaming};
use crate::naming::create_output_dir;
use crate::progress::{ProgressSink, progress_percent};
use crate::validation::validate_inputs;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One chunk file that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkReport {
    pub path: PathBuf,
    /// Data rows, header excluded.
    pub rows: usize,
}

/// Outcome for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub total_rows: usize,
    pub chunks: Vec<ChunkReport>,
}

/// Outcome of a successful batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Chunk files written across all inputs.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.files.iter().map(|f| f.chunks.len()).sum()
    }

    /// Data rows copied across all inputs.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|f| f.total_rows).sum()
    }
}

/// Split one input file into `out_dir` according to `cfg`.
///
/// # Errors
/// Returns an error if the input cannot be read or a chunk cannot be written.
pub fn split_file(input: &Path, out_dir: &Path, cfg: &SplitConfig) -> Result<FileReport> {
    let chunks = match cfg.read_mode {
        ReadMode::Streaming => split_streaming(input, out_dir, cfg)?,
        ReadMode::InMemory => split_in_memory(input, out_dir, cfg)?,
    };
    let total_rows = chunks.iter().map(|c| c.rows).sum();
    Ok(FileReport {
        input: input.to_path_buf(),
        total_rows,
        chunks,
    })
}

/// Split every input into one shared, timestamped output directory.
///
/// `progress` receives one update per completed input file.
///
/// # Errors
/// Pre-flight problems ([`SplitError::is_preflight`]) are reported before anything
/// is created. Any later failure is a [`SplitError::Processing`].
pub fn split_batch<P: AsRef<Path>>(
    inputs: &[P],
    cfg: &SplitConfig,
    progress: &mut dyn ProgressSink,
) -> SplitResult<BatchReport> {
    split_batch_at(inputs, cfg, progress, Local::now().naive_local())
}

/// [`split_batch`] with an explicit start time for the directory name.
///
/// # Errors
/// See [`split_batch`].
pub fn split_batch_at<P: AsRef<Path>>(
    inputs: &[P],
    cfg: &SplitConfig,
    progress: &mut dyn ProgressSink,
    now: NaiveDateTime,
) -> SplitResult<BatchReport> {
    validate_inputs(inputs)?;
    if cfg.chunk_size == 0 {
        return Err(SplitError::InvalidChunkSize(0));
    }

    let first = inputs[0].as_ref();
    let output_dir = create_output_dir(first, cfg.output_dir.as_deref(), now)?;
    tracing::info!(
        files = inputs.len(),
        chunk_size = cfg.chunk_size,
        output_dir = %output_dir.display(),
        "starting batch"
    );

    let total = inputs.len();
    let mut files = Vec::with_capacity(total);
    for (done, input) in inputs.iter().enumerate() {
        let input = input.as_ref();
        let report = split_file(input, &output_dir, cfg)
            .with_context(|| format!("split {}", input.display()))?;
        tracing::info!(
            input = %input.display(),
            rows = report.total_rows,
            chunks = report.chunks.len(),
            "file complete"
        );
        files.push(report);

        progress.set(progress_percent(done + 1, total));
        progress.flush();
    }

    Ok(BatchReport { output_dir, files })
}
