//! # csvsplit
//!
//! Split large CSV files into smaller files of at most `chunk_size` data rows
//! each. Every chunk repeats the source header, rows keep their original order,
//! and chunk files are named deterministically.
//!
//! ## Key Features
//!
//! - **Batch splitting** - process several inputs into one shared output directory
//! - **Deterministic naming** - `{input_stem}_{prefix}_{n}.csv`, `n` starting at 1
//! - **Streaming or in-memory reads** - identical output, different memory profile
//! - **Progress callbacks** - one update per completed input, front-end agnostic
//! - **Two-tier errors** - pre-flight rejections vs. processing failures
//!
//! ## Quick Start
//!
//! ```no_run
//! use csvsplit::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let cfg = SplitConfig::default()
//!     .chunk_size(100_000)
//!     .prefix("part");
//!
//! let report = split_batch(
//!     &["exports/orders.csv", "exports/returns.csv"],
//!     &cfg,
//!     &mut |pct: u8| println!("{pct}%"),
//! )?;
//! println!("{} chunks in {}", report.chunk_count(), report.output_dir.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Output Layout
//!
//! All chunks of a batch go into `entries_{YYYYMMDD_HHMMSS}`, created inside the
//! configured output directory or, when none is set, next to the first input.
//! An existing directory is reused and existing chunk files are overwritten.
//!
//! A file with `n` data rows split at `c` rows yields `ceil(n / c)` chunks; all
//! but the last hold exactly `c` rows. A file with no data rows yields a single
//! header-only chunk unless [`EmptyInputPolicy::NoChunks`] is selected.
//!
//! ## Module Overview
//!
//! - [`config`] - [`SplitConfig`] and layered [`Settings`](config::Settings)
//! - [`validation`] - pre-flight extension and chunk-size checks
//! - [`planner`] - chunk count and row-range arithmetic
//! - [`naming`] - chunk file names and output directory resolution
//! - [`io`] - CSV reading/writing and glob expansion
//! - [`progress`] - the [`ProgressSink`] abstraction
//! - [`splitter`] - the batch driver
//! - [`testing`] - fixtures and helpers for tests

pub mod config;
pub mod error;
pub mod io;
pub mod naming;
pub mod planner;
pub mod progress;
pub mod splitter;
pub mod testing;
pub mod validation;

pub use crate::config::{CsvFormat, EmptyInputPolicy, ReadMode, SplitConfig};
pub use error::{SplitError, SplitResult};
pub use io::csv::{Table, read_table, write_chunk};
pub use progress::{LogProgress, NoProgress, ProgressSink};
pub use splitter::{BatchReport, ChunkReport, FileReport, split_batch, split_batch_at, split_file};
