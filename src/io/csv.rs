//! CSV reading and chunk writing.
//!
//! This module provides:
//! - **Table loading**: [`read_table`] parses a whole file into a [`Table`] of raw records
//! - **Chunk writing**: [`write_chunk`] writes one row range, header first
//! - **Splitters**: [`split_in_memory`] and [`split_streaming`] turn one source file
//!   into numbered chunk files
//!
//! # Design notes
//! - Records are handled as [`ByteRecord`]s, so field bytes are copied through
//!   untouched and no schema is inferred.
//! - Quoted fields with embedded delimiters or newlines survive the round trip
//!   because both sides go through the `csv` crate rather than line splitting.
//! - Rows shorter than the header are padded with empty fields; longer rows are
//!   rejected.
//! - Both splitters share [`ChunkWriter`], so they produce byte-identical files.

use crate::config::{CsvFormat, EmptyInputPolicy, SplitConfig};
use crate::naming::chunk_path;
use crate::planner::plan_chunks;
use crate::splitter::ChunkReport;
use anyhow::{Context, Result, bail};
use csv::{ByteRecord, Reader, ReaderBuilder, Writer, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// An input file loaded in full.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Header row, if the source has one.
    pub headers: Option<ByteRecord>,
    /// Data rows in file order.
    pub rows: Vec<ByteRecord>,
}

impl Table {
    /// Number of data rows (header excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in `range`.
    ///
    /// # Panics
    /// Panics if `range` is out of bounds.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &[ByteRecord] {
        &self.rows[range]
    }
}

fn open_reader(path: &Path, format: &CsvFormat) -> Result<Reader<BufReader<File>>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Ok(ReaderBuilder::new()
        .has_headers(format.has_headers)
        .delimiter(format.delimiter)
        .flexible(true)
        .from_reader(BufReader::new(f)))
}

fn read_headers(
    rdr: &mut Reader<BufReader<File>>,
    format: &CsvFormat,
    path: &Path,
) -> Result<Option<ByteRecord>> {
    if !format.has_headers {
        return Ok(None);
    }
    let headers = rdr
        .byte_headers()
        .with_context(|| format!("read CSV header of {}", path.display()))?
        .clone();
    if headers.is_empty() {
        bail!("{} has no header row", path.display());
    }
    Ok(Some(headers))
}

/// Bring `record` (1-based data row `row`) to `width` fields.
///
/// Missing trailing fields become empty; extra fields are an error.
fn fit_record(record: &mut ByteRecord, width: usize, row: usize, path: &Path) -> Result<()> {
    if record.len() > width {
        bail!(
            "parse CSV record #{row} in {}: expected {width} fields, found {}",
            path.display(),
            record.len()
        );
    }
    while record.len() < width {
        record.push_field(b"");
    }
    Ok(())
}

/// Read a CSV file into memory.
///
/// Rows may be shorter than the header (or, without one, the first row) and
/// are padded with empty fields. Longer rows are rejected.
///
/// # Errors
/// Returns an error if the file cannot be opened, has no header row while
/// `format.has_headers` is set, or any record fails to parse.
pub fn read_table(path: impl AsRef<Path>, format: &CsvFormat) -> Result<Table> {
    let path = path.as_ref();
    let mut rdr = open_reader(path, format)?;
    let headers = read_headers(&mut rdr, format, path)?;
    let mut width = headers.as_ref().map(ByteRecord::len);
    let mut rows = Vec::new();
    for (i, rec) in rdr.byte_records().enumerate() {
        let mut rec =
            rec.with_context(|| format!("parse CSV record #{} in {}", i + 1, path.display()))?;
        let w = *width.get_or_insert(rec.len());
        fit_record(&mut rec, w, i + 1, path)?;
        rows.push(rec);
    }
    Ok(Table { headers, rows })
}

/// Writer for one chunk file. The header row is written on creation.
pub struct ChunkWriter {
    path: PathBuf,
    rows: usize,
    inner: Writer<BufWriter<File>>,
}

impl ChunkWriter {
    /// Create (or truncate) `path` and write `headers` if present.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or the header cannot be written.
    pub fn create(path: PathBuf, format: &CsvFormat, headers: Option<&ByteRecord>) -> Result<Self> {
        let f = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        let mut inner = WriterBuilder::new()
            .has_headers(false)
            .delimiter(format.delimiter)
            .from_writer(BufWriter::new(f));
        if let Some(h) = headers {
            inner
                .write_byte_record(h)
                .with_context(|| format!("write header to {}", path.display()))?;
        }
        Ok(Self {
            path,
            rows: 0,
            inner,
        })
    }

    /// Data rows written so far.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Append one data row.
    ///
    /// # Errors
    /// Returns an error if the row cannot be written.
    pub fn write(&mut self, record: &ByteRecord) -> Result<()> {
        self.inner
            .write_byte_record(record)
            .with_context(|| format!("write row #{} to {}", self.rows + 1, self.path.display()))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush to disk and report what was written.
    ///
    /// # Errors
    /// Returns an error if buffered data cannot be flushed.
    pub fn finish(mut self) -> Result<ChunkReport> {
        self.inner
            .flush()
            .with_context(|| format!("flush {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), rows = self.rows, "chunk written");
        Ok(ChunkReport {
            path: self.path,
            rows: self.rows,
        })
    }
}

/// Write `rows` (plus `headers`, if any) to a new CSV file at `path`.
///
/// An existing file at `path` is overwritten.
///
/// # Returns
/// The written chunk's path and row count.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_chunk(
    path: impl Into<PathBuf>,
    format: &CsvFormat,
    headers: Option<&ByteRecord>,
    rows: &[ByteRecord],
) -> Result<ChunkReport> {
    let mut w = ChunkWriter::create(path.into(), format, headers)?;
    for row in rows {
        w.write(row)?;
    }
    w.finish()
}

/// Split `input` by loading it fully, then writing each planned row range.
///
/// # Errors
/// Returns the first read or write error; chunks written before it stay on disk.
pub fn split_in_memory(input: &Path, out_dir: &Path, cfg: &SplitConfig) -> Result<Vec<ChunkReport>> {
    let table = read_table(input, &cfg.format)?;
    plan_chunks(table.len(), cfg.chunk_size, cfg.empty_input)
        .into_iter()
        .enumerate()
        .map(|(i, range)| {
            write_chunk(
                chunk_path(out_dir, input, &cfg.prefix, i),
                &cfg.format,
                table.headers.as_ref(),
                table.slice(range),
            )
        })
        .collect()
}

/// Split `input` record by record, holding at most one record in memory.
///
/// Produces the same files as [`split_in_memory`].
///
/// # Errors
/// Returns the first read or write error; chunks written before it stay on disk.
pub fn split_streaming(input: &Path, out_dir: &Path, cfg: &SplitConfig) -> Result<Vec<ChunkReport>> {
    let mut rdr = open_reader(input, &cfg.format)?;
    let headers = read_headers(&mut rdr, &cfg.format, input)?;

    let mut chunks = Vec::new();
    let mut current: Option<ChunkWriter> = None;
    let mut record = ByteRecord::new();
    let mut width = headers.as_ref().map(ByteRecord::len);
    let mut row: usize = 0;

    while rdr
        .read_byte_record(&mut record)
        .with_context(|| format!("parse CSV record #{} in {}", row + 1, input.display()))?
    {
        row += 1;
        let w = *width.get_or_insert(record.len());
        fit_record(&mut record, w, row, input)?;

        if current.as_ref().is_none_or(|w| w.rows() >= cfg.chunk_size) {
            if let Some(done) = current.take() {
                chunks.push(done.finish()?);
            }
            let path = chunk_path(out_dir, input, &cfg.prefix, chunks.len());
            current = Some(ChunkWriter::create(path, &cfg.format, headers.as_ref())?);
        }
        if let Some(ref mut writer) = current {
            writer.write(&record)?;
        }
    }

    match current.take() {
        Some(last) => chunks.push(last.finish()?),
        None if cfg.empty_input == EmptyInputPolicy::HeaderOnlyChunk => {
            let path = chunk_path(out_dir, input, &cfg.prefix, 0);
            chunks.push(ChunkWriter::create(path, &cfg.format, headers.as_ref())?.finish()?);
        }
        None => {}
    }
    Ok(chunks)
}
