//! Chunk arithmetic.
//!
//! Splits a table of `total_rows` data rows (header excluded) into contiguous,
//! non-overlapping ranges of at most `chunk_size` rows. Ranges are 0-based and
//! end-exclusive, and their union covers `[0, total_rows)` in order.

use crate::config::EmptyInputPolicy;
use std::ops::Range;

/// Number of chunks needed for `total_rows` rows at `chunk_size` rows each.
///
/// An empty table yields one chunk under [`EmptyInputPolicy::HeaderOnlyChunk`]
/// and none under [`EmptyInputPolicy::NoChunks`].
///
/// `chunk_size` must be non-zero; callers validate it up front.
#[must_use]
pub fn chunk_count(total_rows: usize, chunk_size: usize, empty: EmptyInputPolicy) -> usize {
    debug_assert!(chunk_size > 0, "chunk_size must be validated before planning");
    if total_rows == 0 {
        return match empty {
            EmptyInputPolicy::HeaderOnlyChunk => 1,
            EmptyInputPolicy::NoChunks => 0,
        };
    }
    total_rows.div_ceil(chunk_size)
}

/// Row range covered by chunk `index` (0-based).
#[must_use]
pub fn chunk_range(index: usize, chunk_size: usize, total_rows: usize) -> Range<usize> {
    let start = (index * chunk_size).min(total_rows);
    let end = ((index + 1) * chunk_size).min(total_rows);
    start..end
}

/// All chunk ranges for a table, in order.
#[must_use]
pub fn plan_chunks(total_rows: usize, chunk_size: usize, empty: EmptyInputPolicy) -> Vec<Range<usize>> {
    (0..chunk_count(total_rows, chunk_size, empty))
        .map(|i| chunk_range(i, chunk_size, total_rows))
        .collect()
}
