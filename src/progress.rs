//! Batch progress reporting.
//!
//! A batch pushes one update per completed input file. The sink decides what
//! to do with it: redraw a progress bar, print a line, or nothing. Callers
//! running a UI on another thread marshal the update themselves.
//!
//! ```
//! use csvsplit::progress::{ProgressSink, progress_percent};
//!
//! let mut seen = Vec::new();
//! let mut sink = |p: u8| seen.push(p);
//! for done in 1..=3 {
//!     sink.set(progress_percent(done, 3));
//! }
//! assert_eq!(seen, vec![33, 66, 100]);
//! ```

/// Receiver of percentage updates (0–100).
pub trait ProgressSink {
    /// Store the new percentage.
    fn set(&mut self, percent: u8);

    /// Signal that the stored value should be rendered now.
    fn flush(&mut self) {}
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn set(&mut self, percent: u8) {
        self(percent);
    }
}

/// Discards all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn set(&mut self, _percent: u8) {}
}

/// Emits each update as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress {
    last: u8,
}

impl ProgressSink for LogProgress {
    fn set(&mut self, percent: u8) {
        self.last = percent;
    }

    fn flush(&mut self) {
        tracing::info!(percent = self.last, "progress");
    }
}

/// Percentage after `completed` of `total` files: `floor(completed * 100 / total)`.
///
/// Exact integer arithmetic, so the last file always reports 100.
#[must_use]
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = completed.min(total) * 100 / total;
    u8::try_from(pct).unwrap_or(100)
}
