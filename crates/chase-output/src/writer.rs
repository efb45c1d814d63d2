//! The `OutputWriter` trait implemented by tabular backends.

use crate::{FrameRow, OutputResult, TrajectorySummaryRow};

/// Trait implemented by tabular rollout writers.
///
/// Driven by [`RolloutOutputObserver`][crate::RolloutOutputObserver], which
/// stores errors internally; retrieve them with
/// [`take_error`][crate::RolloutOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of per-agent frame rows.
    fn write_frames(&mut self, rows: &[FrameRow]) -> OutputResult<()>;

    /// Write one trajectory summary row.
    fn write_summary(&mut self, row: &TrajectorySummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
