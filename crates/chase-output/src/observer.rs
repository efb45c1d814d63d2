//! `RolloutOutputObserver<W>` — bridges `RolloutObserver` to an `OutputWriter`.

use chase_core::{State, Step, TimeStep, Trajectory, TrajectoryId};
use chase_sim::RolloutObserver;

use crate::row::{FrameRow, TrajectorySummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`RolloutObserver`] that writes every recorded state and a per-trajectory
/// summary to any [`OutputWriter`] backend.
///
/// Frame `0` is the initial state; frame `k + 1` is step `k`'s `next_state`.
///
/// Errors from the writer are stored internally because `RolloutObserver`
/// methods have no return value.  After sampling, call
/// [`finish`][Self::finish] and check [`take_error`][Self::take_error].
pub struct RolloutOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RolloutOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after sampling).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> RolloutObserver for RolloutOutputObserver<W> {
    fn on_trajectory_start(&mut self, id: TrajectoryId, initial: &State) {
        let rows = FrameRow::from_state(id.0, 0, initial);
        let result = self.writer.write_frames(&rows);
        self.store_err(result);
    }

    fn on_step(&mut self, id: TrajectoryId, step: Step, record: &TimeStep) {
        let rows = FrameRow::from_state(id.0, step.0 as u64 + 1, &record.next_state);
        let result = self.writer.write_frames(&rows);
        self.store_err(result);
    }

    fn on_trajectory_end(&mut self, trajectory: &Trajectory) {
        let result = self.writer.write_summary(&TrajectorySummaryRow::from(trajectory));
        self.store_err(result);
    }
}
