//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `frames.csv`: one row per agent per recorded state
//! - `trajectories.csv`: one summary row per trajectory

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FrameRow, OutputResult, TrajectorySummaryRow};

pub(crate) const FRAME_HEADER: [&str; 8] =
    ["trajectory", "frame", "agent", "role", "x", "y", "vx", "vy"];

pub(crate) fn frame_record(row: &FrameRow) -> [String; 8] {
    [
        row.trajectory.to_string(),
        row.frame.to_string(),
        row.agent.to_string(),
        row.role.to_string(),
        row.x.to_string(),
        row.y.to_string(),
        row.vx.to_string(),
        row.vy.to_string(),
    ]
}

/// Writes rollout output to two CSV files.
pub struct CsvWriter {
    frames:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut frames = Writer::from_path(dir.join("frames.csv"))?;
        frames.write_record(FRAME_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("trajectories.csv"))?;
        summaries.write_record([
            "trajectory",
            "seed",
            "wolf_subtlety",
            "captured",
            "steps",
            "total_reward",
        ])?;

        Ok(Self {
            frames,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_frames(&mut self, rows: &[FrameRow]) -> OutputResult<()> {
        for row in rows {
            self.frames.write_record(frame_record(row))?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &TrajectorySummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.trajectory.to_string(),
            row.seed.to_string(),
            row.wolf_subtlety.to_string(),
            (row.captured as u8).to_string(),
            row.steps.to_string(),
            row.total_reward.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.frames.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
