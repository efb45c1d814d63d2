//! `chase-output` — persistence, tables, and rendering for sampled
//! trajectories.
//!
//! | Module       | Output                                                      |
//! |--------------|-------------------------------------------------------------|
//! | [`store`]    | `<prefix>_<key>=<value>….json` trajectory batches           |
//! | [`csv`]      | `frames.csv`, `trajectories.csv` via [`OutputWriter`]       |
//! | [`render`]   | `0.png`, `1.png`, … or a frame CSV via [`FrameSink`]         |
//!
//! Tabular output is driven by [`RolloutOutputObserver`], which implements
//! `chase_sim::RolloutObserver`.  Rendering replays a finished trajectory
//! through an `Interpolator` with [`visualize_trajectory`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use chase_output::{PngFrameSink, RenderStyle, visualize_trajectory};
//!
//! let mut sink = PngFrameSink::new("frames", *scenario.arena(), RenderStyle::default())?;
//! visualize_trajectory(&trajectory, &scenario.interpolator(), &mut sink)?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod render;
pub mod row;
pub mod store;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RolloutOutputObserver;
pub use render::{Canvas, CsvFrameSink, FrameSink, PngFrameSink, RenderStyle, visualize_trajectory};
pub use row::{FrameRow, TrajectorySummaryRow};
pub use store::{TrajectoryStore, save_path};
pub use writer::OutputWriter;
