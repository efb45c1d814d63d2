//! Rasterising states to frames, and replaying trajectories through a sink.
//!
//! Each frame is the arena background, the boundary outline, then one filled
//! circle per agent drawn in `AgentId` order (so later agents paint over
//! earlier ones).  Pixel coordinates are arena coordinates: `(0, 0)` is the
//! top-left corner and `y` grows downward.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chase_core::{Role, State, Trajectory, Vec2};
use chase_env::{Boundary, Interpolator, TerminalCheck};
use csv::Writer;
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use tracing::debug;

use crate::csv::{FRAME_HEADER, frame_record};
use crate::{FrameRow, OutputError, OutputResult};

// ── Style ─────────────────────────────────────────────────────────────────────

/// Colours and sizes used for every frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    pub background:     [u8; 3],
    pub boundary_color: [u8; 3],
    /// Outline thickness in pixels, drawn inward from the boundary.
    pub boundary_width: u32,
    pub agent_radius:   u32,
    pub sheep:          [u8; 3],
    pub wolf:           [u8; 3],
    pub distractor:     [u8; 3],
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background:     [0, 0, 0],
            boundary_color: [255, 255, 255],
            boundary_width: 4,
            agent_radius:   10,
            sheep:          [0, 255, 0],
            wolf:           [255, 0, 0],
            distractor:     [255, 255, 255],
        }
    }
}

impl RenderStyle {
    pub fn color_of(&self, role: Role) -> [u8; 3] {
        match role {
            Role::Sheep      => self.sheep,
            Role::Wolf       => self.wolf,
            Role::Distractor => self.distractor,
        }
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// An RGB raster with the few primitives a frame needs.  All drawing is
/// clipped to the canvas.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> OutputResult<Self> {
        if width == 0 || height == 0 {
            return Err(OutputError::Render(format!("canvas must be non-empty, got {width}x{height}")));
        }
        Ok(Self { image: ImageBuffer::from_pixel(width, height, Rgb(background)) })
    }

    /// A canvas covering `boundary` from the origin to its far corner.
    pub fn covering(boundary: &Boundary, background: [u8; 3]) -> OutputResult<Self> {
        Self::new(boundary.x.max().ceil() as u32, boundary.y.max().ceil() as u32, background)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        (x < self.width() && y < self.height()).then(|| self.image.get_pixel(x, y).0)
    }

    pub fn fill(&mut self, color: [u8; 3]) {
        for p in self.image.pixels_mut() {
            *p = Rgb(color);
        }
    }

    /// Fill the half-open rectangle `[x0, x1) × [y0, y1)`.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3]) {
        let (w, h) = (self.width() as i64, self.height() as i64);
        for y in y0.max(0)..y1.min(h) {
            for x in x0.max(0)..x1.min(w) {
                self.image.put_pixel(x as u32, y as u32, Rgb(color));
            }
        }
    }

    /// Outline `boundary` with a `width`-pixel line on its inner side.
    pub fn outline(&mut self, boundary: &Boundary, width: u32, color: [u8; 3]) {
        let x0 = boundary.x.min().round() as i64;
        let x1 = boundary.x.max().round() as i64;
        let y0 = boundary.y.min().round() as i64;
        let y1 = boundary.y.max().round() as i64;
        let w = width as i64;
        self.fill_rect(x0, y0, x1, y0 + w, color);
        self.fill_rect(x0, y1 - w, x1, y1, color);
        self.fill_rect(x0, y0, x0 + w, y1, color);
        self.fill_rect(x1 - w, y0, x1, y1, color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: u32, color: [u8; 3]) {
        let (cx, cy) = (center.x.round() as i64, center.y.round() as i64);
        let r = radius as i64;
        let (w, h) = (self.width() as i64, self.height() as i64);
        for dy in -r..=r {
            for dx in -r..=r {
                let (x, y) = (cx + dx, cy + dy);
                if dx * dx + dy * dy <= r * r && (0..w).contains(&x) && (0..h).contains(&y) {
                    self.image.put_pixel(x as u32, y as u32, Rgb(color));
                }
            }
        }
    }

    /// Background, boundary outline, then agents coloured by role.
    pub fn draw_state(&mut self, state: &State, boundary: &Boundary, style: &RenderStyle) {
        self.fill(style.background);
        self.outline(boundary, style.boundary_width, style.boundary_color);
        let roles = Role::standard_layout(state.agent_count());
        for (pos, role) in state.positions().iter().zip(roles) {
            self.fill_circle(*pos, style.agent_radius, style.color_of(role));
        }
    }

    pub fn save_png(&self, path: &Path) -> OutputResult<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

// ── FrameSink ─────────────────────────────────────────────────────────────────

/// Receives display frames in order.
pub trait FrameSink {
    fn draw_frame(&mut self, state: &State) -> OutputResult<()>;

    /// Flush anything buffered.  Idempotent.
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// Collects frames in memory.
impl FrameSink for Vec<State> {
    fn draw_frame(&mut self, state: &State) -> OutputResult<()> {
        self.push(state.clone());
        Ok(())
    }
}

/// Rasterises each frame to `<dir>/<n>.png`, `n` counting from 0.
pub struct PngFrameSink {
    dir:        PathBuf,
    boundary:   Boundary,
    style:      RenderStyle,
    canvas:     Canvas,
    next_index: u64,
}

impl PngFrameSink {
    /// Create the sink, making `dir` if needed.  The canvas covers
    /// `boundary`.
    pub fn new(dir: impl Into<PathBuf>, boundary: Boundary, style: RenderStyle) -> OutputResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let canvas = Canvas::covering(&boundary, style.background)?;
        Ok(Self { dir, boundary, style, canvas, next_index: 0 })
    }

    /// Number of PNG files written so far.
    #[inline]
    pub fn frames_written(&self) -> u64 {
        self.next_index
    }

    /// The canvas as last drawn.
    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

impl FrameSink for PngFrameSink {
    fn draw_frame(&mut self, state: &State) -> OutputResult<()> {
        self.canvas.draw_state(state, &self.boundary, &self.style);
        let path = self.dir.join(format!("{}.png", self.next_index));
        self.canvas.save_png(&path)?;
        self.next_index += 1;
        Ok(())
    }
}

/// Writes every frame's agents as rows of one CSV file.
pub struct CsvFrameSink {
    writer:     Writer<File>,
    trajectory: u32,
    next_frame: u64,
    finished:   bool,
}

impl CsvFrameSink {
    /// Create `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(FRAME_HEADER)?;
        Ok(Self { writer, trajectory: 0, next_frame: 0, finished: false })
    }

    /// Label subsequent frames with `trajectory`, restarting the frame count.
    pub fn begin_trajectory(&mut self, trajectory: u32) {
        self.trajectory = trajectory;
        self.next_frame = 0;
    }
}

impl FrameSink for CsvFrameSink {
    fn draw_frame(&mut self, state: &State) -> OutputResult<()> {
        for row in FrameRow::from_state(self.trajectory, self.next_frame, state) {
            self.writer.write_record(frame_record(&row))?;
        }
        self.next_frame += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

/// Replay `trajectory` into `sink` and return the number of frames drawn.
///
/// Every timestep but the last contributes its interpolated frames (its own
/// state first); the last contributes only its state.  An empty trajectory
/// draws nothing.
pub fn visualize_trajectory<T, S>(
    trajectory:   &Trajectory,
    interpolator: &Interpolator<T>,
    sink:         &mut S,
) -> OutputResult<usize>
where
    T: TerminalCheck,
    S: FrameSink + ?Sized,
{
    let Some((last, rest)) = trajectory.steps().split_last() else {
        return Ok(0);
    };
    let mut drawn = 0;
    for step in rest {
        for frame in interpolator.interpolate_step(step)? {
            sink.draw_frame(&frame)?;
            drawn += 1;
        }
    }
    sink.draw_frame(&last.state)?;
    drawn += 1;

    debug!(trajectory = trajectory.id.0, frames = drawn, "trajectory rendered");
    Ok(drawn)
}
