//! Integration tests for chase-output.

use chase_core::{Action, Outcome, State, TimeStep, Trajectory, TrajectoryId, Vec2};
use chase_env::{Boundary, Interpolator, NeverTerminal};
use chase_sim::{ChaseConfig, NoopObserver, ParameterGrid, Scenario, SpeedConfig};
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn screen() -> Boundary {
    Boundary::new((0.0, 640.0), (0.0, 480.0)).unwrap()
}

/// One-second episodes where nobody moves: always 5 steps, never captured.
fn frozen_scenario() -> Scenario {
    let config = ChaseConfig {
        episode_secs: 1,
        sheep_speed: SpeedConfig { min: 0.0, max: 0.0 },
        wolf_speed: SpeedConfig { min: 0.0, max: 0.0 },
        ..ChaseConfig::default()
    };
    Scenario::from_config(&config).unwrap()
}

fn moving(x: f64, vx: f64) -> State {
    State::new(
        vec![Vec2::new(x, 100.0), Vec2::new(x, 300.0)],
        vec![Vec2::new(vx, 0.0), Vec2::new(vx, 0.0)],
    )
    .unwrap()
}

/// Two hand-built steps: x = 100 → 160 → 220 at 10 px per frame.
fn two_step_trajectory() -> Trajectory {
    let a = State::at_rest(vec![Vec2::new(100.0, 100.0), Vec2::new(100.0, 300.0)]);
    let b = moving(160.0, 10.0);
    let c = moving(220.0, 10.0);
    let step = |s: &State, n: &State| TimeStep {
        state:      s.clone(),
        action:     Action(Vec2::new(1.0, 0.0)),
        next_state: n.clone(),
        reward:     Some(0.01),
    };
    Trajectory::new(TrajectoryId(0), 1, 0.0, Outcome::Truncated, vec![step(&a, &b), step(&b, &c)])
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::{CsvWriter, OutputWriter, RolloutOutputObserver};

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(
            headers(&dir.path().join("frames.csv")),
            ["trajectory", "frame", "agent", "role", "x", "y", "vx", "vy"]
        );
        assert_eq!(
            headers(&dir.path().join("trajectories.csv")),
            ["trajectory", "seed", "wolf_subtlety", "captured", "steps", "total_reward"]
        );
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn observer_writes_every_state_and_summary() {
        let dir = tmp();
        let scenario = frozen_scenario();
        let mut obs = RolloutOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let policy = scenario.random_policy();
        let t = scenario.sample(TrajectoryId(3), &policy, &mut obs).unwrap();
        obs.finish().unwrap();
        assert!(obs.take_error().is_none());

        let mut frames = csv::Reader::from_path(dir.path().join("frames.csv")).unwrap();
        let rows: Vec<_> = frames.records().map(|r| r.unwrap()).collect();
        // Initial state plus one state per step, two agents each.
        assert_eq!(rows.len(), (t.len() + 1) * 2);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "0");
        assert_eq!(&rows[0][3], "sheep");
        assert_eq!(&rows[1][3], "wolf");
        assert_eq!(&rows[rows.len() - 1][1], t.len().to_string().as_str());

        let mut summaries = csv::Reader::from_path(dir.path().join("trajectories.csv")).unwrap();
        let rows: Vec<_> = summaries.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][3], "0"); // not captured
        assert_eq!(&rows[0][4], "5"); // steps
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::{TrajectoryStore, save_path};

    #[test]
    fn save_path_sorts_keys() {
        let dir = std::path::Path::new("out");
        let p = save_path(dir, "traj", [("seed", 3.0), ("num_agents", 2.0)]);
        assert_eq!(p, dir.join("traj_num_agents=2_seed=3.json"));
    }

    #[test]
    fn save_path_without_params() {
        let dir = std::path::Path::new("out");
        let p = save_path(dir, "traj", Vec::<(&str, f64)>::new());
        assert_eq!(p, dir.join("traj.json"));
    }

    #[test]
    fn store_creates_directory() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let store = TrajectoryStore::new(&nested, "traj").unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn save_then_load() {
        let dir = tmp();
        let store = TrajectoryStore::new(dir.path(), "traj").unwrap();
        let scenario = frozen_scenario();
        let batch = scenario.sample_batch(2, &scenario.random_policy()).unwrap();
        let conditions = ParameterGrid::new().level("num_agents", [2.0]).conditions().remove(0);

        let path = store.save(&conditions, &batch).unwrap();
        assert_eq!(path, dir.path().join("traj_num_agents=2.json"));

        let loaded = TrajectoryStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        for (a, b) in loaded.iter().zip(&batch) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.seed, b.seed);
            assert_eq!(a.outcome, b.outcome);
            assert_eq!(a.len(), b.len());
            let (pa, pb) = (a.steps()[0].state.positions(), b.steps()[0].state.positions());
            assert!(pa.iter().zip(pb).all(|(x, y)| x.distance(*y) < 1e-9));
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tmp();
        let err = TrajectoryStore::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, crate::OutputError::Io(_)));
    }

    #[test]
    fn mismatched_state_lengths_fail_to_load() {
        let dir = tmp();
        let scenario = frozen_scenario();
        let batch = scenario.sample_batch(1, &scenario.random_policy()).unwrap();
        let mut json = serde_json::to_value(&batch).unwrap();
        json[0]["steps"][0]["state"]["velocities"].as_array_mut().unwrap().pop();

        let path = dir.path().join("broken.json");
        std::fs::write(&path, serde_json::to_vec(&json).unwrap()).unwrap();
        let err = TrajectoryStore::load(&path).unwrap_err();
        assert!(matches!(err, crate::OutputError::Json(_)));
    }

    #[test]
    fn state_deserializes_through_shape_check() {
        let ok: State = serde_json::from_str(
            r#"{ "positions": [{ "x": 1.0, "y": 2.0 }], "velocities": [{ "x": 0.0, "y": 0.0 }] }"#,
        )
        .unwrap();
        assert_eq!(ok.agent_count(), 1);

        let bad = serde_json::from_str::<State>(r#"{ "positions": [{ "x": 1.0, "y": 2.0 }], "velocities": [] }"#);
        assert!(bad.is_err());
    }
}

// ── Render ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod render_tests {
    use super::*;
    use crate::{Canvas, CsvFrameSink, FrameSink, OutputError, PngFrameSink, RenderStyle};

    const BLACK: [u8; 3] = [0, 0, 0];
    const WHITE: [u8; 3] = [255, 255, 255];
    const GREEN: [u8; 3] = [0, 255, 0];
    const RED: [u8; 3] = [255, 0, 0];

    #[test]
    fn empty_canvas_is_rejected() {
        assert!(matches!(Canvas::new(0, 10, BLACK), Err(OutputError::Render(_))));
    }

    #[test]
    fn frame_layers_background_outline_agents() {
        let mut canvas = Canvas::covering(&screen(), BLACK).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (640, 480));

        let state = State::at_rest(vec![Vec2::new(100.0, 100.0), Vec2::new(300.0, 200.0)]);
        canvas.draw_state(&state, &screen(), &RenderStyle::default());

        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(3, 240), Some(WHITE));
        assert_eq!(canvas.pixel(639, 479), Some(WHITE));
        assert_eq!(canvas.pixel(5, 240), Some(BLACK));
        assert_eq!(canvas.pixel(100, 100), Some(GREEN));
        assert_eq!(canvas.pixel(110, 100), Some(GREEN));
        assert_eq!(canvas.pixel(111, 100), Some(BLACK));
        assert_eq!(canvas.pixel(300, 200), Some(RED));
        assert_eq!(canvas.pixel(640, 0), None);
    }

    #[test]
    fn circles_clip_at_edges() {
        let mut canvas = Canvas::new(20, 20, BLACK).unwrap();
        canvas.fill_circle(Vec2::new(0.0, 0.0), 5, GREEN);
        assert_eq!(canvas.pixel(0, 0), Some(GREEN));
        assert_eq!(canvas.pixel(10, 10), Some(BLACK));
    }

    #[test]
    fn png_sink_numbers_frames() {
        let dir = tmp();
        let mut sink = PngFrameSink::new(dir.path(), screen(), RenderStyle::default()).unwrap();
        let state = State::at_rest(vec![Vec2::new(50.0, 50.0), Vec2::new(500.0, 400.0)]);
        sink.draw_frame(&state).unwrap();
        sink.draw_frame(&state).unwrap();
        sink.finish().unwrap();

        assert_eq!(sink.frames_written(), 2);
        assert!(dir.path().join("0.png").exists());
        assert!(dir.path().join("1.png").exists());
        let img = image::open(dir.path().join("1.png")).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (640, 480));
        assert_eq!(img.get_pixel(50, 50).0, GREEN);
    }

    #[test]
    fn csv_sink_labels_frames() {
        let dir = tmp();
        let path = dir.path().join("render.csv");
        let mut sink = CsvFrameSink::new(&path).unwrap();
        sink.begin_trajectory(7);
        visualize_trajectory_into(&mut sink);
        sink.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 7 * 2);
        assert_eq!(&rows[0][0], "7");
        assert_eq!(&rows[13][1], "6");
    }

    fn visualize_trajectory_into(sink: &mut dyn FrameSink) {
        let interp = Interpolator::new(5, screen(), NeverTerminal);
        crate::visualize_trajectory(&two_step_trajectory(), &interp, sink).unwrap();
    }
}

// ── Visualize ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod visualize_tests {
    use super::*;
    use chase_core::AgentId;
    use chase_env::CaptureCheck;

    use crate::visualize_trajectory;

    #[test]
    fn all_but_last_step_are_interpolated() {
        let t = two_step_trajectory();
        let interp = Interpolator::new(5, screen(), NeverTerminal);
        let mut frames: Vec<State> = Vec::new();
        let n = visualize_trajectory(&t, &interp, &mut frames).unwrap();

        // 1 + 5 frames for the first step, then the last step's state alone.
        assert_eq!(n, 7);
        assert_eq!(frames.len(), 7);
        assert_eq!(frames[0], t.steps()[0].state);
        assert!((frames[5].positions()[0].x - 150.0).abs() < 1e-9);
        assert_eq!(frames[6], t.steps()[1].state);
    }

    #[test]
    fn empty_trajectory_draws_nothing() {
        let t = Trajectory::new(TrajectoryId(0), 0, 0.0, Outcome::Captured, Vec::new());
        let interp = Interpolator::new(5, screen(), NeverTerminal);
        let mut frames: Vec<State> = Vec::new();
        assert_eq!(visualize_trajectory(&t, &interp, &mut frames).unwrap(), 0);
        assert!(frames.is_empty());
    }

    #[test]
    fn interpolation_stops_at_capture() {
        // Wolf 25 px right of the sheep closing at 10 px per frame: inside
        // the 10 px killzone after the second sub-frame.
        let start = State::at_rest(vec![Vec2::new(100.0, 100.0), Vec2::new(125.0, 100.0)]);
        let next = State::new(
            vec![Vec2::new(100.0, 100.0), Vec2::new(65.0, 100.0)],
            vec![Vec2::ZERO, Vec2::new(-10.0, 0.0)],
        )
        .unwrap();
        let step = TimeStep {
            state:      start,
            action:     Action(Vec2::new(1.0, 0.0)),
            next_state: next.clone(),
            reward:     Some(-1.0),
        };
        let last = TimeStep { state: next.clone(), action: step.action, next_state: next, reward: None };
        let t = Trajectory::new(TrajectoryId(0), 0, 0.0, Outcome::Captured, vec![step, last]);

        let capture = CaptureCheck::new(AgentId(1), AgentId(0), 10.0).unwrap();
        let interp = Interpolator::new(5, screen(), capture);
        let mut frames: Vec<State> = Vec::new();
        assert_eq!(visualize_trajectory(&t, &interp, &mut frames).unwrap(), 1 + 2 + 1);
    }

    #[test]
    fn sampled_trajectory_renders() {
        let scenario = frozen_scenario();
        let t = scenario
            .sample(TrajectoryId(0), &scenario.random_policy(), &mut NoopObserver)
            .unwrap();
        let mut frames: Vec<State> = Vec::new();
        let n = visualize_trajectory(&t, &scenario.interpolator(), &mut frames).unwrap();
        assert_eq!(n, (t.len() - 1) * 6 + 1);
    }
}
