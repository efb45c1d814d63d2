//! chase-demo — sample, save, and render a small pursuit-evasion sweep.
//!
//! Usage: `chase-demo [config.json]`.  The optional JSON file overrides any
//! subset of `ChaseConfig`'s fields.  Set `RUST_LOG=debug` (or `trace`) for
//! per-trajectory (or per-step) logging.
//!
//! Output under `output/chase-demo/`:
//! - `trajectories/chase_num_agents=<n>.json` per condition
//! - `frames.csv`, `trajectories.csv` for the first condition
//! - `frames/<k>.png` and `render.csv` for its first trajectory

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use chase_core::{Outcome, TrajectoryId};
use chase_output::{
    CsvFrameSink, CsvWriter, FrameSink, PngFrameSink, RenderStyle, RolloutOutputObserver,
    TrajectoryStore, visualize_trajectory,
};
use chase_sim::{ChaseConfig, ConditionBatch, ParameterGrid, Scenario, SweepRunner};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:                 &str     = "output/chase-demo";
const TRAJECTORIES_PER_CONDITION: usize    = 3;
const AGENT_COUNTS:               [f64; 2] = [2.0, 4.0];

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let config = load_config()?;

    println!("=== chase-demo — sheep / wolf / distractors ===");
    println!(
        "Seed: {}  |  Conditions: num_agents = {:?}  |  {} trajectories each",
        config.seed, AGENT_COUNTS, TRAJECTORIES_PER_CONDITION
    );
    println!();

    // 1. Sample every condition.
    let grid = ParameterGrid::new().level("num_agents", AGENT_COUNTS);
    let t0 = Instant::now();
    let batches = SweepRunner::new(config.clone(), TRAJECTORIES_PER_CONDITION)
        .run(&grid, |scenario| scenario.random_policy())?;
    println!("Sampling complete in {:.3} s", t0.elapsed().as_secs_f64());

    // 2. Save each batch.
    let out = Path::new(OUTPUT_DIR);
    let store = TrajectoryStore::new(out.join("trajectories"), "chase")?;
    for batch in &batches {
        let path = store.save(&batch.conditions, &batch.trajectories)?;
        println!("  {}", path.display());
    }
    println!();

    // 3. Tables and frames for the first condition.
    let Some(first) = batches.first() else {
        warn!("sweep produced no conditions");
        return Ok(());
    };
    let scenario = Scenario::from_config(&first.conditions.apply_to(&config)?)?;
    write_tables(&scenario, out)?;
    render_first(&scenario, first, out)?;

    // 4. Summary.
    println!("{:<18} {:<10} {:<10} {:<10}", "Condition", "Captured", "Mean steps", "Reward");
    println!("{}", "-".repeat(50));
    for batch in &batches {
        let n = batch.trajectories.len().max(1) as f64;
        let captured = batch
            .trajectories
            .iter()
            .filter(|t| t.outcome == Outcome::Captured)
            .count();
        let mean_steps = batch.trajectories.iter().map(|t| t.len() as f64).sum::<f64>() / n;
        let mean_reward = batch.trajectories.iter().map(|t| t.total_reward()).sum::<f64>() / n;
        println!(
            "{:<18} {:<10} {:<10.1} {:<10.3}",
            batch.conditions.to_string(),
            format!("{captured}/{}", batch.trajectories.len()),
            mean_steps,
            mean_reward,
        );
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config() -> Result<ChaseConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(ChaseConfig::default());
    };
    let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
    let config: ChaseConfig =
        serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {path}"))?;
    info!(%path, "config loaded");
    Ok(config)
}

/// Re-sample the condition through the CSV observer.  Trajectory seeds depend
/// only on `(seed, id)`, so these match the saved batch.
fn write_tables(scenario: &Scenario, out: &Path) -> Result<()> {
    let policy = scenario.random_policy();
    let mut obs = RolloutOutputObserver::new(CsvWriter::new(out)?);
    for i in 0..TRAJECTORIES_PER_CONDITION {
        scenario.sample(TrajectoryId(i as u32), &policy, &mut obs)?;
    }
    obs.finish()?;
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    Ok(())
}

fn render_first(scenario: &Scenario, batch: &ConditionBatch, out: &Path) -> Result<()> {
    let Some(trajectory) = batch.trajectories.first() else {
        return Ok(());
    };
    let interpolator = scenario.interpolator();

    let mut png = PngFrameSink::new(out.join("frames"), *scenario.arena(), RenderStyle::default())?;
    let frames = visualize_trajectory(trajectory, &interpolator, &mut png)?;
    png.finish()?;

    let mut csv = CsvFrameSink::new(&out.join("render.csv"))?;
    csv.begin_trajectory(trajectory.id.0);
    visualize_trajectory(trajectory, &interpolator, &mut csv)?;
    csv.finish()?;

    println!(
        "Rendered trajectory {} ({:?}, {} steps) to {} frames",
        trajectory.id.0,
        trajectory.outcome,
        trajectory.len(),
        frames
    );
    println!();
    Ok(())
}
