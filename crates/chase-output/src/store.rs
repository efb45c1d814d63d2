//! JSON persistence of sampled trajectory batches.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chase_core::Trajectory;
use chase_sim::Conditions;
use tracing::{debug, info};

use crate::OutputResult;

/// Build `dir/prefix_key1=value1_key2=value2.json` with keys in sorted order.
///
/// An empty parameter set gives `dir/prefix.json`.
pub fn save_path<K, V, I>(dir: &Path, prefix: &str, params: I) -> PathBuf
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Display,
{
    let sorted: BTreeMap<String, String> = params
        .into_iter()
        .map(|(k, v)| (k.into(), v.to_string()))
        .collect();
    let mut name = prefix.to_owned();
    for (k, v) in &sorted {
        name.push('_');
        name.push_str(k);
        name.push('=');
        name.push_str(v);
    }
    name.push_str(".json");
    dir.join(name)
}

/// Saves and loads trajectory batches as JSON files in one directory.
#[derive(Clone, Debug)]
pub struct TrajectoryStore {
    dir:    PathBuf,
    prefix: String,
}

impl TrajectoryStore {
    /// Create the store, making `dir` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> OutputResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, prefix: prefix.into() })
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a batch sampled under `conditions` is saved to.
    pub fn path_for(&self, conditions: &Conditions) -> PathBuf {
        save_path(&self.dir, &self.prefix, conditions.iter())
    }

    /// Write `trajectories` to [`path_for(conditions)`][Self::path_for],
    /// replacing any previous file.
    pub fn save(&self, conditions: &Conditions, trajectories: &[Trajectory]) -> OutputResult<PathBuf> {
        let path = self.path_for(conditions);
        let mut out = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut out, trajectories)?;
        out.flush()?;
        info!(path = %path.display(), trajectories = trajectories.len(), "trajectories saved");
        Ok(path)
    }

    /// Read a batch previously written by [`save`][Self::save].
    pub fn load(path: &Path) -> OutputResult<Vec<Trajectory>> {
        let trajectories: Vec<Trajectory> = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        debug!(path = %path.display(), trajectories = trajectories.len(), "trajectories loaded");
        Ok(trajectories)
    }
}
