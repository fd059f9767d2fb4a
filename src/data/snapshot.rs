//! Snapshot persistence for the series store.
//!
//! A snapshot is a named-array JSON container holding the seven series under
//! their literal names. `Snapshot::read(Snapshot::write(..))` is lossless,
//! which is what allows a previous run to be preloaded with `--file` and
//! extended live.

use crate::data::series::SeriesStore;
use crate::error::AppResult;
use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// The persisted container: seven flat numeric arrays keyed by series name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
    pub power: Vec<f64>,
    pub capacity: Vec<f64>,
    pub energy: Vec<f64>,
    pub temperature: Vec<f64>,
}

impl Snapshot {
    /// Capture the store's current contents.
    pub fn from_store(store: &SeriesStore) -> Self {
        Self {
            time: store.time().to_vec(),
            voltage: store.voltage().to_vec(),
            current: store.current().to_vec(),
            power: store.power().to_vec(),
            capacity: store.capacity().to_vec(),
            energy: store.energy().to_vec(),
            temperature: store.temperature().to_vec(),
        }
    }

    /// Rebuild a store, validating the seven-way length invariant.
    pub fn into_store(self) -> AppResult<SeriesStore> {
        SeriesStore::from_series(
            self.time,
            self.voltage,
            self.current,
            self.power,
            self.capacity,
            self.energy,
            self.temperature,
        )
    }

    pub fn read(path: &Path) -> AppResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn write(&self, path: &Path) -> AppResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// Writes periodic and shutdown snapshots of the store to a single file
/// chosen once at startup.
pub struct Snapshotter {
    path: PathBuf,
}

impl Snapshotter {
    /// Picks a fresh `out_<timestamp>_<i>.json` inside `output_dir`,
    /// creating the directory if missing. The index is bumped until the
    /// name does not collide with files from earlier runs.
    pub fn new(output_dir: &Path) -> AppResult<Self> {
        std::fs::create_dir_all(output_dir)?;

        let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let mut index = 0u32;
        let path = loop {
            let candidate = output_dir.join(format!("out_{stamp}_{index}.json"));
            if !candidate.exists() {
                break candidate;
            }
            index += 1;
        };

        info!("Snapshots will be written to '{}'", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the store to the snapshot file, overwriting the previous
    /// snapshot of this run. Callers treat failure as non-fatal.
    pub fn snapshot(&self, store: &SeriesStore) -> AppResult<()> {
        Snapshot::from_store(store).write(&self.path)
    }
}
