//! Eden Creator Storage Layer - File-Based Snapshots
//!
//! The contract keeps its tables in memory and persists them as snapshots:
//! - `<name>.bin` (bincode) for fast loading
//! - `<name>.json` as a human-readable copy
//!
//! Files are written to a temporary path first and renamed into place, so a
//! crash mid-write never leaves a truncated snapshot behind.

use eden_contract::ContractState;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Snapshot holding the live contract tables
pub const STATE_SNAPSHOT: &str = "contract_state";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Bincode error: {0}")]
    BincodeError(#[from] bincode::Error),

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error("Invalid snapshot name: {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Directory of named snapshots
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    /// Open (and create if needed) the storage directory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data_dir = path.as_ref().to_path_buf();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
        }
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Save both encodings of `data`
    pub fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let (bin_path, json_path) = self.paths(name)?;

        write_atomic(&bin_path, &bincode::serialize(data)?)?;
        write_atomic(&json_path, serde_json::to_string_pretty(data)?.as_bytes())?;

        debug!(snapshot = name, dir = %self.data_dir.display(), "snapshot saved");
        Ok(())
    }

    /// Load a snapshot, preferring bincode and falling back to JSON
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let (bin_path, json_path) = self.paths(name)?;

        if bin_path.exists() {
            let data = fs::read(&bin_path)?;
            return Ok(bincode::deserialize(&data)?);
        }
        if json_path.exists() {
            let data = fs::read_to_string(&json_path)?;
            return Ok(serde_json::from_str(&data)?);
        }

        Err(StorageError::SnapshotNotFound(name.to_string()))
    }

    pub fn exists(&self, name: &str) -> bool {
        match self.paths(name) {
            Ok((bin_path, json_path)) => bin_path.exists() || json_path.exists(),
            Err(_) => false,
        }
    }

    /// Snapshot names in this directory, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            let is_snapshot = matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("bin") | Some("json")
            );
            if !is_snapshot {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.insert(stem.to_string());
            }
        }
        Ok(names.into_iter().collect())
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let (bin_path, json_path) = self.paths(name)?;
        for path in [bin_path, json_path] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    // ---- contract tables ----

    pub fn save_state(&self, state: &ContractState) -> Result<()> {
        self.save(STATE_SNAPSHOT, state)?;
        info!(election_nr = state.election_nr(), "contract state persisted");
        Ok(())
    }

    /// `None` when nothing has been persisted yet
    pub fn load_state(&self) -> Result<Option<ContractState>> {
        if !self.exists(STATE_SNAPSHOT) {
            return Ok(None);
        }
        self.load(STATE_SNAPSHOT).map(Some)
    }

    /// Keep a copy of the tables as they stood during `election_nr`
    pub fn archive_round(&self, state: &ContractState) -> Result<String> {
        let name = format!("round-{}", state.election_nr());
        self.save(&name, state)?;
        info!(snapshot = %name, "round archived");
        Ok(name)
    }

    fn paths(&self, name: &str) -> Result<(PathBuf, PathBuf)> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok((
            self.data_dir.join(format!("{}.bin", name)),
            self.data_dir.join(format!("{}.json", name)),
        ))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
