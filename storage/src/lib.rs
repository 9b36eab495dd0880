//! Tulip Market storage layer - file-based snapshots
//!
//! One snapshot directory per deployment. Market and asset-ledger state
//! stay in memory while a process runs; snapshots are written after each
//! mutation and loaded on startup:
//! - JSON for a human-readable backup
//! - Bincode for fast loading
//!
//! A fresh deployment has no snapshots; the typed loaders start it empty.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tulip_engine::{Market, MemoryOracle};

/// Snapshot name for the auction market (ledger + event log).
pub const MARKET_SNAPSHOT: &str = "market";

/// Snapshot name for the in-process asset ledger.
pub const ASSETS_SNAPSHOT: &str = "assets";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("snapshot not found: {0}")]
    SnapshotNotFound(String),
}

/// File-based snapshot store.
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Open a snapshot directory, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let data_dir = path.as_ref().to_path_buf();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
        }

        Ok(Self { data_dir })
    }

    /// Save a snapshot under `name` in both formats.
    pub fn save_snapshot<T: Serialize>(&self, name: &str, data: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(self.json_path(name), json)?;

        let bin = bincode::serialize(data)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(self.bin_path(name), bin)?;

        Ok(())
    }

    /// Load a snapshot, preferring bincode and falling back to JSON.
    pub fn load_snapshot<T: for<'de> Deserialize<'de>>(
        &self,
        name: &str,
    ) -> Result<T, StorageError> {
        let bin_path = self.bin_path(name);
        if bin_path.exists() {
            let data = fs::read(&bin_path)?;
            return bincode::deserialize(&data)
                .map_err(|e| StorageError::Serialization(e.to_string()));
        }

        let json_path = self.json_path(name);
        if json_path.exists() {
            let data = fs::read_to_string(&json_path)?;
            return serde_json::from_str(&data)
                .map_err(|e| StorageError::Serialization(e.to_string()));
        }

        Err(StorageError::SnapshotNotFound(name.to_string()))
    }

    pub fn has_snapshot(&self, name: &str) -> bool {
        self.bin_path(name).exists() || self.json_path(name).exists()
    }

    pub fn delete_snapshot(&self, name: &str) -> Result<(), StorageError> {
        let bin_path = self.bin_path(name);
        let json_path = self.json_path(name);

        if bin_path.exists() {
            fs::remove_file(bin_path)?;
        }
        if json_path.exists() {
            fs::remove_file(json_path)?;
        }

        Ok(())
    }

    /// Load the market state, or an empty market on a fresh deployment.
    pub fn load_market(&self) -> Result<Market, StorageError> {
        if self.has_snapshot(MARKET_SNAPSHOT) {
            self.load_snapshot(MARKET_SNAPSHOT)
        } else {
            Ok(Market::new())
        }
    }

    pub fn save_market(&self, market: &Market) -> Result<(), StorageError> {
        self.save_snapshot(MARKET_SNAPSHOT, market)
    }

    /// Load the asset ledger, or an empty one on a fresh deployment.
    pub fn load_assets(&self) -> Result<MemoryOracle, StorageError> {
        if self.has_snapshot(ASSETS_SNAPSHOT) {
            self.load_snapshot(ASSETS_SNAPSHOT)
        } else {
            Ok(MemoryOracle::new())
        }
    }

    pub fn save_assets(&self, oracle: &MemoryOracle) -> Result<(), StorageError> {
        self.save_snapshot(ASSETS_SNAPSHOT, oracle)
    }

    fn json_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    fn bin_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.bin", name))
    }
}
