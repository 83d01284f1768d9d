//! Catalog snapshots on disk
//!
//! The full catalog is written as one JSON document. Writes go through a
//! temporary file and an atomic rename so a crash never leaves a torn file.

use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shoprank_core::{Error, Product, Result};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILENAME: &str = "catalog.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub saved_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

pub struct SnapshotManager {
    path: PathBuf,
}

impl SnapshotManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(SNAPSHOT_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot, or `None` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<CatalogSnapshot>> {
        if !self.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let snapshot = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(snapshot))
    }

    pub fn save(&self, products: &[Product]) -> Result<CatalogSnapshot> {
        let snapshot = CatalogSnapshot {
            saved_at: Utc::now(),
            products: products.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&bytes))
            .map_err(|e| Error::Storage(format!("failed to write {}: {}", self.path.display(), e)))?;

        Ok(snapshot)
    }
}
