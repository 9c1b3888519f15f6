//! Ladder persistence
//!
//! The whole ladder is stored as one snapshot. Committing replaces the
//! snapshot in a single step, so a published round's metrics and the next
//! round's rank list become visible together or not at all.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ladder_core::Ladder;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Snapshot as written to storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLadder {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub ladder: Ladder,
}

/// Storage the runner reads the ladder from and commits it to.
pub trait LadderStore {
    /// Load the last committed snapshot, if any
    fn load(&self) -> Result<Option<StoredLadder>>;

    /// Replace the stored snapshot
    fn commit(&mut self, name: &str, ladder: &Ladder) -> Result<()>;
}

fn snapshot(name: &str, ladder: &Ladder) -> StoredLadder {
    StoredLadder {
        name: name.to_string(),
        saved_at: Utc::now(),
        ladder: ladder.clone(),
    }
}

/// JSON file on disk, replaced through a temporary file and a rename
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LadderStore for JsonFileStore {
    fn load(&self) -> Result<Option<StoredLadder>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let stored = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(stored))
    }

    fn commit(&mut self, name: &str, ladder: &Ladder) -> Result<()> {
        let json = serde_json::to_string_pretty(&snapshot(name, ladder))
            .context("Failed to serialize ladder")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let temp = self.temp_path();
        {
            let mut file = File::create(&temp)
                .with_context(|| format!("Failed to create {}", temp.display()))?;
            file.write_all(json.as_bytes())
                .and_then(|_| file.sync_all())
                .with_context(|| format!("Failed to write {}", temp.display()))?;
        }
        fs::rename(&temp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), "committed ladder");
        Ok(())
    }
}

/// Keeps the serialized snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<String>,
    commits: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful commits
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl LadderStore for MemoryStore {
    fn load(&self) -> Result<Option<StoredLadder>> {
        self.snapshot
            .as_deref()
            .map(|json| serde_json::from_str(json).context("Failed to parse snapshot"))
            .transpose()
    }

    fn commit(&mut self, name: &str, ladder: &Ladder) -> Result<()> {
        let json = serde_json::to_string(&snapshot(name, ladder))
            .context("Failed to serialize ladder")?;
        self.snapshot = Some(json);
        self.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
