//! Runner configuration, read from a TOML file

use anyhow::{Context, Result};
use ladder_core::{LadderConfig, Round};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the config file
pub const DEFAULT_CONFIG_PATH: &str = "spladder.toml";

/// Tournament configuration
///
/// ```toml
/// name = "spladder8"
/// state_file = "spladder8.json"
/// first_round = 1
/// remainder = "shrink_top"
///
/// [score]
/// sets_to_win = 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpladderConfig {
    /// Name of the tournament, shown in reports
    pub name: String,
    /// Where the ladder snapshot is kept
    pub state_file: PathBuf,
    /// Round number the ladder is seeded at
    pub first_round: u32,
    #[serde(flatten)]
    pub ladder: LadderConfig,
}

impl Default for SpladderConfig {
    fn default() -> Self {
        Self {
            name: "spladder".to_string(),
            state_file: PathBuf::from("spladder.json"),
            first_round: 1,
            ladder: LadderConfig::default(),
        }
    }
}

impl SpladderConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config")
    }

    /// Load config from a TOML file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn first_round(&self) -> Round {
        Round(self.first_round)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
