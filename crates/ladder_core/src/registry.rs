//! Team registry: names and rosters of the teams taking part.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{LadderError, Result};

/// Smallest roster a team may register with
pub const MIN_PLAYERS: usize = 2;

/// Largest roster a team may register with
pub const MAX_PLAYERS: usize = 5;

/// A registered team. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTeam")]
pub struct Team {
    pub name: String,
    pub players: Vec<String>,
}

#[derive(Deserialize)]
struct RawTeam {
    name: String,
    players: Vec<String>,
}

impl TryFrom<RawTeam> for Team {
    type Error = LadderError;

    fn try_from(raw: RawTeam) -> Result<Self> {
        Team::new(raw.name, raw.players)
    }
}

impl Team {
    /// Build a team, checking the name and the roster size.
    pub fn new(name: impl Into<String>, players: Vec<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LadderError::BlankTeamName);
        }
        let players: Vec<String> = players
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(LadderError::InvalidRoster {
                team: name,
                players: players.len(),
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }

        Ok(Self { name, players })
    }
}

/// All registered teams, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRegistry {
    teams: BTreeMap<String, Team>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team. Names must be unique.
    pub fn register(&mut self, team: Team) -> Result<()> {
        if self.teams.contains_key(&team.name) {
            return Err(LadderError::DuplicateTeam(team.name));
        }
        debug!(team = %team.name, players = team.players.len(), "registered team");
        self.teams.insert(team.name.clone(), team);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.teams.get(name)
    }

    /// Fail with `UnknownTeam` unless `name` is registered
    pub fn require(&self, name: &str) -> Result<&Team> {
        self.get(name)
            .ok_or_else(|| LadderError::UnknownTeam(name.to_string()))
    }

    /// Teams in name order
    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
