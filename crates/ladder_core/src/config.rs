//! Ladder rules shared by scheduling and ranking.

use serde::{Deserialize, Serialize};

use crate::division::RemainderPolicy;
use crate::score::ScoreRules;

/// Rules a ladder runs under. Scheduling and ranking of the same round must
/// use the same config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderConfig {
    pub score: ScoreRules,
    pub remainder: RemainderPolicy,
}
