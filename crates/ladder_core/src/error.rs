//! Error types for ladder operations.

use thiserror::Error;

use crate::round::RoundPhase;
use crate::types::Round;

/// Result type for ladder operations.
pub type Result<T> = std::result::Result<T, LadderError>;

/// Errors that can occur while bracketing, scheduling or re-ranking a round.
///
/// Every error aborts the whole round-level operation; nothing is partially
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LadderError {
    /// Score pair fails the first-to-N legality check.
    #[error("invalid score {challenger}-{defender}: exactly one side must reach {sets_to_win}")]
    InvalidScore {
        challenger: u8,
        defender: u8,
        sets_to_win: u8,
    },

    /// A challenge has no score when a ranking update is requested.
    #[error("round {round} is incomplete: challenge {round}-{code} has no score")]
    IncompleteRound { round: Round, code: u32 },

    /// Gaps, duplicates or too few teams in a rank list.
    #[error("malformed rank list: {0}")]
    MalformedRankList(String),

    /// A division's outcome cannot be determined.
    #[error("division {division} cannot be resolved: {reason}")]
    UnresolvedDivision { division: String, reason: String },

    /// A challenge does not agree with the rank list it is checked against.
    #[error("challenge {round}-{code} does not match the rank list: {reason}")]
    ChallengeMismatch {
        round: Round,
        code: u32,
        reason: String,
    },

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("team name must not be blank")]
    BlankTeamName,

    #[error("team {0} is already registered")]
    DuplicateTeam(String),

    #[error("team {team} has {players} players, a roster needs {min} to {max}")]
    InvalidRoster {
        team: String,
        players: usize,
        min: usize,
        max: usize,
    },

    #[error("unknown challenge {round}-{code}")]
    UnknownChallenge { round: Round, code: u32 },

    #[error("challenge {round}-{code} already has a score")]
    ScoreAlreadyRecorded { round: Round, code: u32 },

    /// The round is not in a phase that allows the requested operation.
    #[error("round {round} cannot move from {from} to {to}")]
    InvalidTransition {
        round: Round,
        from: RoundPhase,
        to: RoundPhase,
    },

    #[error("no rank list for round {0}")]
    MissingRankList(Round),

    #[error("round {0} has not been scheduled")]
    NotScheduled(Round),

    #[error("ladder is already seeded from round {0}")]
    AlreadySeeded(Round),

    /// The rank list of a scheduled round can no longer change.
    #[error("round {round} is {phase}, its rank list is locked")]
    RoundLocked { round: Round, phase: RoundPhase },

    #[error("invalid position {position} for a ranking of {len} teams")]
    InvalidPosition { position: u32, len: usize },
}
