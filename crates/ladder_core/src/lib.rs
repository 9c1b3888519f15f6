//! Core of the Spladder team ladder
//!
//! This crate provides the round logic of the ladder:
//! - Splitting a rank list into divisions of 2 or 3 teams
//! - Generating each division's challenges (matches)
//! - Turning a completed round into the next round's rank list
//!
//! Everything here is a pure function of in-memory data. Storage, prompting
//! and notifications belong to the caller.
//!
//! # Usage
//!
//! ```
//! use ladder_core::{assign_divisions, generate_challenges, update_ranking, LadderConfig, RankList, Round, Score};
//!
//! let config = LadderConfig::default();
//! let list = RankList::new(Round(1), vec!["A".into(), "B".into(), "C".into()]).unwrap();
//! let divisions = assign_divisions(&list, config.remainder).unwrap();
//! let mut challenges = generate_challenges(Round(1), &divisions);
//! for challenge in &mut challenges {
//!     challenge.score = Some(Score::new(2, 4));
//! }
//! let result = update_ranking(&list, &challenges, &config).unwrap();
//! assert_eq!(result.next.teams(), &["A", "B", "C"]);
//! ```

mod challenge;
mod config;
mod division;
mod entry;
mod error;
mod ladder;
mod rank_list;
mod ranking;
mod registry;
mod round;
mod score;
mod types;

pub use challenge::*;
pub use config::*;
pub use division::*;
pub use entry::*;
pub use error::*;
pub use ladder::*;
pub use rank_list::*;
pub use ranking::*;
pub use registry::*;
pub use round::*;
pub use score::*;
pub use types::*;
