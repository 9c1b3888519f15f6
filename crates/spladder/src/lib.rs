//! Spladder ladder runner
//!
//! This crate wraps the round logic from `ladder_core` with:
//! - Configuration loaded from a TOML file
//! - A store boundary that commits the whole ladder at once
//! - Text reports for schedules, rankings and results
//!
//! # Usage
//!
//! ```bash
//! spladder register squids alice bob carol dave
//! spladder seed squids octos salmon
//! spladder schedule
//! spladder score 1 4 2
//! spladder publish
//! ```

mod app;
mod config;
mod report;
mod store;

pub use app::*;
pub use config::*;
pub use report::*;
pub use store::*;
