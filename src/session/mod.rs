// src/session/mod.rs

//! Session mode: run once, then fetch the latest raw results, statistics or
//! individual rounds. State lives in an explicitly owned [`LatestResults`]
//! slot rather than anywhere global.

mod runner;
mod store;

pub use runner::{Bb84Session, RoundView, SessionOutcome, SessionRequest, SessionRun, SessionStats};
pub use store::LatestResults;
