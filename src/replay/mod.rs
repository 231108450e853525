//! Replay module
//!
//! Ranks the symbol universe by overnight gap and replays each retained
//! symbol's intraday session through the signal detector.

mod driver;
mod gap;

pub use driver::{ReplayConfig, ReplayDriver, ReplaySummary, SymbolEvent};
pub use gap::{gap_candidate, rank_candidates, GapCandidate};
