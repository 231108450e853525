//! Signal detection module
//!
//! Turns one session of intraday bars plus its indicator series into an
//! ordered stream of entry/exit events.

mod detector;
mod premarket;
mod types;

pub use detector::{DetectorConfig, SignalDetector};
pub use premarket::{default_cutoff, premarket_high};
pub use types::{Event, EventKind, EventReason, PositionState, SignalError};
