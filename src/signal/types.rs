//! Signal event types

use crate::bars::BarError;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Detection errors
#[derive(Debug, Error)]
pub enum SignalError {
    /// Input bars violate the series invariants
    #[error(transparent)]
    MalformedBar(#[from] BarError),
    /// Indicator sequence is not aligned with the bar sequence
    #[error("Indicator length {indicators} does not match bar length {bars}")]
    IndicatorMismatch { bars: usize, indicators: usize },
}

/// Direction of an emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// Open or add to a long position
    Entry,
    /// Close or reduce a long position
    Exit,
}

/// Which detection rule produced the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventReason {
    /// Close broke above the premarket high
    BreakPremarket,
    /// Bullish close back above VWAP
    VwapReclaim,
    /// Close fell below VWAP
    VwapLoss,
    /// Upper wick dominates the bar range
    LongWick,
    /// Close breached the ATR trailing stop
    AtrStop,
}

impl EventReason {
    /// Stable wire name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            EventReason::BreakPremarket => "break_premarket",
            EventReason::VwapReclaim => "vwap_reclaim",
            EventReason::VwapLoss => "vwap_loss",
            EventReason::LongWick => "long_wick",
            EventReason::AtrStop => "atr_stop",
        }
    }
}

/// A detected trading event
///
/// Immutable once emitted; events for a symbol are ordered by bar timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier
    pub id: Uuid,
    /// Timestamp of the bar that produced the event
    pub timestamp: NaiveDateTime,
    /// Entry or exit
    pub kind: EventKind,
    /// Rule that fired
    pub reason: EventReason,
    /// Close price of the triggering bar
    pub price: Decimal,
}

impl Event {
    /// Create a new event
    pub fn new(
        timestamp: NaiveDateTime,
        kind: EventKind,
        reason: EventReason,
        price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            kind,
            reason,
            price,
        }
    }

    /// Display label of the form `ENTRY:vwap_reclaim`
    pub fn label(&self) -> String {
        let kind = match self.kind {
            EventKind::Entry => "ENTRY",
            EventKind::Exit => "EXIT",
        };
        format!("{}:{}", kind, self.reason.as_str())
    }
}

/// Detector position state, owned by a single detection pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionState {
    /// No open position
    Flat,
    /// Long since the recorded entry price
    Entered(Decimal),
}
