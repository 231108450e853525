//! Event sink module
//!
//! Durable stores for emitted events live behind the `EventSink` trait; the
//! in-play projection a UI reads is keyed by symbol with last-write-wins
//! semantics. This crate ships an in-memory implementation; database-backed
//! sinks are external collaborators.

mod memory;

pub use memory::{InPlayEntry, MemorySink};

use crate::signal::Event;
use async_trait::async_trait;

/// Trait for event sink implementations
///
/// Each event write is independently idempotent: re-delivering an event must
/// not corrupt the projection, and a write failure is recoverable by the
/// caller (log and continue).
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Record an event for a symbol
    async fn upsert(&self, symbol: &str, event: &Event) -> anyhow::Result<()>;
}
