//! In-memory in-play projection

use super::EventSink;
use crate::signal::Event;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Projection entry for one symbol
#[derive(Debug, Clone)]
pub struct InPlayEntry {
    /// Most recent event for the symbol (last write wins)
    pub latest: Event,
    /// All events recorded for the symbol, in arrival order
    pub history: Vec<Event>,
}

/// In-memory event sink
///
/// Keeps the last-write-wins per-symbol projection plus full per-symbol
/// history, which the CLI prints after a replay and tests inspect directly.
#[derive(Default)]
pub struct MemorySink {
    entries: RwLock<HashMap<String, InPlayEntry>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest event recorded for a symbol
    pub async fn latest(&self, symbol: &str) -> Option<Event> {
        let entries = self.entries.read().await;
        entries.get(symbol).map(|e| e.latest.clone())
    }

    /// Full event history for a symbol, in arrival order
    pub async fn history(&self, symbol: &str) -> Vec<Event> {
        let entries = self.entries.read().await;
        entries
            .get(symbol)
            .map(|e| e.history.clone())
            .unwrap_or_default()
    }

    /// Symbols currently in play, sorted
    pub async fn symbols(&self) -> Vec<String> {
        let entries = self.entries.read().await;
        let mut symbols: Vec<String> = entries.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Number of symbols in the projection
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the projection is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn upsert(&self, symbol: &str, event: &Event) -> anyhow::Result<()> {
        let mut entries = self.entries.write().await;
        entries
            .entry(symbol.to_string())
            .and_modify(|e| {
                e.latest = event.clone();
                e.history.push(event.clone());
            })
            .or_insert_with(|| InPlayEntry {
                latest: event.clone(),
                history: vec![event.clone()],
            });
        Ok(())
    }
}
