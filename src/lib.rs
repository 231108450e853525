//! gap-replay: Gap scanner and intraday signal replay engine for US equities
//!
//! This library provides the core components for:
//! - Daily/intraday OHLCV bar fetching from a chart API
//! - Rolling VWAP, true range, and ATR indicators
//! - Premarket-high reference computation
//! - Intraday entry/exit signal detection over 5-minute bars
//! - Gap% candidate selection and ranked session replay
//! - Continuous scanning with an in-play projection
//! - Full observability stack

pub mod bars;
pub mod cli;
pub mod config;
pub mod indicator;
pub mod replay;
pub mod scan;
pub mod signal;
pub mod sink;
pub mod source;
pub mod telemetry;
