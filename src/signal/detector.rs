//! Intraday signal detection
//!
//! Walks one session of bars in timestamp order and emits entry/exit events
//! from a fixed-priority rule chain. The rules are mutually exclusive per
//! bar: the first match wins and the rest are skipped, so a bar never yields
//! more than one event.

use super::types::{Event, EventKind, EventReason, PositionState, SignalError};
use crate::bars::{self, Bar};
use crate::indicator::{self, IndicatorSnapshot, DEFAULT_ATR_WINDOW};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Guards the wick-ratio division against zero-range bars
const WICK_EPSILON: Decimal = dec!(0.000000001);

/// Detection thresholds
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Trailing window for the ATR stop
    pub atr_window: usize,
    /// Minimum upper-wick share of the bar range for a long-wick exit
    pub wick_ratio: Decimal,
    /// ATR multiple below the entry price that triggers the stop
    pub atr_stop_multiple: Decimal,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            atr_window: DEFAULT_ATR_WINDOW,
            wick_ratio: dec!(0.6),
            atr_stop_multiple: dec!(1.5),
        }
    }
}

/// Detects entry/exit events over a single session of bars
pub struct SignalDetector {
    config: DetectorConfig,
}

impl SignalDetector {
    /// Create a detector with the given thresholds
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Create a detector with default thresholds
    pub fn with_defaults() -> Self {
        Self::new(DetectorConfig::default())
    }

    /// Detection thresholds in use
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Validate bars, compute indicators, and run one detection pass
    pub fn run(
        &self,
        bars: &[Bar],
        premarket_high: Option<Decimal>,
    ) -> Result<Vec<Event>, SignalError> {
        bars::validate_series(bars)?;
        let snapshots = indicator::snapshots(bars, self.config.atr_window);
        self.detect(bars, &snapshots, premarket_high)
    }

    /// Run one detection pass over pre-computed indicators
    ///
    /// `indicators` must be aligned one-to-one with `bars`. Rule priority per
    /// bar, first match wins:
    ///
    /// 1. close above the premarket high -> ENTRY break_premarket
    /// 2. bullish close above VWAP -> ENTRY vwap_reclaim
    /// 3. close below VWAP -> EXIT vwap_loss (fires even when flat)
    /// 4. upper wick ratio at threshold -> EXIT long_wick (fires even when flat)
    /// 5. close at or below entry - multiple x ATR -> EXIT atr_stop (entered only)
    ///
    /// While VWAP is still undefined, rules 2 and 3 cannot fire.
    pub fn detect(
        &self,
        bars: &[Bar],
        indicators: &[IndicatorSnapshot],
        premarket_high: Option<Decimal>,
    ) -> Result<Vec<Event>, SignalError> {
        if bars.len() != indicators.len() {
            return Err(SignalError::IndicatorMismatch {
                bars: bars.len(),
                indicators: indicators.len(),
            });
        }

        let mut events = Vec::new();
        let mut state = PositionState::Flat;

        for (bar, snap) in bars.iter().zip(indicators) {
            let close = bar.close;

            if let Some(reference) = premarket_high {
                if close > reference {
                    events.push(Event::new(
                        bar.timestamp,
                        EventKind::Entry,
                        EventReason::BreakPremarket,
                        close,
                    ));
                    state = PositionState::Entered(close);
                    continue;
                }
            }

            if let Some(vwap) = snap.vwap {
                if close > vwap && close > bar.open {
                    events.push(Event::new(
                        bar.timestamp,
                        EventKind::Entry,
                        EventReason::VwapReclaim,
                        close,
                    ));
                    state = PositionState::Entered(close);
                    continue;
                }

                if close < vwap {
                    events.push(Event::new(
                        bar.timestamp,
                        EventKind::Exit,
                        EventReason::VwapLoss,
                        close,
                    ));
                    state = PositionState::Flat;
                    continue;
                }
            }

            if upper_wick_ratio(bar) >= self.config.wick_ratio {
                events.push(Event::new(
                    bar.timestamp,
                    EventKind::Exit,
                    EventReason::LongWick,
                    close,
                ));
                state = PositionState::Flat;
                continue;
            }

            if let PositionState::Entered(entry_price) = state {
                let stop = entry_price - self.config.atr_stop_multiple * snap.atr;
                if close <= stop {
                    events.push(Event::new(
                        bar.timestamp,
                        EventKind::Exit,
                        EventReason::AtrStop,
                        close,
                    ));
                    state = PositionState::Flat;
                }
            }
        }

        Ok(events)
    }
}

/// Share of the bar range taken up by the upper wick
fn upper_wick_ratio(bar: &Bar) -> Decimal {
    let body_top = bar.open.max(bar.close);
    let upper_wick = bar.high - body_top;
    let total_range = bar.high - bar.low + WICK_EPSILON;
    upper_wick / total_range
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;

    fn ts(i: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
            + chrono::Duration::minutes(i as i64 * 5)
    }

    fn bar(i: u32, open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Bar {
        Bar {
            timestamp: ts(i),
            open,
            high,
            low,
            close,
            volume: dec!(1000),
        }
    }

    fn flat(i: u32, price: Decimal) -> Bar {
        bar(i, price, price, price, price)
    }

    #[test]
    fn test_empty_bars_no_events() {
        let detector = SignalDetector::with_defaults();
        let events = detector.run(&[], Some(dec!(10))).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_break_premarket_entry() {
        let detector = SignalDetector::with_defaults();
        let bars = vec![bar(0, dec!(10), dec!(10.6), dec!(9.9), dec!(10.5))];
        let events = detector.run(&bars, Some(dec!(10.2))).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Entry);
        assert_eq!(events[0].reason, EventReason::BreakPremarket);
        assert_eq!(events[0].price, dec!(10.5));
    }

    #[test]
    fn test_no_premarket_reference_skips_rule() {
        let detector = SignalDetector::with_defaults();
        // Bearish bar below VWAP: without a reference the first rule cannot
        // fire and vwap_loss takes over.
        let bars = vec![
            bar(0, dec!(10), dec!(10.2), dec!(9.8), dec!(10.1)),
            bar(1, dec!(10.1), dec!(10.1), dec!(9), dec!(9.2)),
        ];
        let events = detector.run(&bars, None).unwrap();
        assert_eq!(events.last().unwrap().reason, EventReason::VwapLoss);
    }

    #[test]
    fn test_vwap_reclaim_requires_bullish_bar() {
        let detector = SignalDetector::with_defaults();
        // Close above VWAP but open == close: not bullish, no entry; close is
        // not below VWAP either, and there is no wick, so no event at all.
        let bars = vec![
            flat(0, dec!(10)),
            bar(1, dec!(10.4), dec!(10.4), dec!(10.2), dec!(10.4)),
        ];
        let events = detector.run(&bars, None).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_vwap_reclaim_entry() {
        let detector = SignalDetector::with_defaults();
        let bars = vec![
            flat(0, dec!(10)),
            bar(1, dec!(10.0), dec!(10.6), dec!(10.0), dec!(10.6)),
        ];
        let events = detector.run(&bars, None).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].reason, EventReason::VwapReclaim);
    }

    #[test]
    fn test_vwap_loss_fires_when_flat() {
        let detector = SignalDetector::with_defaults();
        // No prior entry; the standing exit rule still fires.
        let bars = vec![
            flat(0, dec!(10)),
            bar(1, dec!(10), dec!(10), dec!(9), dec!(9.2)),
        ];
        let events = detector.run(&bars, None).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Exit);
        assert_eq!(events[0].reason, EventReason::VwapLoss);
    }

    #[test]
    fn test_priority_break_premarket_beats_long_wick() {
        let detector = SignalDetector::with_defaults();
        // Close above the reference AND a dominant upper wick; only the
        // higher-priority entry may fire, and only one event for the bar.
        let bars = vec![bar(0, dec!(10), dec!(14), dec!(10), dec!(10.5))];
        let events = detector.run(&bars, Some(dec!(10.2))).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].reason, EventReason::BreakPremarket);
    }

    #[test]
    fn test_long_wick_exit() {
        let detector = SignalDetector::with_defaults();
        // Upper wick 3 of range 4 = 0.75 ratio; close sits exactly on VWAP
        // so neither VWAP rule fires.
        let bars = vec![bar(0, dec!(10), dec!(14), dec!(10), dec!(11))];
        let events = detector.run(&bars, None).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].reason, EventReason::LongWick);
    }

    #[test]
    fn test_flat_bar_wick_ratio_is_zero() {
        let b = flat(0, dec!(10));
        assert_eq!(upper_wick_ratio(&b), Decimal::ZERO);
    }

    #[test]
    fn test_atr_stop_requires_entry() {
        let detector = SignalDetector::with_defaults();
        // A collapsing close with no prior entry and no VWAP/wick trigger:
        // close equals VWAP exactly, no wick, flat state -> no event.
        let bars = vec![flat(0, dec!(10))];
        let events = detector.run(&bars, None).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_atr_stop_after_entry() {
        let detector = SignalDetector::with_defaults();
        // Bar 0: entry above the premarket high at 20. Volume on bar 0 is
        // zeroed so VWAP on bar 1 equals its own close and neither VWAP rule
        // out-prioritizes the stop. TRs are 0.2 and 1.4, ATR(1) = 0.8, so the
        // stop sits at 20 - 1.5 * 0.8 = 18.8 and the 18.7 close breaches it.
        let mut entry_bar = bar(0, dec!(19.8), dec!(20), dec!(19.8), dec!(20));
        entry_bar.volume = Decimal::ZERO;
        let stop_bar = bar(1, dec!(18.9), dec!(18.9), dec!(18.6), dec!(18.7));

        let events = detector
            .run(&[entry_bar, stop_bar], Some(dec!(19.9)))
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].reason, EventReason::BreakPremarket);
        assert_eq!(events[1].reason, EventReason::AtrStop);
        assert_eq!(events[1].kind, EventKind::Exit);
    }

    #[test]
    fn test_at_most_one_event_per_bar() {
        let detector = SignalDetector::with_defaults();
        let bars: Vec<Bar> = (0..50)
            .map(|i| {
                let base = dec!(10) + Decimal::from(i % 7);
                bar(i, base, base + dec!(2), base - dec!(1), base + dec!(1))
            })
            .collect();
        let events = detector.run(&bars, Some(dec!(11))).unwrap();
        assert!(events.len() <= bars.len());

        // Timestamps are unique per bar, so no bar emitted twice
        let mut seen = std::collections::HashSet::new();
        for ev in &events {
            assert!(seen.insert(ev.timestamp));
        }
    }

    #[test]
    fn test_malformed_bars_rejected() {
        let detector = SignalDetector::with_defaults();
        // High below the close violates the OHLC bounds
        let bad = bar(0, dec!(10), dec!(9), dec!(8), dec!(10));
        let result = detector.run(&[bad], None);
        assert!(matches!(result, Err(SignalError::MalformedBar(_))));
    }

    #[test]
    fn test_indicator_mismatch_rejected() {
        let detector = SignalDetector::with_defaults();
        let bars = vec![flat(0, dec!(10))];
        let result = detector.detect(&bars, &[], None);
        assert!(matches!(
            result,
            Err(SignalError::IndicatorMismatch { bars: 1, indicators: 0 })
        ));
    }

    #[test]
    fn test_detection_is_deterministic() {
        let detector = SignalDetector::with_defaults();
        let bars: Vec<Bar> = (0..30)
            .map(|i| {
                let base = dec!(10) + Decimal::from(i % 5);
                bar(i, base, base + dec!(1), base - dec!(1), base + dec!(0.5))
            })
            .collect();

        let first = detector.run(&bars, Some(dec!(12))).unwrap();
        let second = detector.run(&bars, Some(dec!(12))).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.reason, b.reason);
            assert_eq!(a.price, b.price);
        }
    }
}
