//! Rolling indicators over a bar series
//!
//! Cumulative VWAP, per-bar true range, and trailing-window ATR. All
//! functions are pure: one output per input bar, input never mutated,
//! empty input yields empty output.

use crate::bars::Bar;
use rust_decimal::Decimal;

/// ATR trailing window length used when none is configured
pub const DEFAULT_ATR_WINDOW: usize = 14;

/// Per-bar derived values, aligned one-to-one with the input series
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    /// Cumulative volume-weighted average price up to and including this bar.
    /// `None` until the first bar with positive cumulative volume; carries
    /// the last defined value across zero-volume stretches afterwards.
    pub vwap: Option<Decimal>,
    /// True range of this bar
    pub true_range: Decimal,
    /// Mean true range over the trailing window (minimum one bar)
    pub atr: Decimal,
}

/// Cumulative VWAP per bar
///
/// Computed as cumulative (close x volume) / cumulative volume. While
/// cumulative volume is zero the value is undefined and the last defined
/// value is carried forward (`None` before any volume has printed).
pub fn rolling_vwap(bars: &[Bar]) -> Vec<Option<Decimal>> {
    let mut out = Vec::with_capacity(bars.len());
    let mut cum_pv = Decimal::ZERO;
    let mut cum_v = Decimal::ZERO;
    let mut last = None;

    for bar in bars {
        cum_pv += bar.close * bar.volume;
        cum_v += bar.volume;
        if cum_v > Decimal::ZERO {
            last = Some(cum_pv / cum_v);
        }
        out.push(last);
    }
    out
}

/// Per-bar true range
///
/// TR = max(high - low, |high - prev_close|, |low - prev_close|), where the
/// first bar uses its own open as the previous close.
pub fn true_range(bars: &[Bar]) -> Vec<Decimal> {
    let mut out = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let prev_close = if i == 0 { bar.open } else { bars[i - 1].close };
        let hl = bar.high - bar.low;
        let hc = (bar.high - prev_close).abs();
        let lc = (bar.low - prev_close).abs();
        out.push(hl.max(hc).max(lc));
    }
    out
}

/// Trailing simple-mean ATR over `window` bars
///
/// Uses as many bars as exist for the first `window - 1` positions, so the
/// value is defined from the very first bar.
pub fn rolling_atr(bars: &[Bar], window: usize) -> Vec<Decimal> {
    let tr = true_range(bars);
    let window = window.max(1);
    let mut out = Vec::with_capacity(tr.len());
    let mut running = Decimal::ZERO;

    for i in 0..tr.len() {
        running += tr[i];
        if i >= window {
            running -= tr[i - window];
        }
        let count = Decimal::from((i + 1).min(window));
        out.push(running / count);
    }
    out
}

/// Compute the aligned snapshot series for a bar sequence
pub fn snapshots(bars: &[Bar], atr_window: usize) -> Vec<IndicatorSnapshot> {
    let vwap = rolling_vwap(bars);
    let tr = true_range(bars);
    let atr = rolling_atr(bars, atr_window);

    vwap.into_iter()
        .zip(tr)
        .zip(atr)
        .map(|((vwap, true_range), atr)| IndicatorSnapshot {
            vwap,
            true_range,
            atr,
        })
        .collect()
}
