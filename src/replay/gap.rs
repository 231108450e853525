//! Gap percentage computation and candidate ranking

use crate::bars::Bar;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A symbol ranked by its open-versus-prior-close gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapCandidate {
    /// Ticker symbol
    pub ticker: String,
    /// Gap percentage, (open - prev_close) / prev_close * 100
    pub gap_pct: Decimal,
    /// Prior session close
    pub prev_close: Decimal,
    /// Target session open
    pub open_price: Decimal,
}

/// Compute the gap candidate for a symbol from its daily bars
///
/// With a target date, the daily row matching that calendar date is used and
/// the row before it supplies the prior close; without one, the last two rows
/// stand in for "most recent trading day". Returns `None` when the target row
/// or its predecessor is missing.
pub fn gap_candidate(ticker: &str, daily: &[Bar], target_date: Option<NaiveDate>) -> Option<GapCandidate> {
    let (prev_close, open_price) = match target_date {
        None => {
            if daily.len() < 2 {
                return None;
            }
            (daily[daily.len() - 2].close, daily[daily.len() - 1].open)
        }
        Some(date) => {
            let matched = daily.iter().position(|b| b.date() == date)?;
            if matched == 0 {
                return None;
            }
            (daily[matched - 1].close, daily[matched].open)
        }
    };

    if prev_close == Decimal::ZERO {
        return None;
    }

    let gap_pct = (open_price - prev_close) / prev_close * dec!(100);
    Some(GapCandidate {
        ticker: ticker.to_string(),
        gap_pct,
        prev_close,
        open_price,
    })
}

/// Keep candidates at or above the threshold, sorted by gap descending, top N
pub fn rank_candidates(
    mut candidates: Vec<GapCandidate>,
    threshold_pct: Decimal,
    top_n: usize,
) -> Vec<GapCandidate> {
    candidates.retain(|c| c.gap_pct >= threshold_pct);
    candidates.sort_by(|a, b| b.gap_pct.cmp(&a.gap_pct));
    candidates.truncate(top_n);
    candidates
}
