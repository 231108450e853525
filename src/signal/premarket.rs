//! Premarket reference price

use crate::bars::Bar;
use chrono::NaiveTime;
use rust_decimal::Decimal;

/// Regular-session open used as the default premarket cutoff (09:30 local)
pub fn default_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).expect("valid cutoff time")
}

/// Highest `high` among bars strictly before the cutoff time-of-day
///
/// The filter applies across the entire input range, so with a multi-day
/// fetch window the reference includes premarket prints from earlier
/// sessions as well. Returns `None` when no bar trades before the cutoff.
pub fn premarket_high(bars: &[Bar], cutoff: NaiveTime) -> Option<Decimal> {
    bars.iter()
        .filter(|b| b.timestamp.time() < cutoff)
        .map(|b| b.high)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;

    fn ts(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn bar(day: u32, hour: u32, min: u32, high: Decimal) -> Bar {
        Bar {
            timestamp: ts(day, hour, min),
            open: high,
            high,
            low: high,
            close: high,
            volume: dec!(100),
        }
    }

    #[test]
    fn test_premarket_high_before_cutoff() {
        let bars = vec![
            bar(10, 7, 0, dec!(10.2)),
            bar(10, 9, 25, dec!(10.8)),
            bar(10, 9, 30, dec!(12)),
            bar(10, 10, 0, dec!(13)),
        ];
        // The 09:30 bar itself is regular session, not premarket
        assert_eq!(premarket_high(&bars, default_cutoff()), Some(dec!(10.8)));
    }

    #[test]
    fn test_no_premarket_bars() {
        let bars = vec![bar(10, 9, 30, dec!(12)), bar(10, 10, 0, dec!(13))];
        assert_eq!(premarket_high(&bars, default_cutoff()), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(premarket_high(&[], default_cutoff()), None);
    }

    #[test]
    fn test_spans_sessions_in_fetch_window() {
        // Premarket prints from an earlier session participate in the
        // reference when the fetch window covers multiple days.
        let bars = vec![
            bar(7, 8, 0, dec!(15)),
            bar(7, 10, 0, dec!(14)),
            bar(10, 8, 0, dec!(11)),
            bar(10, 10, 0, dec!(13)),
        ];
        assert_eq!(premarket_high(&bars, default_cutoff()), Some(dec!(15)));
    }

    #[test]
    fn test_custom_cutoff() {
        let bars = vec![bar(10, 9, 45, dec!(10)), bar(10, 10, 15, dec!(11))];
        let cutoff = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(premarket_high(&bars, cutoff), Some(dec!(10)));
    }
}
