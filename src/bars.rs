//! OHLCV bar types and series validation

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bar validation errors
#[derive(Debug, Error)]
pub enum BarError {
    /// High/low bounds do not contain the open/close
    #[error("Bar at {timestamp} violates OHLC bounds: o={open} h={high} l={low} c={close}")]
    InvalidRange {
        timestamp: NaiveDateTime,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    },
    /// A price or volume field is negative
    #[error("Bar at {timestamp} has negative {field}")]
    NegativeField {
        timestamp: NaiveDateTime,
        field: &'static str,
    },
    /// Timestamps must be strictly increasing
    #[error("Bar at {next} is not after {prev}")]
    NonMonotonic {
        prev: NaiveDateTime,
        next: NaiveDateTime,
    },
}

/// One OHLCV sample for a fixed time interval
///
/// Timestamps are exchange-local and tz-naive; callers are responsible for
/// supplying bars in strictly increasing timestamp order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Exchange-local bar timestamp
    pub timestamp: NaiveDateTime,
    /// Opening price
    pub open: Decimal,
    /// Highest traded price
    pub high: Decimal,
    /// Lowest traded price
    pub low: Decimal,
    /// Closing price
    pub close: Decimal,
    /// Traded volume
    pub volume: Decimal,
}

impl Bar {
    /// Check the single-bar invariants
    pub fn validate(&self) -> Result<(), BarError> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ] {
            if value < Decimal::ZERO {
                return Err(BarError::NegativeField {
                    timestamp: self.timestamp,
                    field,
                });
            }
        }

        if self.high < self.open.max(self.close) || self.low > self.open.min(self.close) {
            return Err(BarError::InvalidRange {
                timestamp: self.timestamp,
                open: self.open,
                high: self.high,
                low: self.low,
                close: self.close,
            });
        }

        Ok(())
    }

    /// Calendar date of the bar in exchange-local time
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Validate a bar series: per-bar invariants plus strictly increasing timestamps
pub fn validate_series(bars: &[Bar]) -> Result<(), BarError> {
    for bar in bars {
        bar.validate()?;
    }
    for pair in bars.windows(2) {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(BarError::NonMonotonic {
                prev: pair[0].timestamp,
                next: pair[1].timestamp,
            });
        }
    }
    Ok(())
}

/// Keep only bars whose exchange-local calendar date matches `date`
pub fn filter_to_date(bars: &[Bar], date: NaiveDate) -> Vec<Bar> {
    bars.iter().filter(|b| b.date() == date).cloned().collect()
}

/// Calendar date of the most recent bar, if any
pub fn last_session_date(bars: &[Bar]) -> Option<NaiveDate> {
    bars.last().map(Bar::date)
}
