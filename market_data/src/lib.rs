//! # Market Data
//!
//! `market_data` holds the daily bar record shared by the forecasting tools,
//! a US federal business-day calendar, and a generator for placeholder CSV
//! fixtures built on that calendar.
//!
//! ## Usage Example
//!
//! ```no_run
//! use market_data::calendar::UsFederalCalendar;
//! use market_data::fixture::{self, FixtureSpec};
//!
//! let spec = FixtureSpec::default();
//! let bars = fixture::sentinel_bars(&spec, &UsFederalCalendar).unwrap();
//! fixture::write_csv_file(&spec.output, &bars).unwrap();
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

pub mod calendar;
pub mod fixture;

pub use calendar::{FederalHoliday, UsFederalCalendar};
pub use fixture::FixtureSpec;

/// Errors that can occur while building or writing market data
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for market data operations
pub type Result<T> = std::result::Result<T, MarketDataError>;

/// One daily OHLCV bar, in CSV column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Ticker symbol
    pub symbol: String,
    /// Trading date
    pub timestamp: NaiveDate,
    /// Open price
    #[serde(serialize_with = "compact_decimal")]
    pub open: f64,
    /// High price
    #[serde(serialize_with = "compact_decimal")]
    pub high: f64,
    /// Low price
    #[serde(serialize_with = "compact_decimal")]
    pub low: f64,
    /// Close price
    #[serde(serialize_with = "compact_decimal")]
    pub close: f64,
    /// Volume
    pub volume: u64,
}

impl Bar {
    /// Create a bar whose four prices all equal `price`
    pub fn flat(symbol: &str, timestamp: NaiveDate, price: f64, volume: u64) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
        }
    }
}

/// Write whole-number prices as integers (`1` rather than `1.0`)
fn compact_decimal<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
