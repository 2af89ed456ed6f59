//! Placeholder bar fixtures
//!
//! Generates one constant-valued bar per business day and writes the bars as
//! CSV with the standard `symbol,timestamp,open,high,low,close,volume` header.

use crate::calendar::HolidayCalendar;
use crate::{Bar, MarketDataError, Result};
use chrono::NaiveDate;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Symbol used for generated fixtures
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// File name written when no output path is given
pub const DEFAULT_FILE_NAME: &str = "AAPL_2013_2020_business_days_ones.csv";

/// Parameters of a generated fixture
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSpec {
    /// Ticker symbol stamped on every bar
    pub symbol: String,
    /// First calendar date considered (inclusive)
    pub start: NaiveDate,
    /// Last calendar date considered (inclusive)
    pub end: NaiveDate,
    /// Value for open, high, low and close
    pub price: f64,
    /// Value for volume
    pub volume: u64,
    /// Destination file
    pub output: PathBuf,
}

impl Default for FixtureSpec {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            start: NaiveDate::from_ymd_opt(2013, 1, 1).expect("2013-01-01 is a valid date"),
            end: NaiveDate::from_ymd_opt(2020, 12, 31).expect("2020-12-31 is a valid date"),
            price: 1.0,
            volume: 1,
            output: PathBuf::from(DEFAULT_FILE_NAME),
        }
    }
}

/// Build one sentinel bar per business day in the requested range
pub fn sentinel_bars<C: HolidayCalendar>(spec: &FixtureSpec, calendar: &C) -> Result<Vec<Bar>> {
    if spec.start > spec.end {
        return Err(MarketDataError::InvalidRange(format!(
            "start {} is after end {}",
            spec.start, spec.end
        )));
    }

    let bars: Vec<Bar> = calendar
        .business_days(spec.start, spec.end)
        .into_iter()
        .map(|date| Bar::flat(&spec.symbol, date, spec.price, spec.volume))
        .collect();

    debug!(
        "Generated {} {} bars between {} and {}",
        bars.len(),
        spec.symbol,
        spec.start,
        spec.end
    );

    Ok(bars)
}

/// Write bars as CSV, header first
pub fn write_csv<W: Write>(bars: &[Bar], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if bars.is_empty() {
        // serde only emits the header alongside the first record
        csv_writer.write_record(["symbol", "timestamp", "open", "high", "low", "close", "volume"])?;
    }
    for bar in bars {
        csv_writer.serialize(bar)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write bars to a CSV file, replacing any existing file
pub fn write_csv_file<P: AsRef<Path>>(path: P, bars: &[Bar]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(bars, BufWriter::new(file))?;
    info!("Wrote {} bars to {}", bars.len(), path.display());
    Ok(())
}
