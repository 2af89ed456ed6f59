//! Time series data handling for forecasting
//!
//! Bars arrive as CSV with at least a `timestamp` and a `close` column. The
//! loader reads them into a polars frame, renames the two columns the model
//! needs to `ds` and `y`, projects away everything else and normalizes `ds`
//! to plain calendar dates.

use crate::error::{ForecastError, Result};
use crate::utils::parse_calendar_date;
use chrono::NaiveDate;
use log::{debug, warn};
use polars::prelude::*;
use std::io::{Cursor, Read};
use std::path::Path;
use trade_math::centered_moving_average;

/// Input column holding the bar date
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Input column holding the closing price
pub const CLOSE_COLUMN: &str = "close";
/// Model column holding the date
pub const DATE_COLUMN: &str = "ds";
/// Model column holding the value
pub const VALUE_COLUMN: &str = "y";

/// Date/value series the model is fitted on
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesData {
    /// Observation dates, ascending
    dates: Vec<NaiveDate>,
    /// Observed values
    values: Vec<f64>,
}

/// Data loader for time series data
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load time series data from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeriesData> {
        let bytes = std::fs::read(path)?;
        Self::from_csv_bytes(bytes)
    }

    /// Load time series data from a CSV stream, reading it to the end
    pub fn from_reader<R: Read>(mut reader: R) -> Result<TimeSeriesData> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_csv_bytes(bytes)
    }

    /// Load time series data from raw CSV bytes
    pub fn from_csv_bytes(bytes: Vec<u8>) -> Result<TimeSeriesData> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ForecastError::DataError(
                "Input contains no CSV data".to_string(),
            ));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(|e| ForecastError::DataError(format!("Failed to parse CSV input: {}", e)))?;

        Self::from_dataframe(df)
    }

    /// Create time series data from a bar DataFrame
    pub fn from_dataframe(mut df: DataFrame) -> Result<TimeSeriesData> {
        for required in [TIMESTAMP_COLUMN, CLOSE_COLUMN] {
            if df.column(required).is_err() {
                return Err(ForecastError::DataError(format!(
                    "Missing required column '{}'",
                    required
                )));
            }
        }

        df.rename(TIMESTAMP_COLUMN, DATE_COLUMN.into())
            .and_then(|df| df.rename(CLOSE_COLUMN, VALUE_COLUMN.into()))
            .map_err(|e| ForecastError::DataError(format!("Cannot rename input columns: {}", e)))?;
        let frame = df.select([DATE_COLUMN, VALUE_COLUMN])?;

        if frame.height() == 0 {
            return Err(ForecastError::DataError("Input has no data rows".to_string()));
        }

        Self::normalize(&frame)
    }

    /// Turn the projected `ds`/`y` frame into dated values
    fn normalize(frame: &DataFrame) -> Result<TimeSeriesData> {
        let raw_dates = frame.column(DATE_COLUMN)?.cast(&DataType::String)?;
        let raw_values = frame.column(VALUE_COLUMN)?.cast(&DataType::Float64)?;
        let dates = raw_dates.str()?;
        let values = raw_values.f64()?;

        let mut rows = Vec::with_capacity(frame.height());
        let mut skipped = 0usize;
        for (index, (raw_date, value)) in dates.into_iter().zip(values.into_iter()).enumerate() {
            let date = raw_date.and_then(parse_calendar_date).ok_or_else(|| {
                ForecastError::DataError(format!(
                    "Row {}: cannot parse timestamp {:?}",
                    index + 1,
                    raw_date.unwrap_or("")
                ))
            })?;

            match value {
                Some(value) if value.is_finite() => rows.push((date, value)),
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("Skipped {} rows without a numeric close", skipped);
        }

        if rows.is_empty() {
            return Err(ForecastError::DataError(
                "Input has no rows with a numeric close".to_string(),
            ));
        }

        rows.sort_by_key(|(date, _)| *date);
        let (dates, values): (Vec<NaiveDate>, Vec<f64>) = rows.into_iter().unzip();
        debug!(
            "Loaded {} observations from {} to {}",
            dates.len(),
            dates[0],
            dates[dates.len() - 1]
        );

        Ok(TimeSeriesData { dates, values })
    }
}

impl TimeSeriesData {
    /// Create a new TimeSeriesData from dates and values
    ///
    /// The pairs are sorted by date; their relative order is kept for equal
    /// dates.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }

        let mut rows: Vec<(NaiveDate, f64)> = dates.into_iter().zip(values).collect();
        rows.sort_by_key(|(date, _)| *date);
        let (dates, values) = rows.into_iter().unzip();

        Ok(Self { dates, values })
    }

    /// Observation dates
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observed values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Date of the most recent observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Check if the time series is empty
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Get the length of the time series
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Copy of the series with values smoothed by a centered moving average
    pub fn smoothed(&self, window: usize) -> Result<Self> {
        let values = centered_moving_average(&self.values, window)?;

        Ok(Self {
            dates: self.dates.clone(),
            values,
        })
    }
}
