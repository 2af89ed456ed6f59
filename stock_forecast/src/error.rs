//! Error types for the stock_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;
use trade_math::MathError;

/// Custom error types for the stock_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Input that cannot be turned into a time series: bad CSV, missing
    /// columns, unparseable dates, no usable rows
    #[error("Data error: {0}")]
    DataError(String),

    /// The model failed to fit or predict
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from the numeric routines
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error while encoding output
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ForecastError {
    /// Whether the error was caused by the input data rather than the model
    pub fn is_data_error(&self) -> bool {
        matches!(self, ForecastError::DataError(_) | ForecastError::PolarsError(_))
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}
