//! # Trade Math
//!
//! Numeric building blocks shared by the forecasting workspace: series
//! smoothing and penalized least squares.

use thiserror::Error;

pub mod forecasting;
pub mod moving_averages;

pub use forecasting::RidgeRegression;
pub use moving_averages::{centered_moving_average, CenteredMovingAverage};

/// Errors that can occur in numeric calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;
