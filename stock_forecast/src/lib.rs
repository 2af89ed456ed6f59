//! # Stock Forecast
//!
//! Forecast a stock's closing price over a named horizon.
//!
//! ## Features
//!
//! - Horizon labels (`"1 week"`, `"1 month"`, `"3 months"`, `"1 year"`, `"5 years"`)
//! - CSV bar loading with timestamp normalization
//! - Additive trend + seasonality model with seeded uncertainty intervals
//! - Optional centered moving average smoothing of the history or the forecast
//! - JSON output of `ds`, `yhat`, `yhat_lower` and `yhat_upper`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stock_forecast::{DataLoader, ForecastRunner, RunnerConfig};
//!
//! # fn main() -> stock_forecast::error::Result<()> {
//! let data = DataLoader::from_csv("AAPL.csv")?;
//!
//! let runner = ForecastRunner::new(RunnerConfig {
//!     output_smoothing: Some(5),
//!     ..RunnerConfig::default()
//! })?;
//!
//! let forecast = runner.forecast(&data, "1 month")?;
//! assert_eq!(forecast.len(), 30);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod horizon;
pub mod models;
pub mod output;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{DataLoader, TimeSeriesData};
pub use crate::error::ForecastError;
pub use crate::horizon::{days_for_period, ForecastPeriod, DEFAULT_HORIZON_DAYS};
pub use crate::models::{
    AdditiveModel, ForecastModel, ForecastPoint, ForecastResult, ModelConfig, TrainedForecastModel,
};
pub use crate::runner::{ForecastRunner, RunnerConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
