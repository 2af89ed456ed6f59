//! # Stock Forecast Workspace
//!
//! Umbrella crate over the workspace members:
//!
//! - [`trade_math`]: centered moving average and ridge least squares
//! - [`market_data`]: daily bars, the US federal business-day calendar and
//!   CSV fixture generation
//! - [`stock_forecast`]: horizon labels, CSV loading, the additive model and
//!   the forecast runner
//!
//! ## Example
//!
//! ```
//! use stock_forecast_workspace::stock_forecast::days_for_period;
//! use stock_forecast_workspace::trade_math::centered_moving_average;
//!
//! assert_eq!(days_for_period("1 week"), 7);
//! assert_eq!(centered_moving_average(&[5.0; 7], 5).unwrap(), vec![5.0; 7]);
//! ```

pub use market_data;
pub use stock_forecast;
pub use trade_math;
