//! Forecasting models for time series data

use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use trade_math::CenteredMovingAverage;

pub mod additive;
pub mod seasonality;
pub mod trend;

pub use additive::{AdditiveModel, ModelConfig, TrainedAdditiveModel};
pub use seasonality::{Seasonality, SeasonalityMode};

/// One forecast row as emitted to callers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast date
    #[serde(rename = "ds")]
    pub date: NaiveDate,
    /// Point estimate
    #[serde(rename = "yhat")]
    pub predicted: f64,
    /// Lower edge of the uncertainty interval
    #[serde(rename = "yhat_lower")]
    pub lower_bound: f64,
    /// Upper edge of the uncertainty interval
    #[serde(rename = "yhat_upper")]
    pub upper_bound: f64,
}

/// Forecast result containing predicted values and their intervals
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Dates the values refer to
    dates: Vec<NaiveDate>,
    /// Forecasted values
    values: Vec<f64>,
    /// Lower and upper interval bounds
    intervals: Vec<(f64, f64)>,
}

impl ForecastResult {
    /// Create a new forecast result with confidence intervals
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>, intervals: Vec<(f64, f64)>) -> Result<Self> {
        if values.len() != dates.len() {
            return Err(ForecastError::ForecastingError(format!(
                "Values length ({}) doesn't match dates length ({})",
                values.len(),
                dates.len()
            )));
        }

        if values.len() != intervals.len() {
            return Err(ForecastError::ForecastingError(format!(
                "Values length ({}) doesn't match intervals length ({})",
                values.len(),
                intervals.len()
            )));
        }

        Ok(Self {
            dates,
            values,
            intervals,
        })
    }

    /// Get the forecast dates
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the confidence intervals
    pub fn intervals(&self) -> &[(f64, f64)] {
        &self.intervals
    }

    /// Number of forecast rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the forecast has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smooth the estimate and both interval bounds independently
    pub fn smoothed(&self, window: usize) -> Result<Self> {
        let sma = CenteredMovingAverage::new(window)?;

        let lower: Vec<f64> = self.intervals.iter().map(|(lower, _)| *lower).collect();
        let upper: Vec<f64> = self.intervals.iter().map(|(_, upper)| *upper).collect();
        let intervals = sma.apply(&lower).into_iter().zip(sma.apply(&upper)).collect();

        Self::new(self.dates.clone(), sma.apply(&self.values), intervals)
    }

    /// The last `periods` rows (all of them when there are fewer)
    pub fn tail(&self, periods: usize) -> Self {
        let start = self.len().saturating_sub(periods);
        Self {
            dates: self.dates[start..].to_vec(),
            values: self.values[start..].to_vec(),
            intervals: self.intervals[start..].to_vec(),
        }
    }

    /// Rows in output form
    pub fn points(&self) -> Vec<ForecastPoint> {
        self.dates
            .iter()
            .zip(&self.values)
            .zip(&self.intervals)
            .map(|((date, value), (lower, upper))| ForecastPoint {
                date: *date,
                predicted: *value,
                lower_bound: *lower,
                upper_bound: *upper,
            })
            .collect()
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Dates to predict: the distinct history dates (when requested)
    /// followed by `periods` calendar days after the last observation
    fn future_dates(&self, periods: usize, include_history: bool) -> Vec<NaiveDate>;

    /// Predict values and intervals for the given dates
    fn predict(&self, dates: &[NaiveDate]) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on time series data
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on time series data
    fn train(&self, data: &TimeSeriesData) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}
