//! End-to-end forecast pipeline
//!
//! CSV in, JSON out: load and normalize the bars, optionally smooth the
//! history, fit on all of it, predict history plus horizon, optionally smooth
//! the forecast and keep the last `horizon` rows.

use crate::data::{DataLoader, TimeSeriesData};
use crate::error::Result;
use crate::horizon::days_for_period;
use crate::models::{AdditiveModel, ForecastModel, ForecastResult, ModelConfig, TrainedForecastModel};
use crate::output;
use log::info;
use std::io::{Read, Write};

/// Output smoothing window used when smoothing is switched on without a size
pub const DEFAULT_OUTPUT_SMOOTHING: usize = 5;

/// Configuration of a forecast run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunnerConfig {
    /// Model settings
    pub model: ModelConfig,
    /// Centered moving average window applied to the forecast
    pub output_smoothing: Option<usize>,
    /// Centered moving average window applied to the history before fitting
    pub history_smoothing: Option<usize>,
}

/// Runs a forecast model over a bar series
#[derive(Debug, Clone)]
pub struct ForecastRunner<M: ForecastModel> {
    model: M,
    output_smoothing: Option<usize>,
    history_smoothing: Option<usize>,
}

impl ForecastRunner<AdditiveModel> {
    /// Runner backed by the additive model
    pub fn new(config: RunnerConfig) -> Result<Self> {
        let model = AdditiveModel::new(config.model)?;
        Ok(Self {
            model,
            output_smoothing: config.output_smoothing,
            history_smoothing: config.history_smoothing,
        })
    }
}

impl<M: ForecastModel> ForecastRunner<M> {
    /// Runner backed by any forecast model
    pub fn with_model(model: M, output_smoothing: Option<usize>, history_smoothing: Option<usize>) -> Self {
        Self {
            model,
            output_smoothing,
            history_smoothing,
        }
    }

    /// The underlying model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Forecast `period` ahead of the last observation in `data`
    ///
    /// Returns exactly `days_for_period(period)` rows when the model predicts
    /// the full horizon.
    pub fn forecast(&self, data: &TimeSeriesData, period: &str) -> Result<ForecastResult> {
        let days = days_for_period(period);

        let history = match self.history_smoothing {
            Some(window) => data.smoothed(window)?,
            None => data.clone(),
        };

        let trained = self.model.train(&history)?;
        let dates = trained.future_dates(days, true);
        let mut forecast = trained.predict(&dates)?;

        if let Some(window) = self.output_smoothing {
            forecast = forecast.smoothed(window)?;
        }

        info!(
            "{} forecast {} days from {} observations",
            trained.name(),
            days,
            data.len()
        );

        Ok(forecast.tail(days))
    }

    /// Read bars as CSV from `input` and write the forecast as JSON to `output`
    ///
    /// Nothing is written unless the whole forecast succeeds. Returns the
    /// number of records written.
    pub fn run<R: Read, W: Write>(&self, period: &str, input: R, output: W) -> Result<usize> {
        let data = DataLoader::from_reader(input)?;
        let forecast = self.forecast(&data, period)?;
        let points = forecast.points();
        output::write_json(&points, output)?;
        Ok(points.len())
    }
}
