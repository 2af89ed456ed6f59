//! Additive trend + seasonality model
//!
//! The series is modelled as a piecewise linear trend plus Fourier seasonal
//! terms, fitted in one penalized least squares solve:
//!
//! ```text
//! y(t) = trend(t) + yearly(t) + weekly(t) + noise
//! ```
//!
//! Coefficients carry Gaussian priors (intercept and slope loose, slope
//! changes tight, seasonal terms moderate). A first solve estimates the noise
//! level; the second scales each prior penalty by it.
//!
//! Uncertainty intervals combine observation noise with trend uncertainty:
//! beyond the history the trend is allowed to change slope again at the
//! rate and magnitude seen in the history. Sampling is seeded, so the same
//! data and configuration always give the same bands.

use super::seasonality::{Seasonality, SeasonalityMode};
use super::trend::{extra_offsets, PiecewiseLinearTrend};
use super::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::utils;
use chrono::NaiveDate;
use log::{log, Level};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Poisson};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::{Data, OrderStatistics};
use trade_math::RidgeRegression;

/// Prior scale of the intercept and the initial slope
const TREND_PRIOR_SCALE: f64 = 5.0;
/// Smallest penalty on any coefficient
const MIN_PENALTY: f64 = 1e-6;
/// Added to the slope-change scale so sampling never sees a zero scale
const DELTA_SCALE_FLOOR: f64 = 1e-8;
/// History span that switches on yearly seasonality in `Auto` mode
const YEARLY_MIN_SPAN_DAYS: i64 = 730;
/// History span that switches on weekly seasonality in `Auto` mode
const WEEKLY_MIN_SPAN_DAYS: i64 = 14;

/// Configuration of the additive model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Maximum number of trend changepoints
    pub n_changepoints: usize,
    /// Share of the history in which changepoints are placed
    pub changepoint_range: f64,
    /// Prior scale of trend slope changes; larger means a more flexible trend
    pub changepoint_prior_scale: f64,
    /// Prior scale of seasonal coefficients
    pub seasonality_prior_scale: f64,
    /// Yearly seasonality switch
    pub yearly_seasonality: SeasonalityMode,
    /// Weekly seasonality switch
    pub weekly_seasonality: SeasonalityMode,
    /// Probability mass covered by the uncertainty interval
    pub interval_width: f64,
    /// Simulated paths for the interval; 0 uses the analytic noise band
    pub uncertainty_samples: usize,
    /// Seed for interval simulation
    pub seed: u64,
    /// Report fit diagnostics at info level instead of debug
    pub verbose: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            yearly_seasonality: SeasonalityMode::Auto,
            weekly_seasonality: SeasonalityMode::Auto,
            interval_width: 0.8,
            uncertainty_samples: 1000,
            seed: 0,
            verbose: false,
        }
    }
}

impl ModelConfig {
    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.changepoint_range) {
            return Err(ForecastError::InvalidParameter(format!(
                "changepoint_range must be between 0 and 1, got {}",
                self.changepoint_range
            )));
        }

        for (name, scale) in [
            ("changepoint_prior_scale", self.changepoint_prior_scale),
            ("seasonality_prior_scale", self.seasonality_prior_scale),
        ] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be positive, got {}",
                    name, scale
                )));
            }
        }

        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "interval_width must be strictly between 0 and 1, got {}",
                self.interval_width
            )));
        }

        Ok(())
    }

    fn log_level(&self) -> Level {
        if self.verbose {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

/// Additive trend + seasonality forecasting model
#[derive(Debug, Clone)]
pub struct AdditiveModel {
    /// Name of the model
    name: String,
    /// Model configuration
    config: ModelConfig,
}

/// Fitted additive model
#[derive(Debug, Clone)]
pub struct TrainedAdditiveModel {
    /// Name of the model
    name: String,
    /// Model configuration
    config: ModelConfig,
    /// First history date, time zero
    start: NaiveDate,
    /// History span in days, time one
    span_days: f64,
    /// Divisor applied to observed values
    y_scale: f64,
    /// Trend component
    trend: PiecewiseLinearTrend,
    /// Active seasonal components
    seasonalities: Vec<Seasonality>,
    /// Fitted coefficients, trend columns first
    coefficients: Vec<f64>,
    /// Residual standard deviation on the scaled axis
    sigma: f64,
    /// Mean absolute slope change, drives future trend uncertainty
    delta_scale: f64,
    /// Distinct history dates, ascending
    history_dates: Vec<NaiveDate>,
}

impl AdditiveModel {
    /// Create a new additive model
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            name: model_name(&config),
            config,
        })
    }

    /// Get the model configuration
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn active_seasonalities(&self, dates: &[NaiveDate], span_days: i64) -> Vec<Seasonality> {
        let smallest_gap = dates
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_days())
            .filter(|gap| *gap > 0)
            .min()
            .unwrap_or(i64::MAX);

        let mut active = Vec::new();
        if is_enabled(
            self.config.yearly_seasonality,
            span_days >= YEARLY_MIN_SPAN_DAYS,
        ) {
            active.push(Seasonality::YEARLY);
        }
        if is_enabled(
            self.config.weekly_seasonality,
            span_days >= WEEKLY_MIN_SPAN_DAYS && smallest_gap < 7,
        ) {
            active.push(Seasonality::WEEKLY);
        }
        active
    }

    /// Prior scale of every design column, in column order
    fn prior_scales(&self, trend: &PiecewiseLinearTrend, seasonalities: &[Seasonality]) -> Vec<f64> {
        let mut scales = vec![TREND_PRIOR_SCALE; 2];
        scales.extend(std::iter::repeat(self.config.changepoint_prior_scale).take(trend.changepoints().len()));
        for seasonality in seasonalities {
            scales.extend(std::iter::repeat(self.config.seasonality_prior_scale).take(seasonality.width()));
        }
        scales
    }
}

impl Default for AdditiveModel {
    fn default() -> Self {
        let config = ModelConfig::default();
        Self {
            name: model_name(&config),
            config,
        }
    }
}

fn model_name(config: &ModelConfig) -> String {
    format!(
        "Additive (changepoints={}, interval={})",
        config.n_changepoints, config.interval_width
    )
}

fn is_enabled(mode: SeasonalityMode, auto: bool) -> bool {
    match mode {
        SeasonalityMode::Auto => auto,
        SeasonalityMode::Enabled => true,
        SeasonalityMode::Disabled => false,
    }
}

fn design_row(
    trend: &PiecewiseLinearTrend,
    seasonalities: &[Seasonality],
    date: NaiveDate,
    t: f64,
) -> Vec<f64> {
    let width = trend.width() + seasonalities.iter().map(Seasonality::width).sum::<usize>();
    let mut row = Vec::with_capacity(width);
    trend.extend_row(t, &mut row);
    for seasonality in seasonalities {
        seasonality.extend_row(date, &mut row);
    }
    row
}

fn dot(row: &[f64], coefficients: &[f64]) -> f64 {
    row.iter().zip(coefficients).map(|(x, b)| x * b).sum()
}

/// Root mean squared residual of a fit
fn residual_scale(design: &[Vec<f64>], targets: &[f64], coefficients: &[f64]) -> f64 {
    let sum: f64 = design
        .iter()
        .zip(targets)
        .map(|(row, y)| (y - dot(row, coefficients)).powi(2))
        .sum();
    (sum / targets.len() as f64).sqrt()
}

fn model_error<E: std::fmt::Display>(context: &str) -> impl Fn(E) -> ForecastError + '_ {
    move |e| ForecastError::ForecastingError(format!("{}: {}", context, e))
}

impl ForecastModel for AdditiveModel {
    type Trained = TrainedAdditiveModel;

    fn train(&self, data: &TimeSeriesData) -> Result<Self::Trained> {
        let (dates, values): (Vec<NaiveDate>, Vec<f64>) = data
            .dates()
            .iter()
            .zip(data.values())
            .filter(|(_, y)| y.is_finite())
            .map(|(date, y)| (*date, *y))
            .unzip();

        if values.len() < 2 {
            return Err(ForecastError::ForecastingError(format!(
                "Need at least 2 observations with a value, got {}",
                values.len()
            )));
        }

        // TimeSeriesData keeps dates ascending
        let start = dates[0];
        let end = dates[dates.len() - 1];
        let span_days = (end - start).num_days();
        if span_days <= 0 {
            return Err(ForecastError::ForecastingError(
                "History must cover at least two distinct dates".to_string(),
            ));
        }

        let max_abs = values.iter().fold(0.0_f64, |acc, y| acc.max(y.abs()));
        let y_scale = if max_abs > 0.0 { max_abs } else { 1.0 };

        let times: Vec<f64> = dates
            .iter()
            .map(|date| (*date - start).num_days() as f64 / span_days as f64)
            .collect();
        let trend = PiecewiseLinearTrend::fit_changepoints(
            &times,
            self.config.n_changepoints,
            self.config.changepoint_range,
        );
        let seasonalities = self.active_seasonalities(&dates, span_days);

        let design: Vec<Vec<f64>> = dates
            .iter()
            .zip(&times)
            .map(|(date, t)| design_row(&trend, &seasonalities, *date, *t))
            .collect();
        let targets: Vec<f64> = values.iter().map(|y| y / y_scale).collect();
        let prior_scales = self.prior_scales(&trend, &seasonalities);

        // First pass: just enough regularization to keep the system solvable
        let initial = RidgeRegression::new(vec![MIN_PENALTY; prior_scales.len()])
            .and_then(|ridge| ridge.fit(&design, &targets))
            .map_err(model_error("Initial fit failed"))?;
        let initial_sigma = residual_scale(&design, &targets, &initial);

        let penalties = prior_scales
            .iter()
            .map(|scale| (initial_sigma.powi(2) / scale.powi(2)).max(MIN_PENALTY))
            .collect();
        let coefficients = RidgeRegression::new(penalties)
            .and_then(|ridge| ridge.fit(&design, &targets))
            .map_err(model_error("Model fit failed"))?;
        let sigma = residual_scale(&design, &targets, &coefficients);

        let deltas = &coefficients[2..trend.width()];
        let delta_scale = if deltas.is_empty() {
            0.0
        } else {
            deltas.iter().map(|d| d.abs()).sum::<f64>() / deltas.len() as f64
        };

        let mut history_dates = dates;
        history_dates.dedup();

        log!(
            self.config.log_level(),
            "Fitted {} on {} observations ({} to {}): {} changepoints, seasonality [{}], residual sigma {:.6}",
            self.name,
            values.len(),
            start,
            end,
            trend.changepoints().len(),
            seasonalities
                .iter()
                .map(|s| s.name)
                .collect::<Vec<_>>()
                .join(", "),
            sigma * y_scale
        );

        Ok(TrainedAdditiveModel {
            name: self.name.clone(),
            config: self.config.clone(),
            start,
            span_days: span_days as f64,
            y_scale,
            trend,
            seasonalities,
            coefficients,
            sigma,
            delta_scale,
            history_dates,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedAdditiveModel {
    /// Position of `date` on the scaled time axis
    fn scaled_time(&self, date: NaiveDate) -> f64 {
        (date - self.start).num_days() as f64 / self.span_days
    }

    /// Residual standard deviation in the units of the data
    pub fn residual_sigma(&self) -> f64 {
        self.sigma * self.y_scale
    }

    /// Trend changepoints as dates
    pub fn changepoint_dates(&self) -> Vec<NaiveDate> {
        self.trend
            .changepoints()
            .iter()
            .filter_map(|t| {
                let days = (t * self.span_days).round() as u64;
                self.start.checked_add_days(chrono::Days::new(days))
            })
            .collect()
    }

    /// Names of the fitted seasonal components
    pub fn seasonality_names(&self) -> Vec<&'static str> {
        self.seasonalities.iter().map(|s| s.name).collect()
    }

    /// Band of `estimate ± z * sigma` on the scaled axis
    fn analytic_intervals(&self, estimates: &[f64]) -> Result<Vec<(f64, f64)>> {
        let standard = Normal::new(0.0, 1.0).map_err(model_error("Cannot build normal distribution"))?;
        let z = standard.inverse_cdf(0.5 + self.config.interval_width / 2.0);
        let margin = z * self.sigma;

        Ok(estimates
            .iter()
            .map(|estimate| ((estimate - margin) * self.y_scale, (estimate + margin) * self.y_scale))
            .collect())
    }

    /// Band from simulated trend paths plus observation noise
    fn sampled_intervals(&self, estimates: &[f64], times: &[f64]) -> Result<Vec<(f64, f64)>> {
        let samples = self.config.uncertainty_samples;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let t_max = times.iter().copied().fold(1.0, f64::max);
        let noise = if self.sigma > 0.0 {
            Some(rand_distr::Normal::new(0.0, self.sigma).map_err(model_error("Invalid noise scale"))?)
        } else {
            None
        };

        let mut order: Vec<usize> = (0..times.len()).collect();
        order.sort_by(|a, b| times[*a].total_cmp(&times[*b]));
        let sorted_times: Vec<f64> = order.iter().map(|index| times[*index]).collect();

        let mut draws: Vec<Vec<f64>> = (0..times.len()).map(|_| Vec::with_capacity(samples)).collect();
        for _ in 0..samples {
            let changes = self.sample_trend_changes(&mut rng, t_max)?;
            let offsets = extra_offsets(&sorted_times, &changes);
            for (position, index) in order.iter().enumerate() {
                let jitter = match &noise {
                    Some(distribution) => distribution.sample(&mut rng),
                    None => 0.0,
                };
                draws[*index].push(estimates[*index] + offsets[position] + jitter);
            }
        }

        let lower_quantile = (1.0 - self.config.interval_width) / 2.0;
        let upper_quantile = (1.0 + self.config.interval_width) / 2.0;

        Ok(draws
            .into_iter()
            .map(|values| {
                let mut data = Data::new(values);
                (
                    data.quantile(lower_quantile) * self.y_scale,
                    data.quantile(upper_quantile) * self.y_scale,
                )
            })
            .collect())
    }

    /// Draw slope changes after the history, sorted by location
    ///
    /// Changes arrive as often per unit time as the history's changepoints
    /// did, with Laplace distributed magnitudes matching the fitted ones.
    fn sample_trend_changes<R: Rng>(&self, rng: &mut R, t_max: f64) -> Result<Vec<(f64, f64)>> {
        let horizon = t_max - 1.0;
        let rate = self.trend.changepoints().len() as f64 * horizon;
        if horizon <= 0.0 || rate <= 0.0 {
            return Ok(Vec::new());
        }

        let count = Poisson::new(rate)
            .map_err(model_error("Invalid changepoint rate"))?
            .sample(rng) as usize;
        let magnitude = Exp::new(1.0 / (self.delta_scale + DELTA_SCALE_FLOOR))
            .map_err(model_error("Invalid changepoint scale"))?;

        let mut changes = Vec::with_capacity(count);
        for _ in 0..count {
            let location = 1.0 + rng.gen::<f64>() * horizon;
            let size = magnitude.sample(rng);
            let delta = if rng.gen_bool(0.5) { size } else { -size };
            changes.push((location, delta));
        }
        changes.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(changes)
    }
}

impl TrainedForecastModel for TrainedAdditiveModel {
    fn future_dates(&self, periods: usize, include_history: bool) -> Vec<NaiveDate> {
        let mut dates = if include_history {
            self.history_dates.clone()
        } else {
            Vec::new()
        };
        if let Some(last) = self.history_dates.last() {
            dates.extend(utils::future_dates(*last, periods));
        }
        dates
    }

    fn predict(&self, dates: &[NaiveDate]) -> Result<ForecastResult> {
        let times: Vec<f64> = dates.iter().map(|date| self.scaled_time(*date)).collect();
        let estimates: Vec<f64> = dates
            .iter()
            .zip(&times)
            .map(|(date, t)| {
                let row = design_row(&self.trend, &self.seasonalities, *date, *t);
                dot(&row, &self.coefficients)
            })
            .collect();

        let intervals = if self.config.uncertainty_samples == 0 {
            self.analytic_intervals(&estimates)?
        } else {
            self.sampled_intervals(&estimates, &times)?
        };

        let values = estimates.iter().map(|estimate| estimate * self.y_scale).collect();
        ForecastResult::new(dates.to_vec(), values, intervals)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
