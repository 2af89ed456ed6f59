//! Forecast horizons
//!
//! Maps the period labels the web client sends (`"1 week"`, `"1 month"`, ...)
//! to a number of calendar days. Matching is exact and case-sensitive; any
//! other label falls back to [`DEFAULT_HORIZON_DAYS`] without an error.

use log::debug;

/// Days forecast when the period label is not recognised
pub const DEFAULT_HORIZON_DAYS: usize = 30;

/// Supported forecast periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastPeriod {
    OneWeek,
    OneMonth,
    ThreeMonths,
    OneYear,
    FiveYears,
}

impl ForecastPeriod {
    /// Every period, shortest first
    pub const ALL: [ForecastPeriod; 5] = [
        ForecastPeriod::OneWeek,
        ForecastPeriod::OneMonth,
        ForecastPeriod::ThreeMonths,
        ForecastPeriod::OneYear,
        ForecastPeriod::FiveYears,
    ];

    /// Parse an exact period label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "1 week" => Some(ForecastPeriod::OneWeek),
            "1 month" => Some(ForecastPeriod::OneMonth),
            "3 months" => Some(ForecastPeriod::ThreeMonths),
            "1 year" => Some(ForecastPeriod::OneYear),
            "5 years" => Some(ForecastPeriod::FiveYears),
            _ => None,
        }
    }

    /// Map a chart range keyword to its forecast period
    ///
    /// Chart ranges are the values the stock page sends (`week`, `month`,
    /// `quarter`, `1 year`, `5 years`); anything else forecasts one week.
    pub fn from_chart_range(range: &str) -> Self {
        match range {
            "5 years" => ForecastPeriod::FiveYears,
            "1 year" => ForecastPeriod::OneYear,
            "quarter" => ForecastPeriod::ThreeMonths,
            "month" => ForecastPeriod::OneMonth,
            _ => ForecastPeriod::OneWeek,
        }
    }

    /// Canonical label
    pub fn label(&self) -> &'static str {
        match self {
            ForecastPeriod::OneWeek => "1 week",
            ForecastPeriod::OneMonth => "1 month",
            ForecastPeriod::ThreeMonths => "3 months",
            ForecastPeriod::OneYear => "1 year",
            ForecastPeriod::FiveYears => "5 years",
        }
    }

    /// Number of calendar days covered
    pub fn days(&self) -> usize {
        match self {
            ForecastPeriod::OneWeek => 7,
            ForecastPeriod::OneMonth => 30,
            ForecastPeriod::ThreeMonths => 90,
            ForecastPeriod::OneYear => 365,
            ForecastPeriod::FiveYears => 1825,
        }
    }
}

/// Number of days to forecast for a period label
pub fn days_for_period(label: &str) -> usize {
    match ForecastPeriod::from_label(label) {
        Some(period) => period.days(),
        None => {
            debug!(
                "Unknown period label {:?}, forecasting {} days",
                label, DEFAULT_HORIZON_DAYS
            );
            DEFAULT_HORIZON_DAYS
        }
    }
}
