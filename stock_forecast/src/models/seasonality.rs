//! Fourier seasonality terms

use chrono::NaiveDate;
use std::f64::consts::PI;

/// Whether a seasonal component is fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonalityMode {
    /// Decide from the span and spacing of the history
    #[default]
    Auto,
    Enabled,
    Disabled,
}

/// A periodic component expressed as a Fourier series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seasonality {
    /// Component name used in logs
    pub name: &'static str,
    /// Period length in days
    pub period_days: f64,
    /// Number of sine/cosine pairs
    pub fourier_order: usize,
}

impl Seasonality {
    /// Yearly cycle
    pub const YEARLY: Seasonality = Seasonality {
        name: "yearly",
        period_days: 365.25,
        fourier_order: 10,
    };

    /// Weekly cycle
    pub const WEEKLY: Seasonality = Seasonality {
        name: "weekly",
        period_days: 7.0,
        fourier_order: 3,
    };

    /// Number of design columns this component adds
    pub fn width(&self) -> usize {
        2 * self.fourier_order
    }

    /// Append the Fourier terms for `date` to a design row
    pub fn extend_row(&self, date: NaiveDate, row: &mut Vec<f64>) {
        let day = days_since_epoch(date);
        for order in 1..=self.fourier_order {
            let angle = 2.0 * PI * order as f64 * day / self.period_days;
            row.push(angle.sin());
            row.push(angle.cos());
        }
    }
}

/// Days between 1970-01-01 and `date`
///
/// Phases are anchored to a fixed epoch so a given weekday or day of year
/// always maps to the same features, whatever the history window.
pub fn days_since_epoch(date: NaiveDate) -> f64 {
    (date - NaiveDate::default()).num_days() as f64
}
