//! Moving average calculations
//!
//! Contains the centered moving average used to smooth both price histories
//! and forecast bands. Near the edges of a series the window shrinks to the
//! points that exist, so the output is always as long as the input.

use crate::{MathError, Result};

/// Centered moving average with a fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenteredMovingAverage {
    window: usize,
}

impl CenteredMovingAverage {
    /// Create a new centered moving average with the specified window
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(MathError::InvalidInput(
                "Window must be greater than zero".to_string(),
            ));
        }

        Ok(Self { window })
    }

    /// Get the configured window
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of points taken before and after the center
    ///
    /// Even windows lean one point towards the past, the same alignment a
    /// centered rolling window uses in most dataframe libraries.
    fn reach(&self) -> (usize, usize) {
        (self.window / 2, (self.window - 1) / 2)
    }

    /// Smooth a series, producing one value per input point
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        if values.is_empty() {
            return Vec::new();
        }

        // prefix[i] holds the sum of values[..i]
        let mut prefix = Vec::with_capacity(values.len() + 1);
        prefix.push(0.0);
        for value in values {
            let last = prefix[prefix.len() - 1];
            prefix.push(last + value);
        }

        let (before, after) = self.reach();
        let last_index = values.len() - 1;

        (0..values.len())
            .map(|i| {
                let start = i.saturating_sub(before);
                let end = (i + after).min(last_index);
                let count = end - start + 1;
                if count == 1 {
                    values[i]
                } else {
                    (prefix[end + 1] - prefix[start]) / count as f64
                }
            })
            .collect()
    }
}

/// Smooth `values` with a centered moving average of width `window`
pub fn centered_moving_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    Ok(CenteredMovingAverage::new(window)?.apply(values))
}
