//! Piecewise linear trend

/// Linear trend whose slope may change at fixed changepoints
///
/// Times are on the model's scaled axis, where the history runs from 0 to 1.
/// The design row for time `t` is `[1, t, (t - c_1)+, ..., (t - c_k)+]`, so the
/// coefficients are the intercept, the initial slope and one slope change
/// per changepoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinearTrend {
    changepoints: Vec<f64>,
}

impl PiecewiseLinearTrend {
    /// Place up to `n_changepoints` changepoints over the first `range` share
    /// of the (sorted) observation times
    pub fn fit_changepoints(times: &[f64], n_changepoints: usize, range: f64) -> Self {
        let history = (times.len() as f64 * range).floor() as usize;
        let count = n_changepoints.min(history.saturating_sub(1));
        if count == 0 {
            return Self::with_changepoints(Vec::new());
        }

        // Evenly spaced row indices over [0, history - 1], first one dropped
        let last = (history - 1) as f64;
        let changepoints = (1..=count)
            .map(|i| {
                let index = (last * i as f64 / count as f64).round_ties_even() as usize;
                times[index.min(times.len() - 1)]
            })
            .collect();

        Self::with_changepoints(changepoints)
    }

    /// Build a trend from explicit changepoints
    pub fn with_changepoints(mut changepoints: Vec<f64>) -> Self {
        changepoints.sort_by(f64::total_cmp);
        changepoints.dedup();
        Self { changepoints }
    }

    /// Changepoint locations
    pub fn changepoints(&self) -> &[f64] {
        &self.changepoints
    }

    /// Number of design columns this component adds
    pub fn width(&self) -> usize {
        2 + self.changepoints.len()
    }

    /// Append the trend features for time `t` to a design row
    pub fn extend_row(&self, t: f64, row: &mut Vec<f64>) {
        row.push(1.0);
        row.push(t);
        row.extend(self.changepoints.iter().map(|c| (t - c).max(0.0)));
    }
}

/// Trend offsets produced by extra slope changes, one per time in `times`
///
/// `times` must be ascending and `changes` (`(location, delta)` pairs) sorted
/// by location. A change only affects times strictly after its location.
pub fn extra_offsets(times: &[f64], changes: &[(f64, f64)]) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(times.len());
    let mut slope = 0.0;
    let mut intercept = 0.0;
    let mut next = 0;

    for &t in times {
        while next < changes.len() && changes[next].0 < t {
            let (location, delta) = changes[next];
            slope += delta;
            intercept += delta * location;
            next += 1;
        }
        offsets.push(slope * t - intercept);
    }

    offsets
}
