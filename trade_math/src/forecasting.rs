//! Regression building blocks for forecasting models
//!
//! Contains a penalized (ridge) least squares solver. Forecasting models build
//! a design matrix out of trend and seasonal features and hand it here; each
//! coefficient carries its own penalty so that priors of different strength
//! can be expressed in a single solve.

use crate::{MathError, Result};

/// Ridge regression with a separate L2 penalty per coefficient
#[derive(Debug, Clone)]
pub struct RidgeRegression {
    penalties: Vec<f64>,
}

impl RidgeRegression {
    /// Create a new ridge regression, one penalty per feature column
    pub fn new(penalties: Vec<f64>) -> Result<Self> {
        if penalties.is_empty() {
            return Err(MathError::InvalidInput(
                "At least one feature is required".to_string(),
            ));
        }

        if let Some(bad) = penalties.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(MathError::InvalidInput(format!(
                "Penalties must be finite and non-negative, got {}",
                bad
            )));
        }

        Ok(Self { penalties })
    }

    /// Number of coefficients this regression solves for
    pub fn features(&self) -> usize {
        self.penalties.len()
    }

    /// Fit coefficients minimizing `|y - X b|^2 + sum(penalty_j * b_j^2)`
    pub fn fit(&self, design: &[Vec<f64>], targets: &[f64]) -> Result<Vec<f64>> {
        if design.len() != targets.len() {
            return Err(MathError::InvalidInput(format!(
                "Design rows ({}) doesn't match targets ({})",
                design.len(),
                targets.len()
            )));
        }

        if design.is_empty() {
            return Err(MathError::InsufficientData(
                "Not enough data for regression. Need at least 1 row.".to_string(),
            ));
        }

        let p = self.features();
        if let Some(row) = design.iter().find(|row| row.len() != p) {
            return Err(MathError::InvalidInput(format!(
                "Design row has {} columns, expected {}",
                row.len(),
                p
            )));
        }

        // Normal equations: (X'X + diag(penalties)) b = X'y
        let mut gram = vec![vec![0.0; p]; p];
        let mut moments = vec![0.0; p];
        for (row, &y) in design.iter().zip(targets) {
            for i in 0..p {
                let xi = row[i];
                if xi == 0.0 {
                    continue;
                }
                moments[i] += xi * y;
                for j in 0..=i {
                    gram[i][j] += xi * row[j];
                }
            }
        }

        for i in 0..p {
            gram[i][i] += self.penalties[i];
            for j in 0..i {
                gram[j][i] = gram[i][j];
            }
        }

        solve_cholesky(gram, moments)
    }
}

/// Solve `A x = b` for a symmetric positive definite `A`
pub fn solve_cholesky(matrix: Vec<Vec<f64>>, rhs: Vec<f64>) -> Result<Vec<f64>> {
    let n = rhs.len();
    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return Err(MathError::InvalidInput(format!(
            "Matrix must be {}x{} to match the right-hand side",
            n, n
        )));
    }

    // Lower triangular factor, A = L L'
    let mut lower = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let dot: f64 = (0..j).map(|k| lower[i][k] * lower[j][k]).sum();
            if i == j {
                let pivot = matrix[i][i] - dot;
                if !pivot.is_finite() || pivot <= 0.0 {
                    return Err(MathError::CalculationError(format!(
                        "Matrix is not positive definite (pivot {} at row {})",
                        pivot, i
                    )));
                }
                lower[i][i] = pivot.sqrt();
            } else {
                lower[i][j] = (matrix[i][j] - dot) / lower[j][j];
            }
        }
    }

    // Forward substitution: L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let dot: f64 = (0..i).map(|k| lower[i][k] * z[k]).sum();
        z[i] = (rhs[i] - dot) / lower[i][i];
    }

    // Back substitution: L' x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let dot: f64 = (i + 1..n).map(|k| lower[k][i] * x[k]).sum();
        x[i] = (z[i] - dot) / lower[i][i];
    }

    Ok(x)
}
