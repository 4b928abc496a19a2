//! Linear classifier over TF-IDF rows
//!
//! L2-regularized logistic regression with intercept, fit by full-batch
//! gradient descent from zero weights (so fits are deterministic).

use super::features::SparseVector;
use crate::error::{Result, SpanflagError};
use serde::{Deserialize, Serialize};

/// Anything that can label a TF-IDF row
pub trait Classifier {
    /// Hard 0/1 label
    fn predict(&self, x: &SparseVector) -> Result<u8>;

    /// Probability of the positive class, if the model can produce one
    fn predict_proba(&self, x: &SparseVector) -> Option<f64>;

    /// Per-feature weights for the positive class. Models without a linear
    /// surface return `None`, which disables span attribution.
    fn coefficients(&self) -> Option<&[f64]> {
        None
    }
}

/// Optimizer settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogisticConfig {
    /// Inverse regularization strength
    pub c: f64,
    pub max_iter: usize,
    /// Stop when the gradient's max-norm drops below this
    pub tol: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-6,
        }
    }
}

/// Binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn with_weights(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    /// Fit on `rows` with 0/1 `labels`.
    ///
    /// Minimizes `mean(log_loss) + ||w||^2 / (2 C n)`. The step size is the
    /// inverse Lipschitz bound of that objective.
    pub fn fit(
        rows: &[SparseVector],
        labels: &[u8],
        n_features: usize,
        config: &LogisticConfig,
    ) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(SpanflagError::ShapeMismatch {
                expected: rows.len(),
                found: labels.len(),
            });
        }
        let mut model = Self::with_weights(vec![0.0; n_features], 0.0);
        if rows.is_empty() {
            return Ok(model);
        }
        for row in rows {
            model.check_row(row)?;
        }

        let n = rows.len() as f64;
        let reg = 1.0 / (config.c * n);
        let max_sq_norm = rows
            .iter()
            .map(|r| r.iter().map(|(_, v)| v * v).sum::<f64>() + 1.0)
            .fold(0.0f64, f64::max);
        let step = 1.0 / (0.25 * max_sq_norm + reg);

        let mut grad_w = vec![0.0f64; n_features];
        for iter in 0..config.max_iter {
            grad_w.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_b = 0.0;
            for (row, &y) in rows.iter().zip(labels) {
                let err = sigmoid(model.decision(row)) - y as f64;
                for &(j, v) in row {
                    grad_w[j] += err * v;
                }
                grad_b += err;
            }

            let mut max_grad = (grad_b / n).abs();
            for (w, g) in model.weights.iter_mut().zip(grad_w.iter_mut()) {
                *g = *g / n + reg * *w;
                max_grad = max_grad.max(g.abs());
            }
            if max_grad < config.tol {
                tracing::debug!("Logistic regression converged after {} iterations", iter);
                break;
            }

            for (w, g) in model.weights.iter_mut().zip(&grad_w) {
                *w -= step * g;
            }
            model.intercept -= step * grad_b / n;
        }

        Ok(model)
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Raw linear score `w·x + b`; assumes a checked row
    fn decision(&self, x: &SparseVector) -> f64 {
        x.iter().map(|&(j, v)| self.weights[j] * v).sum::<f64>() + self.intercept
    }

    fn check_row(&self, x: &SparseVector) -> Result<()> {
        match x.iter().find(|(j, _)| *j >= self.weights.len()) {
            Some(&(j, _)) => Err(SpanflagError::ShapeMismatch {
                expected: self.weights.len(),
                found: j,
            }),
            None => Ok(()),
        }
    }

    /// Checked linear score
    pub fn decision_function(&self, x: &SparseVector) -> Result<f64> {
        self.check_row(x)?;
        Ok(self.decision(x))
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, x: &SparseVector) -> Result<u8> {
        Ok(u8::from(self.decision_function(x)? > 0.0))
    }

    fn predict_proba(&self, x: &SparseVector) -> Option<f64> {
        let score = self.decision_function(x).ok()?;
        let p = sigmoid(score);
        p.is_finite().then_some(p)
    }

    fn coefficients(&self) -> Option<&[f64]> {
        Some(&self.weights)
    }
}

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
