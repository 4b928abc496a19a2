//! Binary classification metrics and fold aggregation

use serde::{Deserialize, Serialize};

/// Precision, recall, F1 and ROC AUC for one strategy on one fold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// NaN when the fold holds a single class
    pub auc: f64,
}

impl MetricSet {
    pub fn compute(y_true: &[u8], scores: &[f64], y_pred: &[u8]) -> Self {
        let (precision, recall, f1) = precision_recall_f1(y_true, y_pred);
        Self {
            precision,
            recall,
            f1,
            auc: roc_auc(y_true, scores),
        }
    }
}

/// Binary precision/recall/F1 for the positive class; zero on 0/0
pub fn precision_recall_f1(y_true: &[u8], y_pred: &[u8]) -> (f64, f64, f64) {
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    for (&t, &p) in y_true.iter().zip(y_pred) {
        match (t == 1, p == 1) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    (precision, recall, f1_score(precision, recall))
}

pub fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Area under the ROC curve (Mann-Whitney form, ties averaged).
///
/// Returns NaN when only one class is present.
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> f64 {
    let n = y_true.len().min(scores.len());
    let y_true = &y_true[..n];
    let n_pos = y_true.iter().filter(|&&y| y == 1).count();
    let n_neg = n - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return f64::NAN;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    // Average 1-based ranks across tied scores
    let mut ranks = vec![0.0f64; order.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg;
        }
        i = j + 1;
    }

    let pos_rank_sum: f64 = ranks
        .iter()
        .zip(y_true)
        .filter(|(_, &y)| y == 1)
        .map(|(r, _)| r)
        .sum();
    let n_pos = n_pos as f64;
    (pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg as f64)
}

/// Mean and population standard deviation
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Like [`mean_std`] but skipping NaN entries
pub fn nan_mean_std(values: &[f64]) -> (f64, f64) {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    mean_std(&finite)
}

/// Mean ± std of each metric across folds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub precision: (f64, f64),
    pub recall: (f64, f64),
    pub f1: (f64, f64),
    pub auc: (f64, f64),
}

impl AggregateMetrics {
    pub fn from_folds(folds: &[MetricSet]) -> Self {
        let collect = |f: fn(&MetricSet) -> f64| folds.iter().map(f).collect::<Vec<f64>>();
        Self {
            precision: mean_std(&collect(|m| m.precision)),
            recall: mean_std(&collect(|m| m.recall)),
            f1: mean_std(&collect(|m| m.f1)),
            auc: nan_mean_std(&collect(|m| m.auc)),
        }
    }
}
