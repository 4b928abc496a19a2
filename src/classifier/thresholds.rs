//! Decision threshold tuning
//!
//! The ML strategy does not use a fixed 0.5 cut-off during evaluation: the
//! threshold maximizing F1 on the *training* fold is carried to the test fold.

use crate::eval::metrics::precision_recall_f1;

/// Threshold used when no candidate beats the sentinel
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Number of evenly spaced candidates in [0, 1]
pub const THRESHOLD_STEPS: usize = 101;

/// Best F1 threshold over `scores`.
///
/// Scans `i / 100` for `i in 0..=100`, labelling `score >= t` as positive,
/// and keeps the first threshold with strictly greater F1. Starts from
/// `(0.5, -1.0)` so a degenerate input still returns a usable threshold.
pub fn best_threshold_by_f1(y_true: &[u8], scores: &[f64]) -> (f64, f64) {
    let mut best = (DEFAULT_THRESHOLD, -1.0);
    let mut y_hat = vec![0u8; scores.len()];
    for i in 0..THRESHOLD_STEPS {
        let t = i as f64 / (THRESHOLD_STEPS - 1) as f64;
        for (pred, &s) in y_hat.iter_mut().zip(scores) {
            *pred = u8::from(s >= t);
        }
        let (_, _, f1) = precision_recall_f1(y_true, &y_hat);
        if f1 > best.1 {
            best = (t, f1);
        }
    }
    best
}

/// Apply a threshold to probabilities
pub fn apply_threshold(scores: &[f64], threshold: f64) -> Vec<u8> {
    scores.iter().map(|&s| u8::from(s >= threshold)).collect()
}
