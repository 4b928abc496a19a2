//! Batch analysis with a per-request cap

use super::Analyzer;
use crate::models::Analysis;
use serde::{Deserialize, Serialize};

/// Maximum rows analyzed per batch unless configured otherwise
pub const DEFAULT_BATCH_LIMIT: usize = 200;

/// One analyzed row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub index: usize,
    pub text: String,
    #[serde(flatten)]
    pub analysis: Option<Analysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-row chart series
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chart {
    pub labels: Vec<String>,
    /// Percent in [0, 100]
    pub probabilities: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub chart: Chart,
}

impl BatchReport {
    pub fn flagged(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.analysis.as_ref().is_some_and(|a| a.prediction == 1))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| i.error.is_some()).count()
    }
}

/// Analyze up to `limit` texts in order.
///
/// Rows past the limit are dropped. A row that fails is reported with its
/// error and charted as 0; the rest of the batch still runs.
pub fn analyze_batch<S: AsRef<str>>(
    analyzer: &Analyzer<'_>,
    texts: &[S],
    limit: usize,
) -> BatchReport {
    if texts.len() > limit {
        tracing::info!("Batch truncated to {} of {} rows", limit, texts.len());
    }

    let mut report = BatchReport::default();
    for (index, text) in texts.iter().take(limit).enumerate() {
        let text = text.as_ref();
        let (analysis, error, probability) = match analyzer.analyze(text) {
            Ok(a) => {
                let p = a.chart_probability();
                (Some(a), None, p)
            }
            Err(e) => {
                tracing::warn!("Row {} failed: {}", index + 1, e);
                (None, Some(e.to_string()), 0.0)
            }
        };
        report.chart.labels.push(format!("#{}", index + 1));
        report.chart.probabilities.push(probability);
        report.items.push(BatchItem {
            index,
            text: text.to_string(),
            analysis,
            error,
        });
    }
    report
}
