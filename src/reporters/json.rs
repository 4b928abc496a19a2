//! JSON reporter
//!
//! Pretty-printed JSON for analyses and batches, plus the persisted
//! evaluation summary.

use crate::eval::{AggregateMetrics, EvalReport};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the evaluation summary
pub const DEFAULT_SUMMARY_PATH: &str = "metrics_summary.json";

const SUMMARY_NOTES: &str =
    "Report the mean column in result tables; keep the ± std values for an appendix.";

/// Render any serializable value as pretty JSON
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Persisted evaluation summary: `(mean, std)` pairs per strategy.
///
/// Undefined AUC aggregates are written as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub lex: AggregateMetrics,
    pub ml: AggregateMetrics,
    pub hyb: AggregateMetrics,
    pub notes: String,
}

impl From<&EvalReport> for Summary {
    fn from(report: &EvalReport) -> Self {
        Self {
            lex: report.lex,
            ml: report.ml,
            hyb: report.hyb,
            notes: SUMMARY_NOTES.to_string(),
        }
    }
}

/// Write the summary of `report` to `path`
pub fn write_summary(report: &EvalReport, path: &Path) -> Result<()> {
    let content = render(&Summary::from(report))?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write summary to {}", path.display()))?;
    tracing::info!("Summary written to {}", path.display());
    Ok(())
}
