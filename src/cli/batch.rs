//! Batch command - analyze many texts from a file

use super::train::obtain_model;
use crate::config::ProjectConfig;
use crate::dataset::{detect_columns, Dataset};
use crate::pipeline::{analyze_batch, Analyzer};
use crate::reporters::{json, text};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Texts from a .txt (non-empty lines) or .csv (one column) file
fn read_texts(file: &Path, text_col: Option<&str>) -> Result<Vec<String>> {
    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => {
            let bytes = std::fs::read(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let content = String::from_utf8_lossy(&bytes);
            Ok(content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect())
        }
        "csv" => {
            let dataset = Dataset::from_csv_path(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let column = match text_col {
                Some(col) => col.to_string(),
                None => detect_columns(&dataset.schema())?.text,
            };
            tracing::debug!("Reading texts from column '{}'", column);
            Ok(dataset
                .column(&column)?
                .into_iter()
                .map(String::from)
                .collect())
        }
        other => bail!(
            "Unsupported file type '{}' for {}. Use .txt or .csv",
            other,
            file.display()
        ),
    }
}

/// Run the batch command
pub fn run(
    config: &ProjectConfig,
    file: &Path,
    limit: usize,
    text_col: Option<&str>,
    model: Option<&Path>,
) -> Result<()> {
    let texts = read_texts(file, text_col)?;
    let lexicon = config.lexicon().context("Failed to compile lexicon")?;
    let model = obtain_model(config, &lexicon, model)?;

    let analyzer = Analyzer::new(&lexicon, Some(&model)).with_top_k(config.model.top_k);
    let report = analyze_batch(&analyzer, &texts, limit);

    println!("{}", json::render(&report)?);
    eprintln!("{}", text::render_batch_summary(&report));
    Ok(())
}
