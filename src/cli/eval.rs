//! Eval command - cross-validate the three strategies

use crate::config::ProjectConfig;
use crate::dataset::Dataset;
use crate::eval::{evaluate, EvalConfig};
use crate::reporters::{json, text};
use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

/// Resolved eval arguments
#[derive(Debug)]
pub struct EvalArgs {
    pub csv: PathBuf,
    pub text_col: String,
    pub label_col: String,
    pub spans_col: Option<String>,
    pub k: usize,
    pub summary: PathBuf,
}

/// Run the eval command
pub fn run(config: &ProjectConfig, args: EvalArgs) -> Result<()> {
    let lexicon = config.lexicon().context("Failed to compile lexicon")?;
    let dataset = Dataset::from_csv_path(&args.csv)
        .with_context(|| format!("Failed to read {}", args.csv.display()))?;

    let eval_config = EvalConfig {
        text_col: args.text_col,
        label_col: args.label_col,
        spans_col: args.spans_col,
        k: args.k,
        seed: config.eval.seed,
        top_k: config.model.top_k,
        train: config.train_config(),
    };
    let report = evaluate(&dataset, &lexicon, &eval_config)
        .with_context(|| format!("Evaluation of {} failed", args.csv.display()))?;

    print!("{}", text::render_eval(&report));
    json::write_summary(&report, &args.summary)?;
    println!(
        "\n{} Summary saved to {}",
        style("✓").green(),
        style(args.summary.display()).cyan()
    );
    Ok(())
}
