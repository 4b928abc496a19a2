//! Analyze command - score a single text

use super::train::obtain_model;
use crate::config::ProjectConfig;
use crate::pipeline::Analyzer;
use crate::reporters::{render_analysis, OutputFormat};
use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;

/// Run the analyze command
pub fn run(config: &ProjectConfig, text: &str, model: Option<&Path>, format: &str) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    let lexicon = config.lexicon().context("Failed to compile lexicon")?;
    let model = obtain_model(config, &lexicon, model)?;

    let analyzer = Analyzer::new(&lexicon, Some(&model)).with_top_k(config.model.top_k);
    let analysis = analyzer.analyze(text).context("Analysis failed")?;
    print!("{}", render_analysis(text, &analysis, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
