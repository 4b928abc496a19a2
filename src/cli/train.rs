//! Train command - fit the classifier and save it

use crate::classifier::{default_model_path, train, TrainedModel};
use crate::config::ProjectConfig;
use crate::dataset::{discover_training_data, seed_dataset, Dataset};
use crate::lexicon::Lexicon;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Load the dataset to train on and describe where it came from.
///
/// An explicit path must be readable. Otherwise the configured and default
/// training files are tried before falling back to the seed set.
pub(crate) fn training_dataset(
    config: &ProjectConfig,
    explicit: Option<&Path>,
) -> Result<(String, Dataset)> {
    if let Some(path) = explicit {
        let ds = Dataset::from_csv_path(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok((path.display().to_string(), ds));
    }
    match discover_training_data(&config.training_candidates(Path::new("."))) {
        Some((path, ds)) => Ok((path.display().to_string(), ds)),
        None => {
            tracing::info!("No training data found, using the built-in seed set");
            Ok(("built-in seed set".to_string(), seed_dataset()))
        }
    }
}

/// Load a saved model, or train one from the configured data
pub(crate) fn obtain_model(
    config: &ProjectConfig,
    lexicon: &Lexicon,
    model_path: Option<&Path>,
) -> Result<TrainedModel> {
    if let Some(path) = model_path {
        return TrainedModel::load(path)
            .with_context(|| format!("Failed to load model {}", path.display()));
    }
    let (source, dataset) = training_dataset(config, None)?;
    tracing::debug!("Training model on {}", source);
    train(&dataset, lexicon, &config.train_config())
        .with_context(|| format!("Failed to train on {}", source))
}

/// Run the train command
pub fn run(config: &ProjectConfig, data: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let lexicon = config.lexicon().context("Failed to compile lexicon")?;
    let (source, dataset) = training_dataset(config, data)?;

    println!(
        "{} Training on {} ({} rows)",
        style("•").cyan(),
        style(&source).bold(),
        dataset.len()
    );
    let model = train(&dataset, &lexicon, &config.train_config())
        .with_context(|| format!("Failed to train on {}", source))?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(default_model_path);
    model
        .save(&output)
        .with_context(|| format!("Failed to save model to {}", output.display()))?;

    println!(
        "{} Saved model with {} features to {}",
        style("✓").green(),
        model.vectorizer().feature_count(),
        style(output.display()).cyan()
    );
    Ok(())
}
