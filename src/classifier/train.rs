//! Training for the offensive-comment classifier
//!
//! Resolves text/label columns, normalizes every row through the lexicon's
//! abbreviation table and fits a fresh [`TrainedModel`].

use super::features::VectorizerConfig;
use super::model::LogisticConfig;
use super::TrainedModel;
use crate::dataset::{labeled_data, ColumnSelection, Dataset};
use crate::error::{Result, SpanflagError};
use crate::lexicon::Lexicon;
use std::path::PathBuf;

/// Training configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainConfig {
    pub vectorizer: VectorizerConfig,
    pub logistic: LogisticConfig,
}

/// Train a model on a dataset.
///
/// Labels come from the detected label column, or from lexicon matches when
/// the dataset has none.
pub fn train(dataset: &Dataset, lexicon: &Lexicon, config: &TrainConfig) -> Result<TrainedModel> {
    let data = labeled_data(dataset, &ColumnSelection::default(), lexicon)?;
    if data.is_empty() {
        return Err(SpanflagError::Configuration(
            "training dataset has no rows".into(),
        ));
    }
    let positives = data.labels.iter().filter(|&&y| y == 1).count();
    tracing::info!(
        "Loaded {} labeled examples ({} offensive, {} clean)",
        data.len(),
        positives,
        data.len() - positives
    );

    let normalized: Vec<String> = data.texts.iter().map(|t| lexicon.normalize(t)).collect();
    let model = TrainedModel::fit(&normalized, &data.labels, config)?;
    tracing::info!(
        "Trained model: {} features, C={}",
        model.vectorizer().feature_count(),
        config.logistic.c
    );
    Ok(model)
}

/// Where `spanflag train` saves the model unless told otherwise
pub fn default_model_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spanflag")
        .join("model.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::seed_dataset;

    #[test]
    fn test_train_on_seed_dataset() {
        let lex = Lexicon::builtin().unwrap();
        let model = train(&seed_dataset(), &lex, &TrainConfig::default()).unwrap();
        assert!(model.vectorizer().feature_count() > 20);
        assert_eq!(model.predict(&lex.normalize("đồ rác rưởi")).unwrap(), 1);
        let clean = lex.normalize("cả lớp làm khá tốt");
        assert_eq!(model.predict(&clean).unwrap(), 0);
    }

    #[test]
    fn test_train_uses_weak_labels_without_label_column() {
        let lex = Lexicon::builtin().unwrap();
        let ds = Dataset::from_columns(vec![(
            "comment",
            vec![
                "mày ngu quá".to_string(),
                "đồ điên".to_string(),
                "bài viết hay".to_string(),
                "cảm ơn bạn".to_string(),
            ],
        )]);
        let model = train(&ds, &lex, &TrainConfig::default()).unwrap();
        assert!(model.predict_proba("ngu").unwrap() > 0.5);
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let lex = Lexicon::builtin().unwrap();
        let ds = Dataset::from_columns(vec![("text", vec![])]);
        assert!(train(&ds, &lex, &TrainConfig::default()).is_err());
    }

    #[test]
    fn test_default_model_path() {
        assert!(default_model_path().ends_with("spanflag/model.json"));
    }
}
