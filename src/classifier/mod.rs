//! Offensive-comment classifier
//!
//! Architecture: normalized text → TF-IDF (1-2 grams) → logistic regression.
//!
//! A [`TrainedModel`] is immutable once fitted. Training always produces a
//! new value, so folds and reloads never share vocabulary or coefficients.

mod features;
pub mod model;
pub mod thresholds;
pub mod train;

pub use features::{tokenize, SparseVector, TfidfVectorizer, VectorizerConfig};
pub use model::{sigmoid, Classifier, LogisticConfig, LogisticRegression};
pub use thresholds::{apply_threshold, best_threshold_by_f1, DEFAULT_THRESHOLD};
pub use train::{default_model_path, train, TrainConfig};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fitted vectorizer and linear classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
}

impl TrainedModel {
    /// Fit on already-normalized documents
    pub fn fit<S: AsRef<str>>(docs: &[S], labels: &[u8], config: &TrainConfig) -> Result<Self> {
        let vectorizer = TfidfVectorizer::fit(docs, config.vectorizer)?;
        let rows = vectorizer.transform_all(docs);
        let classifier = LogisticRegression::fit(
            &rows,
            labels,
            vectorizer.feature_count(),
            &config.logistic,
        )?;
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    pub fn transform(&self, normalized: &str) -> SparseVector {
        self.vectorizer.transform(normalized)
    }

    pub fn predict(&self, normalized: &str) -> Result<u8> {
        self.classifier.predict(&self.transform(normalized))
    }

    /// Positive-class probability; `None` if the model cannot score the text
    pub fn predict_proba(&self, normalized: &str) -> Option<f64> {
        self.classifier.predict_proba(&self.transform(normalized))
    }

    /// Load model from JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save model to JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> (Vec<&'static str>, Vec<u8>) {
        (
            vec!["mày ngu quá", "đồ ngu", "bạn giỏi quá", "cố gắng lên bạn"],
            vec![1, 1, 0, 0],
        )
    }

    #[test]
    fn test_fit_and_predict() {
        let (d, y) = docs();
        let model = TrainedModel::fit(&d, &y, &TrainConfig::default()).unwrap();
        assert_eq!(model.predict("thằng ngu").unwrap(), 1);
        assert_eq!(model.predict("bạn cố gắng").unwrap(), 0);
        let p = model.predict_proba("thằng ngu").unwrap();
        assert!(p > 0.5);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (d, y) = docs();
        let model = TrainedModel::fit(&d, &y, &TrainConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");
        model.save(&path).unwrap();
        let loaded = TrainedModel::load(&path).unwrap();
        let a = loaded.predict_proba("mày ngu").unwrap();
        let b = model.predict_proba("mày ngu").unwrap();
        assert!((a - b).abs() < 1e-9);
        assert_eq!(
            loaded.vectorizer().feature_count(),
            model.vectorizer().feature_count()
        );
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = TrainedModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, crate::error::SpanflagError::Io(_)));
    }
}
