//! Model-attribution detector
//!
//! Ranks the n-grams present in the normalized text by their contribution to
//! the positive-class score (TF-IDF weight times coefficient) and flags the
//! strongest ones where they occur in the original text.

use super::{DetectionInput, SpanDetector};
use crate::classifier::{Classifier, TfidfVectorizer, TrainedModel};
use crate::lexicon::pattern::literal_word_regex;
use crate::models::{CharIndex, Source, Span};

/// Number of n-grams flagged per text
pub const DEFAULT_TOP_K: usize = 3;

/// Strongest positive contributions, best first.
///
/// Returns `None` when the classifier exposes no coefficients. The result is
/// the longest prefix of the descending ranking with positive contribution,
/// capped at `top_k`.
pub fn top_contributions(
    vectorizer: &TfidfVectorizer,
    classifier: &dyn Classifier,
    normalized: &str,
    top_k: usize,
) -> Option<Vec<(String, f64)>> {
    let coef = classifier.coefficients()?;
    let mut contributions: Vec<(usize, f64)> = vectorizer
        .transform(normalized)
        .into_iter()
        .filter_map(|(idx, weight)| coef.get(idx).map(|c| (idx, weight * c)))
        .collect();
    contributions.sort_by(|a, b| b.1.total_cmp(&a.1));

    Some(
        contributions
            .into_iter()
            .take(top_k)
            .take_while(|(_, c)| *c > 0.0)
            .filter_map(|(idx, c)| Some((vectorizer.feature_name(idx)?.to_string(), c)))
            .collect(),
    )
}

/// Flags the top-k contributing n-grams of a fitted model
pub struct AttributionDetector<'a> {
    parts: Option<(&'a TfidfVectorizer, &'a dyn Classifier)>,
    top_k: usize,
}

impl<'a> AttributionDetector<'a> {
    /// Detector over a trained model; `None` disables it
    pub fn new(model: Option<&'a TrainedModel>, top_k: usize) -> Self {
        Self {
            parts: model.map(|m| (m.vectorizer(), m.classifier() as &dyn Classifier)),
            top_k,
        }
    }

    /// Detector over any vectorizer/classifier pair
    pub fn with_parts(
        vectorizer: &'a TfidfVectorizer,
        classifier: &'a dyn Classifier,
        top_k: usize,
    ) -> Self {
        Self {
            parts: Some((vectorizer, classifier)),
            top_k,
        }
    }
}

impl SpanDetector for AttributionDetector<'_> {
    fn name(&self) -> &'static str {
        "attribution"
    }

    fn source(&self) -> Source {
        Source::Ml
    }

    fn detect(&self, input: &DetectionInput<'_>) -> Vec<Span> {
        let Some((vectorizer, classifier)) = self.parts else {
            return vec![];
        };
        if input.original.is_empty() || input.normalized.is_empty() {
            return vec![];
        }
        let Some(tokens) = top_contributions(vectorizer, classifier, input.normalized, self.top_k)
        else {
            tracing::debug!("Classifier has no coefficients; skipping attribution");
            return vec![];
        };

        let index = CharIndex::new(input.original);
        let mut spans = Vec::new();
        for (token, _) in tokens {
            let Ok(re) = literal_word_regex(&token) else {
                continue;
            };
            spans.extend(
                re.find_iter(input.original)
                    .filter_map(|m| index.span_from_bytes(m.range(), self.source())),
            );
        }
        spans
    }
}
