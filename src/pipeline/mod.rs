//! Single-text analysis
//!
//! An [`Analyzer`] borrows the shared lexicon and an optional trained model
//! and turns one raw text into an [`Analysis`]:
//!
//! 1. normalize (lowercase, trim, expand abbreviations)
//! 2. score the normalized text with the model, if any
//! 3. test lexicon patterns against the normalized text
//! 4. run the three span detectors over the original text and merge
//! 5. label = model says 1, OR lexicon hit, OR any span

mod batch;

pub use batch::{analyze_batch, BatchItem, BatchReport, Chart, DEFAULT_BATCH_LIMIT};

use crate::classifier::TrainedModel;
use crate::detectors::{
    detect_all, AbbreviationDetector, AttributionDetector, DetectionInput, LexiconDetector,
    SpanDetector, DEFAULT_TOP_K,
};
use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::models::Analysis;
use crate::reporters::html::highlight;

/// Hybrid offensive-span analyzer
pub struct Analyzer<'a> {
    lexicon: &'a Lexicon,
    model: Option<&'a TrainedModel>,
    top_k: usize,
}

impl<'a> Analyzer<'a> {
    pub fn new(lexicon: &'a Lexicon, model: Option<&'a TrainedModel>) -> Self {
        Self {
            lexicon,
            model,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Number of model-attributed n-grams flagged per text
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.lexicon
    }

    /// Analyze one text.
    ///
    /// Fails only if the model rejects the vectorized text; a missing
    /// probability is reported as `None` instead.
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        let normalized = self.lexicon.normalize(text);

        let (model_label, probability_profane) = match self.model {
            Some(model) => (
                model.predict(&normalized)?,
                model
                    .predict_proba(&normalized)
                    .map(|p| (p * 10000.0).round() / 100.0),
            ),
            None => (0, None),
        };

        let is_profane_by_list = self.lexicon.matches_any(&normalized);

        let lexicon = LexiconDetector::new(self.lexicon);
        let abbrev = AbbreviationDetector::new(self.lexicon);
        let attribution = AttributionDetector::new(self.model, self.top_k);
        let detectors: [&dyn SpanDetector; 3] = [&lexicon, &abbrev, &attribution];
        let spans = detect_all(&detectors, &DetectionInput::new(text, &normalized));

        let prediction = u8::from(model_label == 1 || is_profane_by_list || !spans.is_empty());
        let highlighted_html = highlight(text, &spans);

        Ok(Analysis {
            normalized_text: normalized,
            prediction,
            probability_profane,
            is_profane_by_list,
            spans,
            highlighted_html,
        })
    }
}
