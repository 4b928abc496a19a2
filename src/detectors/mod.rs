//! Span detectors
//!
//! Three independent strategies each produce raw, single-source spans over
//! the original text. [`merge_spans`] folds them into the final disjoint set.
//!
//! ```text
//!   original ──┬─> LexiconDetector      ─┐
//!              ├─> AbbreviationDetector ─┼─> merge_spans ─> Vec<Span>
//!   normalized ┴─> AttributionDetector  ─┘
//! ```

mod abbrev;
mod attribution;
mod lexicon;
mod merge;

pub use abbrev::AbbreviationDetector;
pub use attribution::{top_contributions, AttributionDetector, DEFAULT_TOP_K};
pub use lexicon::LexiconDetector;
pub use merge::merge_spans;

use crate::models::{Source, Span};

/// Text handed to every detector
#[derive(Debug, Clone, Copy)]
pub struct DetectionInput<'a> {
    /// Text exactly as received; span offsets refer to this
    pub original: &'a str,
    /// Lowercased, abbreviation-expanded form
    pub normalized: &'a str,
}

impl<'a> DetectionInput<'a> {
    pub fn new(original: &'a str, normalized: &'a str) -> Self {
        Self {
            original,
            normalized,
        }
    }
}

/// Trait for all span detectors
///
/// Detectors never fail: degenerate inputs (empty text, empty tables,
/// missing model) yield an empty list.
pub trait SpanDetector {
    /// Unique identifier for this detector
    fn name(&self) -> &'static str;

    /// Provenance tag attached to every span this detector emits
    fn source(&self) -> Source;

    /// Raw, unmerged spans over `input.original`
    fn detect(&self, input: &DetectionInput<'_>) -> Vec<Span>;
}

/// Run every detector and merge their output
pub fn detect_all(detectors: &[&dyn SpanDetector], input: &DetectionInput<'_>) -> Vec<Span> {
    let mut raw = Vec::new();
    for detector in detectors {
        let spans = detector.detect(input);
        tracing::trace!("{} produced {} raw spans", detector.name(), spans.len());
        raw.extend(spans);
    }
    merge_spans(raw, input.original)
}
