//! Lexicon term detector

use super::{DetectionInput, SpanDetector};
use crate::lexicon::Lexicon;
use crate::models::{CharIndex, Source, Span};

/// Flags every match of every compiled lexicon term in the original text
pub struct LexiconDetector<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> LexiconDetector<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }
}

impl SpanDetector for LexiconDetector<'_> {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn source(&self) -> Source {
        Source::Lexicon
    }

    fn detect(&self, input: &DetectionInput<'_>) -> Vec<Span> {
        if input.original.is_empty() {
            return vec![];
        }
        let index = CharIndex::new(input.original);
        self.lexicon
            .patterns()
            .iter()
            .flat_map(|p| p.regex().find_iter(input.original))
            .filter_map(|m| index.span_from_bytes(m.range(), self.source()))
            .collect()
    }
}
