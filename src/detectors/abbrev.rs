//! Abbreviation detector

use super::{DetectionInput, SpanDetector};
use crate::lexicon::Lexicon;
use crate::models::{CharIndex, Source, Span};

/// Flags abbreviations whose expansion is offensive.
///
/// Entries with a harmless expansion only take part in normalization.
pub struct AbbreviationDetector<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> AbbreviationDetector<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }
}

impl SpanDetector for AbbreviationDetector<'_> {
    fn name(&self) -> &'static str {
        "abbreviation"
    }

    fn source(&self) -> Source {
        Source::Abbrev
    }

    fn detect(&self, input: &DetectionInput<'_>) -> Vec<Span> {
        if input.original.is_empty() {
            return vec![];
        }
        let index = CharIndex::new(input.original);
        self.lexicon
            .profane_abbreviations()
            .flat_map(|a| a.matcher().find_iter(input.original))
            .filter_map(|m| index.span_from_bytes(m.range(), self.source()))
            .collect()
    }
}
