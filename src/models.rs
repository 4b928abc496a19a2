//! Core data models for spanflag
//!
//! Spans are half-open ranges of *character* offsets into the original,
//! unnormalized text. Regex matches report byte offsets, so every detector
//! goes through [`CharIndex`] before building a [`Span`].

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which detector produced a span
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Abbrev,
    Lexicon,
    Ml,
}

impl Source {
    const ALL: [Source; 3] = [Source::Abbrev, Source::Lexicon, Source::Ml];

    fn bit(self) -> u8 {
        match self {
            Source::Abbrev => 0b001,
            Source::Lexicon => 0b010,
            Source::Ml => 0b100,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Abbrev => write!(f, "abbrev"),
            Source::Lexicon => write!(f, "lexicon"),
            Source::Ml => write!(f, "ml"),
        }
    }
}

/// Immutable set of [`Source`]s attached to a span.
///
/// Serializes as a sorted list, e.g. `["abbrev", "lexicon"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Source>", into = "Vec<Source>")]
pub struct Provenance(u8);

impl Provenance {
    pub fn single(source: Source) -> Self {
        Self(source.bit())
    }

    /// New set containing both operands
    pub fn union(self, other: Provenance) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(&self, source: Source) -> bool {
        self.0 & source.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in sorted order
    pub fn iter(&self) -> impl Iterator<Item = Source> + '_ {
        Source::ALL.into_iter().filter(|s| self.contains(*s))
    }

    pub fn to_vec(&self) -> Vec<Source> {
        self.iter().collect()
    }
}

impl From<Vec<Source>> for Provenance {
    fn from(sources: Vec<Source>) -> Self {
        sources.into_iter().fold(Provenance::default(), |acc, s| {
            acc.union(Provenance::single(s))
        })
    }
}

impl From<Provenance> for Vec<Source> {
    fn from(p: Provenance) -> Self {
        p.to_vec()
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// A flagged character range in the original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub source: Provenance,
}

impl Span {
    pub fn new(start: usize, end: usize, text: impl Into<String>, source: Provenance) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            source,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Byte <-> character offset mapping for one string.
///
/// `starts[i]` is the byte offset of the i-th character; the final entry is
/// the string length so that `char_len()` is a valid end offset.
#[derive(Debug, Clone)]
pub struct CharIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        starts.push(text.len());
        Self { text, starts }
    }

    /// Number of characters in the text
    pub fn char_len(&self) -> usize {
        self.starts.len() - 1
    }

    /// Character offset of a byte offset that lies on a char boundary
    pub fn char_offset(&self, byte: usize) -> usize {
        self.starts.partition_point(|&b| b < byte)
    }

    /// Substring between two character offsets (clamped to the text)
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let end = end.min(self.char_len());
        let start = start.min(end);
        &self.text[self.starts[start]..self.starts[end]]
    }

    /// Build a single-source span from a regex match's byte range
    pub fn span_from_bytes(&self, bytes: Range<usize>, source: Source) -> Option<Span> {
        let start = self.char_offset(bytes.start);
        let end = self.char_offset(bytes.end);
        if start >= end {
            return None;
        }
        Some(Span::new(
            start,
            end,
            &self.text[bytes],
            Provenance::single(source),
        ))
    }
}

/// Result of analyzing one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub normalized_text: String,
    /// Final hybrid label (0 or 1)
    pub prediction: u8,
    /// Positive-class probability in percent, rounded to 2 decimals
    pub probability_profane: Option<f64>,
    pub is_profane_by_list: bool,
    pub spans: Vec<Span>,
    pub highlighted_html: String,
}

impl Analysis {
    /// Value plotted in chart series: the probability, or 0/100 from the label
    pub fn chart_probability(&self) -> f64 {
        match self.probability_profane {
            Some(p) => p,
            None if self.prediction == 1 => 100.0,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_union_is_sorted() {
        let p = Provenance::single(Source::Ml)
            .union(Provenance::single(Source::Abbrev))
            .union(Provenance::single(Source::Ml));
        assert_eq!(p.to_vec(), vec![Source::Abbrev, Source::Ml]);
        assert_eq!(p.to_string(), "abbrev, ml");
    }

    #[test]
    fn test_provenance_serializes_as_list() {
        let p = Provenance::single(Source::Lexicon).union(Provenance::single(Source::Abbrev));
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"["abbrev","lexicon"]"#);
        let back: Provenance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_char_index_multibyte() {
        let text = "mày ngu quá";
        let idx = CharIndex::new(text);
        assert_eq!(idx.char_len(), 11);
        let byte_start = text.find("ngu").unwrap();
        assert_eq!(idx.char_offset(byte_start), 4);
        assert_eq!(idx.slice(4, 7), "ngu");
        assert_eq!(idx.slice(8, 100), "quá");
    }

    #[test]
    fn test_chart_probability_fallback() {
        let mut a = Analysis {
            normalized_text: String::new(),
            prediction: 1,
            probability_profane: None,
            is_profane_by_list: false,
            spans: vec![],
            highlighted_html: String::new(),
        };
        assert_eq!(a.chart_probability(), 100.0);
        a.prediction = 0;
        assert_eq!(a.chart_probability(), 0.0);
        a.probability_profane = Some(12.5);
        assert_eq!(a.chart_probability(), 12.5);
    }
}
