//! Lexicon and abbreviation tables
//!
//! A [`Lexicon`] is built once at startup and shared read-only by every
//! detector, the normalizer and the weak labeler.

mod defaults;
pub mod pattern;

pub use defaults::{DEFAULT_ABBREVIATIONS, DEFAULT_TERMS};
pub use pattern::{compile_term, term_to_regex, CompiledPattern, WILDCARD};

use crate::error::Result;
use regex::{NoExpand, Regex};

/// A short token with its expansion
#[derive(Debug, Clone)]
pub struct Abbreviation {
    short: String,
    expansion: String,
    matcher: Regex,
    /// Whether the expansion matches any lexicon pattern
    profane: bool,
}

impl Abbreviation {
    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn expansion(&self) -> &str {
        &self.expansion
    }

    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    pub fn is_profane(&self) -> bool {
        self.profane
    }
}

/// Compiled lexicon terms plus the ordered abbreviation table
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    patterns: Vec<CompiledPattern>,
    abbreviations: Vec<Abbreviation>,
}

impl Lexicon {
    /// Compile terms and abbreviations. Fails on the first malformed entry.
    pub fn new<T, A, B>(terms: &[T], abbreviations: &[(A, B)]) -> Result<Self>
    where
        T: AsRef<str>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let patterns = terms
            .iter()
            .map(|t| compile_term(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut compiled = Vec::with_capacity(abbreviations.len());
        for (short, expansion) in abbreviations {
            let expansion = expansion.as_ref().to_string();
            let profane = patterns.iter().any(|p| p.is_match(&expansion));
            compiled.push(Abbreviation {
                short: short.as_ref().to_string(),
                matcher: pattern::literal_word_regex(short.as_ref())?,
                expansion,
                profane,
            });
        }

        tracing::debug!(
            "Compiled lexicon: {} terms, {} abbreviations ({} profane)",
            patterns.len(),
            compiled.len(),
            compiled.iter().filter(|a| a.profane).count()
        );

        Ok(Self {
            patterns,
            abbreviations: compiled,
        })
    }

    /// The built-in Vietnamese tables
    pub fn builtin() -> Result<Self> {
        Self::new(DEFAULT_TERMS, DEFAULT_ABBREVIATIONS)
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn abbreviations(&self) -> &[Abbreviation] {
        &self.abbreviations
    }

    /// Entries whose expansion is itself offensive
    pub fn profane_abbreviations(&self) -> impl Iterator<Item = &Abbreviation> {
        self.abbreviations.iter().filter(|a| a.profane)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.abbreviations.is_empty()
    }

    /// Does any lexicon pattern occur in `text`?
    pub fn matches_any(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }

    /// Lowercase, trim, then expand abbreviations in table order
    pub fn normalize(&self, text: &str) -> String {
        let mut out = text.to_lowercase().trim().to_string();
        for abbr in &self.abbreviations {
            out = abbr
                .matcher
                .replace_all(&out, NoExpand(&abbr.expansion))
                .into_owned();
        }
        out
    }
}
