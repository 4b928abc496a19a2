//! Term -> regex compilation
//!
//! A term is matched case-insensitively and anchored on word boundaries.
//! `*` swallows zero or more word characters or dots (so `đ*m` catches
//! `đ.m`, `đmm`, `đồm`), and any whitespace run matches `\s+`.

use crate::error::{Result, SpanflagError};
use regex::Regex;

/// Wildcard character accepted in lexicon terms
pub const WILDCARD: char = '*';

/// A lexicon term together with its compiled matcher
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    term: String,
    regex: Regex,
}

impl CompiledPattern {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Translate a term into regex source (without compiling it)
pub fn term_to_regex(term: &str) -> String {
    let mut out = String::from(r"(?i)\b");
    let mut in_space = false;
    for ch in term.trim().chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push_str(r"\s+");
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch == WILDCARD {
            out.push_str(r"[\w\.]*");
        } else {
            let mut buf = [0u8; 4];
            out.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }
    out.push_str(r"\b");
    out
}

/// Compile a lexicon term.
///
/// Terms without any literal character would match at every word boundary,
/// so they are rejected here instead of at match time.
pub fn compile_term(term: &str) -> Result<CompiledPattern> {
    let has_literal = term
        .chars()
        .any(|c| !c.is_whitespace() && c != WILDCARD);
    if !has_literal {
        return Err(SpanflagError::MalformedTerm {
            term: term.to_string(),
            reason: "term has no literal characters".into(),
        });
    }

    let regex = Regex::new(&term_to_regex(term)).map_err(|e| SpanflagError::MalformedTerm {
        term: term.to_string(),
        reason: e.to_string(),
    })?;

    Ok(CompiledPattern {
        term: term.to_string(),
        regex,
    })
}

/// Word-boundary, case-insensitive matcher for a literal token
pub(crate) fn literal_word_regex(token: &str) -> Result<Regex> {
    if token.trim().is_empty() {
        return Err(SpanflagError::MalformedTerm {
            term: token.to_string(),
            reason: "empty token".into(),
        });
    }
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(token))).map_err(|e| {
        SpanflagError::MalformedTerm {
            term: token.to_string(),
            reason: e.to_string(),
        }
    })
}
