//! TF-IDF feature extraction
//!
//! Bag of word 1- and 2-grams over tokens of two or more word characters.
//! Document frequencies above `max_df * n_docs` are pruned, IDF is smoothed
//! (`ln((1 + n) / (1 + df)) + 1`) and each row is L2-normalized.

use crate::error::{Result, SpanflagError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Sparse row: `(feature index, weight)` sorted by index
pub type SparseVector = Vec<(usize, f64)>;

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid regex"))
}

/// Vectorizer settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VectorizerConfig {
    pub min_n: usize,
    pub max_n: usize,
    /// Terms appearing in more than this fraction of documents are dropped
    pub max_df: f64,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_n: 1,
            max_n: 2,
            max_df: 0.95,
        }
    }
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: HashMap<String, usize>,
    /// Feature names indexed by column (alphabetical)
    feature_names: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF weights from a corpus
    pub fn fit<S: AsRef<str>>(docs: &[S], config: VectorizerConfig) -> Result<Self> {
        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let mut terms = ngrams(doc.as_ref(), &config);
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = docs.len();
        let max_doc_count = config.max_df * n_docs as f64;
        let kept: Vec<(String, usize)> = df
            .into_iter()
            .filter(|(_, count)| (*count as f64) <= max_doc_count)
            .collect();
        if kept.is_empty() {
            return Err(SpanflagError::EmptyVocabulary);
        }

        let n = n_docs as f64;
        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut feature_names = Vec::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (i, (term, count)) in kept.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + count as f64)).ln() + 1.0);
            vocabulary.insert(term.clone(), i);
            feature_names.push(term);
        }

        Ok(Self {
            config,
            vocabulary,
            feature_names,
            idf,
        })
    }

    /// TF-IDF row for one document. Unknown terms are ignored.
    pub fn transform(&self, doc: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in ngrams(doc, &self.config) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in row.iter_mut() {
                *v /= norm;
            }
        }
        row
    }

    pub fn transform_all<S: AsRef<str>>(&self, docs: &[S]) -> Vec<SparseVector> {
        docs.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    pub fn feature_name(&self, idx: usize) -> Option<&str> {
        self.feature_names.get(idx).map(String::as_str)
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }
}

/// Word tokens of a document
pub fn tokenize(doc: &str) -> Vec<&str> {
    token_pattern().find_iter(doc).map(|m| m.as_str()).collect()
}

fn ngrams(doc: &str, config: &VectorizerConfig) -> Vec<String> {
    let tokens = tokenize(doc);
    let mut out = Vec::new();
    for n in config.min_n..=config.max_n {
        if n == 0 || tokens.len() < n {
            continue;
        }
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}
