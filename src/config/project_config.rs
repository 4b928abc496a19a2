//! Project configuration (spanflag.toml)
//!
//! Example:
//!
//! ```toml
//! [lexicon]
//! terms = ["ngu", "đồ điên", "đ*m"]
//!
//! [[abbreviations]]
//! short = "vcl"
//! expansion = "vãi cả lồn"
//!
//! [model]
//! top_k = 3
//! batch_limit = 200
//! training_data = "data/train.csv"
//!
//! [eval]
//! k = 5
//! seed = 42
//! summary_path = "metrics_summary.json"
//! ```
//!
//! Omitted sections keep their defaults; omitting `terms` or
//! `[[abbreviations]]` keeps the built-in Vietnamese tables.

use crate::classifier::{LogisticConfig, TrainConfig, VectorizerConfig};
use crate::error::{Result, SpanflagError};
use crate::lexicon::{Lexicon, DEFAULT_ABBREVIATIONS, DEFAULT_TERMS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "spanflag.toml";

/// Training file picked up when present
pub const DEFAULT_TRAINING_FILE: &str = "data_train.csv";

/// Project-level configuration loaded from spanflag.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Ordered abbreviation table; `None` keeps the built-in one
    #[serde(default)]
    pub abbreviations: Option<Vec<AbbreviationEntry>>,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub eval: EvalSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LexiconConfig {
    /// Offensive terms; `None` keeps the built-in list
    #[serde(default)]
    pub terms: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbbreviationEntry {
    pub short: String,
    pub expansion: String,
}

/// Model and analysis settings
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// N-grams flagged by model attribution (default: 3)
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Maximum rows per batch (default: 200)
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,

    /// Gradient descent iterations (default: 1000)
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    /// Inverse regularization strength (default: 1.0)
    #[serde(default = "default_c")]
    pub c: f64,

    /// Training CSV; falls back to ./data_train.csv, then the seed set
    #[serde(default)]
    pub training_data: Option<PathBuf>,
}

fn default_top_k() -> usize {
    crate::detectors::DEFAULT_TOP_K
}

fn default_batch_limit() -> usize {
    crate::pipeline::DEFAULT_BATCH_LIMIT
}

fn default_max_iter() -> usize {
    LogisticConfig::default().max_iter
}

fn default_c() -> f64 {
    LogisticConfig::default().c
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            batch_limit: default_batch_limit(),
            max_iter: default_max_iter(),
            c: default_c(),
            training_data: None,
        }
    }
}

/// Cross-validation settings
#[derive(Debug, Clone, Deserialize)]
pub struct EvalSettings {
    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,
}

fn default_k() -> usize {
    crate::eval::DEFAULT_FOLDS
}

fn default_seed() -> u64 {
    crate::eval::DEFAULT_SEED
}

fn default_summary_path() -> PathBuf {
    PathBuf::from(crate::reporters::json::DEFAULT_SUMMARY_PATH)
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self {
            k: default_k(),
            seed: default_seed(),
            summary_path: default_summary_path(),
        }
    }
}

impl ProjectConfig {
    /// Parse and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ProjectConfig = toml::from_str(&content)?;
        config.validate()?;
        debug!("Loaded project config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.model.c > 0.0 && self.model.c.is_finite()) {
            return Err(SpanflagError::Configuration(format!(
                "model.c must be a positive number, got {}",
                self.model.c
            )));
        }
        if self.model.batch_limit == 0 {
            return Err(SpanflagError::Configuration(
                "model.batch_limit must be at least 1".into(),
            ));
        }
        if self.eval.k < 2 {
            return Err(SpanflagError::Configuration(format!(
                "eval.k must be at least 2, got {}",
                self.eval.k
            )));
        }
        Ok(())
    }

    /// Compile the configured (or built-in) lexicon tables
    pub fn lexicon(&self) -> Result<Lexicon> {
        let terms: Vec<&str> = match &self.lexicon.terms {
            Some(terms) => terms.iter().map(String::as_str).collect(),
            None => DEFAULT_TERMS.to_vec(),
        };
        let abbreviations: Vec<(&str, &str)> = match &self.abbreviations {
            Some(entries) => entries
                .iter()
                .map(|e| (e.short.as_str(), e.expansion.as_str()))
                .collect(),
            None => DEFAULT_ABBREVIATIONS.to_vec(),
        };
        Lexicon::new(&terms, &abbreviations)
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            vectorizer: VectorizerConfig::default(),
            logistic: LogisticConfig {
                c: self.model.c,
                max_iter: self.model.max_iter,
                ..LogisticConfig::default()
            },
        }
    }

    /// Training files to try, in order
    pub fn training_candidates(&self, base: &Path) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = &self.model.training_data {
            candidates.push(base.join(path));
        }
        candidates.push(base.join(DEFAULT_TRAINING_FILE));
        candidates
    }
}

/// Load `spanflag.toml` from `dir`; a missing file yields the defaults
pub fn load_project_config(dir: &Path) -> Result<ProjectConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        debug!("No {} in {}, using defaults", CONFIG_FILE, dir.display());
        return Ok(ProjectConfig::default());
    }
    ProjectConfig::load(&path)
}

/// Commented template written by `spanflag init`
pub const DEFAULT_CONFIG: &str = r#"# spanflag configuration

[lexicon]
# Offensive terms. `*` matches any run of letters or dots (masked words).
# Remove the comment to replace the built-in Vietnamese list.
# terms = ["ngu", "đồ điên", "đ*m", "khốn nạn"]

# Abbreviations are expanded before scoring; entries whose expansion is
# offensive are flagged as spans too. Uncomment to replace the built-in table.
# [[abbreviations]]
# short = "vcl"
# expansion = "vãi cả lồn"

[model]
top_k = 3
batch_limit = 200
max_iter = 1000
c = 1.0
# training_data = "data_train.csv"

[eval]
k = 5
seed = 42
summary_path = "metrics_summary.json"
"#;
