//! Configuration module for spanflag
//!
//! This module handles:
//! - Project-level configuration (spanflag.toml)
//! - Lexicon and abbreviation table overrides
//! - Model, batch and cross-validation defaults

mod project_config;

pub use project_config::{
    load_project_config, AbbreviationEntry, EvalSettings, LexiconConfig, ModelConfig,
    ProjectConfig, CONFIG_FILE, DEFAULT_CONFIG, DEFAULT_TRAINING_FILE,
};
