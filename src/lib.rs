//! spanflag - hybrid offensive-span detection
//!
//! Flags offensive spans in short free-form comments by combining a term
//! lexicon, an abbreviation table and the coefficients of a TF-IDF + logistic
//! regression model, and scores those strategies against labeled data with
//! k-fold cross-validation.
//!
//! ```no_run
//! use spanflag::classifier::{train, TrainConfig};
//! use spanflag::dataset::seed_dataset;
//! use spanflag::lexicon::Lexicon;
//! use spanflag::pipeline::Analyzer;
//!
//! let lexicon = Lexicon::builtin()?;
//! let model = train(&seed_dataset(), &lexicon, &TrainConfig::default())?;
//! let analysis = Analyzer::new(&lexicon, Some(&model)).analyze("mày ngu quá")?;
//! assert_eq!(analysis.prediction, 1);
//! # Ok::<(), spanflag::error::SpanflagError>(())
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod detectors;
pub mod error;
pub mod eval;
pub mod lexicon;
pub mod models;
pub mod pipeline;
pub mod reporters;
