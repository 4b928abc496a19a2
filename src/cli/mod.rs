//! CLI command definitions and handlers

mod analyze;
mod batch;
mod eval;
mod init;
mod train;

use crate::config::{load_project_config, ProjectConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Parse and validate a positive count
fn parse_positive(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// spanflag - offensive span detection for short comments
#[derive(Parser, Debug)]
#[command(name = "spanflag")]
#[command(
    version,
    about = "Flag offensive spans in short comments with a lexicon + ML hybrid",
    after_help = "\
Examples:
  spanflag analyze \"mày ngu quá\"             Analyze one text
  spanflag analyze \"vcl dở tệ\" -f json       JSON output for scripting
  spanflag batch comments.csv                Analyze up to 200 rows
  spanflag train --data data_train.csv       Fit and save a model
  spanflag eval --csv labeled.csv --spans-col spans --k 5"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Path to spanflag.toml (default: ./spanflag.toml if present)
    #[arg(long, global = true, env = "SPANFLAG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a spanflag.toml with the default settings
    Init {
        /// Directory to initialize
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Analyze a single text
    Analyze {
        /// Text to analyze (multiple words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        /// Trained model JSON (default: train on the configured data)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Analyze the lines of a .txt file or the text column of a .csv file
    Batch {
        /// Input file (.txt or .csv)
        file: PathBuf,

        /// Maximum rows to analyze (default: model.batch_limit)
        #[arg(long, value_parser = parse_positive)]
        limit: Option<usize>,

        /// Text column for CSV input (default: detected)
        #[arg(long)]
        text_col: Option<String>,

        /// Trained model JSON (default: train on the configured data)
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Train the classifier and save it as JSON
    Train {
        /// Training CSV (default: model.training_data, ./data_train.csv, or the seed set)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output path (default: <data dir>/spanflag/model.json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Cross-validate lexicon, ML and hybrid strategies on a labeled CSV
    Eval {
        /// Labeled CSV
        #[arg(long)]
        csv: PathBuf,

        #[arg(long, default_value = "text")]
        text_col: String,

        #[arg(long, default_value = "label")]
        label_col: String,

        /// Ground-truth spans column ("start-end|start-end")
        #[arg(long)]
        spans_col: Option<String>,

        /// Number of folds (default: eval.k)
        #[arg(long)]
        k: Option<usize>,

        /// Summary JSON path (default: eval.summary_path)
        #[arg(long)]
        summary: Option<PathBuf>,
    },
}

/// Load the explicit config file, or ./spanflag.toml if present
fn load_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => ProjectConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => load_project_config(Path::new("."))
            .context("Failed to load spanflag.toml"),
    }
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let config = || load_config(cli.config.as_deref());
    match cli.command {
        Commands::Init { path } => init::run(&path),
        Commands::Analyze {
            text,
            model,
            format,
        } => analyze::run(&config()?, &text.join(" "), model.as_deref(), &format),
        Commands::Batch {
            file,
            limit,
            text_col,
            model,
        } => {
            let config = config()?;
            let limit = limit.unwrap_or(config.model.batch_limit);
            batch::run(&config, &file, limit, text_col.as_deref(), model.as_deref())
        }
        Commands::Train { data, output } => {
            train::run(&config()?, data.as_deref(), output.as_deref())
        }
        Commands::Eval {
            csv,
            text_col,
            label_col,
            spans_col,
            k,
            summary,
        } => {
            let config = config()?;
            let args = eval::EvalArgs {
                csv,
                text_col,
                label_col,
                spans_col,
                k: k.unwrap_or(config.eval.k),
                summary: summary.unwrap_or_else(|| config.eval.summary_path.clone()),
            };
            eval::run(&config, args)
        }
    }
}
