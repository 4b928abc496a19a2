//! Output reporters for spanflag results
//!
//! Supports:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//!
//! `html` renders highlight markup and is used by the analyzer itself.

pub mod html;
pub mod json;
pub mod text;

use crate::models::Analysis;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render one analysis in the specified format
pub fn render_analysis(text: &str, analysis: &Analysis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_analysis(text, analysis)),
        OutputFormat::Json => json::render(analysis),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Provenance, Source, Span};

    /// Analysis of "mày ngu quá" with one lexicon span
    pub(crate) fn test_analysis() -> Analysis {
        Analysis {
            normalized_text: "mày ngu quá".into(),
            prediction: 1,
            probability_profane: Some(87.25),
            is_profane_by_list: true,
            spans: vec![Span::new(4, 7, "ngu", Provenance::single(Source::Lexicon))],
            highlighted_html: "mày <mark title='source: lexicon'>ngu</mark> quá".into(),
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_dispatch() {
        let a = test_analysis();
        let json = render_analysis("mày ngu quá", &a, OutputFormat::Json).unwrap();
        assert!(json.contains("\"probability_profane\""));
        let text = render_analysis("mày ngu quá", &a, OutputFormat::Text).unwrap();
        assert!(text.contains("ngu"));
    }
}
