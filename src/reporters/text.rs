//! Text (terminal) reporter with colors and formatting

use crate::eval::{AggregateMetrics, EvalReport, FoldOutcome};
use crate::models::Analysis;
use crate::pipeline::BatchReport;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Render one analysis for the terminal
pub fn render_analysis(text: &str, analysis: &Analysis) -> String {
    let mut out = String::new();

    let (color, verdict) = if analysis.prediction == 1 {
        (RED, "OFFENSIVE")
    } else {
        (GREEN, "clean")
    };
    out.push_str(&format!("{BOLD}{color}{verdict}{RESET}  "));
    match analysis.probability_profane {
        Some(p) => out.push_str(&format!("probability: {p:.2}%")),
        None => out.push_str(&format!("{DIM}probability: n/a{RESET}")),
    }
    if analysis.is_profane_by_list {
        out.push_str(&format!("  {YELLOW}[lexicon]{RESET}"));
    }
    out.push('\n');

    out.push_str(&format!("{DIM}text:{RESET}       {text}\n"));
    out.push_str(&format!(
        "{DIM}normalized:{RESET} {}\n",
        analysis.normalized_text
    ));

    if !analysis.spans.is_empty() {
        out.push_str(&format!("{BOLD}SPANS{RESET}\n"));
        for span in &analysis.spans {
            out.push_str(&format!(
                "  {:>4}..{:<4} {YELLOW}{}{RESET}  {DIM}({}){RESET}\n",
                span.start, span.end, span.text, span.source
            ));
        }
    }
    out
}

/// One-line summary of a batch
pub fn render_batch_summary(report: &BatchReport) -> String {
    let mut line = format!(
        "{} rows analyzed, {} flagged",
        report.items.len(),
        report.flagged()
    );
    if report.failed() > 0 {
        line.push_str(&format!(", {RED}{} failed{RESET}", report.failed()));
    }
    line
}

/// `[Fold i] Lex F1=… | ML F1=… (thr=…) | Hybrid F1=…`
pub fn render_fold_line(fold: &FoldOutcome) -> String {
    format!(
        "[Fold {}] Lex F1={:.3} | ML F1={:.3} (thr={:.2}) | Hybrid F1={:.3}",
        fold.fold, fold.lex.f1, fold.ml.f1, fold.threshold, fold.hyb.f1
    )
}

fn mean_std((mean, std): (f64, f64)) -> String {
    format!("{mean:.3} ± {std:.3}")
}

fn table_row(name: &str, m: &AggregateMetrics) -> String {
    format!(
        "| {} | {} | {} | {} | {} |",
        name,
        mean_std(m.precision),
        mean_std(m.recall),
        mean_std(m.f1),
        mean_std(m.auc)
    )
}

/// Markdown table of aggregated metrics
pub fn render_table(report: &EvalReport) -> String {
    [
        "| Model | Precision | Recall | F1 | AUC |".to_string(),
        "|---|---:|---:|---:|---:|".to_string(),
        table_row("Lexicon", &report.lex),
        table_row("ML", &report.ml),
        table_row("Hybrid", &report.hyb),
    ]
    .join("\n")
}

/// Fold lines, results table and span summary
pub fn render_eval(report: &EvalReport) -> String {
    let mut out = String::new();
    for fold in &report.folds {
        out.push_str(&render_fold_line(fold));
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{BOLD}=== Mean results ({}-fold) ==={RESET}\n",
        report.k
    ));
    out.push_str(&render_table(report));
    out.push('\n');

    if let Some(span) = report.span {
        out.push_str(&format!(
            "\n{BOLD}[Span]{RESET} character F1 (mean over folds):\n"
        ));
        out.push_str(&format!(
            "Lexicon: {:.3}  |  ML: {:.3}  |  Hybrid: {:.3}\n",
            span.lex, span.ml, span.hyb
        ));
    }
    out
}
