//! Cross-validated evaluation harness
//!
//! Compares three strategies on a labeled dataset:
//!
//! - **lexicon**: flag a text when the lexicon or abbreviation detectors fire
//! - **ml**: model probability against a threshold tuned on the training fold
//! - **hybrid**: ml OR lexicon, scored for AUC with `max(p, lexicon)`
//!
//! Every fold fits its own model from scratch. When a ground-truth spans
//! column is present, each fold also reports mean character-level F1 of the
//! lexicon, ml and merged span sets.

pub mod folds;
pub mod metrics;
pub mod spans;

pub use folds::{stratified_k_fold, Fold, DEFAULT_FOLDS, DEFAULT_SEED};
pub use metrics::{AggregateMetrics, MetricSet};
pub use spans::{char_f1, parse_ground_truth};

use crate::classifier::{apply_threshold, best_threshold_by_f1, TrainConfig, TrainedModel};
use crate::dataset::{labeled_data, ColumnSelection, Dataset, LabeledData};
use crate::detectors::{
    detect_all, merge_spans, AbbreviationDetector, AttributionDetector, DetectionInput,
    LexiconDetector, SpanDetector, DEFAULT_TOP_K,
};
use crate::error::{Result, SpanflagError};
use crate::lexicon::Lexicon;
use crate::models::CharIndex;
use serde::{Deserialize, Serialize};
use spans::{clamp_ranges, span_ranges};
use tracing::info;

/// Evaluation settings
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub text_col: String,
    pub label_col: String,
    pub spans_col: Option<String>,
    pub k: usize,
    pub seed: u64,
    pub top_k: usize,
    pub train: TrainConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            text_col: "text".to_string(),
            label_col: "label".to_string(),
            spans_col: None,
            k: DEFAULT_FOLDS,
            seed: DEFAULT_SEED,
            top_k: DEFAULT_TOP_K,
            train: TrainConfig::default(),
        }
    }
}

/// Mean character-level F1 per span strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanScores {
    pub lex: f64,
    pub ml: f64,
    pub hyb: f64,
}

/// Metrics of one fold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldOutcome {
    /// 1-based fold number
    pub fold: usize,
    pub lex: MetricSet,
    pub ml: MetricSet,
    pub hyb: MetricSet,
    /// ML threshold tuned on the training part
    pub threshold: f64,
    pub span: Option<SpanScores>,
}

/// Per-fold outcomes plus their aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub k: usize,
    pub folds: Vec<FoldOutcome>,
    pub lex: AggregateMetrics,
    pub ml: AggregateMetrics,
    pub hyb: AggregateMetrics,
    /// Mean over folds that had ground-truth spans
    pub span: Option<SpanScores>,
}

impl EvalReport {
    fn from_folds(k: usize, folds: Vec<FoldOutcome>) -> Self {
        let collect = |f: fn(&FoldOutcome) -> MetricSet| folds.iter().map(f).collect::<Vec<_>>();
        let lex = AggregateMetrics::from_folds(&collect(|f| f.lex));
        let ml = AggregateMetrics::from_folds(&collect(|f| f.ml));
        let hyb = AggregateMetrics::from_folds(&collect(|f| f.hyb));

        let span_folds: Vec<SpanScores> = folds.iter().filter_map(|f| f.span).collect();
        let span = (!span_folds.is_empty()).then(|| {
            let mean = |f: fn(&SpanScores) -> f64| {
                metrics::mean_std(&span_folds.iter().map(f).collect::<Vec<_>>()).0
            };
            SpanScores {
                lex: mean(|s| s.lex),
                ml: mean(|s| s.ml),
                hyb: mean(|s| s.hyb),
            }
        });

        Self {
            k,
            folds,
            lex,
            ml,
            hyb,
            span,
        }
    }
}

/// Extract the configured columns; both text and label must exist
fn load_rows(dataset: &Dataset, lexicon: &Lexicon, config: &EvalConfig) -> Result<LabeledData> {
    for col in [&config.text_col, &config.label_col] {
        if !dataset.has_column(col) {
            return Err(SpanflagError::MissingColumn(format!(
                "{} (available: {})",
                col,
                dataset.headers().join(", ")
            )));
        }
    }
    let selection = ColumnSelection {
        text: Some(config.text_col.clone()),
        label: Some(config.label_col.clone()),
        spans: config.spans_col.clone(),
    };
    labeled_data(dataset, &selection, lexicon)
}

/// Run k-fold cross-validation over `dataset`
pub fn evaluate(dataset: &Dataset, lexicon: &Lexicon, config: &EvalConfig) -> Result<EvalReport> {
    let data = load_rows(dataset, lexicon, config)?;
    let splits = stratified_k_fold(&data.labels, config.k, config.seed)?;
    info!(
        "Evaluating {} rows with {}-fold cross-validation",
        data.len(),
        config.k
    );

    let mut outcomes = Vec::with_capacity(splits.len());
    for (i, split) in splits.iter().enumerate() {
        let train = data.subset(&split.train);
        let test = data.subset(&split.test);
        let mut outcome = evaluate_fold(&train, &test, lexicon, config)?;
        outcome.fold = i + 1;
        info!(
            "Fold {}: lex F1={:.3}, ml F1={:.3} (thr={:.2}), hybrid F1={:.3}",
            outcome.fold, outcome.lex.f1, outcome.ml.f1, outcome.threshold, outcome.hyb.f1
        );
        outcomes.push(outcome);
    }

    Ok(EvalReport::from_folds(config.k, outcomes))
}

/// Spans from the lexicon and abbreviation detectors only
fn lexicon_spans(lexicon: &Lexicon, text: &str) -> Vec<crate::models::Span> {
    let lex = LexiconDetector::new(lexicon);
    let abbrev = AbbreviationDetector::new(lexicon);
    let detectors: [&dyn SpanDetector; 2] = [&lex, &abbrev];
    detect_all(&detectors, &DetectionInput::new(text, ""))
}

/// Fit on `train`, tune the threshold on `train`, score `test`
pub fn evaluate_fold(
    train: &LabeledData,
    test: &LabeledData,
    lexicon: &Lexicon,
    config: &EvalConfig,
) -> Result<FoldOutcome> {
    let train_docs: Vec<String> = train.texts.iter().map(|t| lexicon.normalize(t)).collect();
    let model = TrainedModel::fit(&train_docs, &train.labels, &config.train)?;

    let train_scores: Vec<f64> = train_docs
        .iter()
        .map(|d| model.predict_proba(d).unwrap_or(0.0))
        .collect();
    let (threshold, _) = best_threshold_by_f1(&train.labels, &train_scores);

    let test_docs: Vec<String> = test.texts.iter().map(|t| lexicon.normalize(t)).collect();
    let ml_scores: Vec<f64> = test_docs
        .iter()
        .map(|d| model.predict_proba(d).unwrap_or(0.0))
        .collect();
    let ml_pred = apply_threshold(&ml_scores, threshold);

    let lex_spans: Vec<_> = test.texts.iter().map(|t| lexicon_spans(lexicon, t)).collect();
    let lex_pred: Vec<u8> = lex_spans.iter().map(|s| u8::from(!s.is_empty())).collect();
    let lex_scores: Vec<f64> = lex_pred.iter().map(|&p| p as f64).collect();

    let hyb_pred: Vec<u8> = ml_pred.iter().zip(&lex_pred).map(|(m, l)| m | l).collect();
    let hyb_scores: Vec<f64> = ml_scores
        .iter()
        .zip(&lex_scores)
        .map(|(m, l)| m.max(*l))
        .collect();

    let span = test.spans.as_ref().map(|truth_cells| {
        let attribution = AttributionDetector::new(Some(&model), config.top_k);
        let mut lex_f1 = Vec::with_capacity(test.len());
        let mut ml_f1 = Vec::with_capacity(test.len());
        let mut hyb_f1 = Vec::with_capacity(test.len());
        for (((text, normalized), lex), cell) in test
            .texts
            .iter()
            .zip(&test_docs)
            .zip(&lex_spans)
            .zip(truth_cells)
        {
            let char_len = CharIndex::new(text).char_len();
            let truth = clamp_ranges(parse_ground_truth(cell), char_len);
            let ml = attribution.detect(&DetectionInput::new(text, normalized));
            let combined = lex.iter().chain(&ml).cloned().collect();
            let hyb = merge_spans(combined, text);
            lex_f1.push(char_f1(&span_ranges(lex), &truth).2);
            ml_f1.push(char_f1(&span_ranges(&ml), &truth).2);
            hyb_f1.push(char_f1(&span_ranges(&hyb), &truth).2);
        }
        SpanScores {
            lex: metrics::mean_std(&lex_f1).0,
            ml: metrics::mean_std(&ml_f1).0,
            hyb: metrics::mean_std(&hyb_f1).0,
        }
    });

    Ok(FoldOutcome {
        fold: 0,
        lex: MetricSet::compute(&test.labels, &lex_scores, &lex_pred),
        ml: MetricSet::compute(&test.labels, &ml_scores, &ml_pred),
        hyb: MetricSet::compute(&test.labels, &hyb_scores, &hyb_pred),
        threshold,
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::seed_dataset;

    fn with_spans() -> Dataset {
        let texts = vec![
            "mày ngu quá",
            "đồ ngu",
            "cút đi",
            "thằng vô học",
            "đồ rác rưởi",
            "bài làm tốt",
            "cảm ơn bạn",
            "cần bổ sung ví dụ",
            "trình bày rõ ràng",
            "nội dung hay",
        ];
        let labels = ["1", "1", "1", "1", "1", "0", "0", "0", "0", "0"];
        let spans = ["4-7", "0-6", "0-6", "6-12", "0-11", "", "", "", "", ""];
        Dataset::from_columns(vec![
            ("text", texts.into_iter().map(String::from).collect()),
            ("label", labels.into_iter().map(String::from).collect()),
            ("spans", spans.into_iter().map(String::from).collect()),
        ])
    }

    #[test]
    fn test_evaluate_seed_dataset() {
        let lex = Lexicon::builtin().unwrap();
        let report = evaluate(&seed_dataset(), &lex, &EvalConfig::default()).unwrap();
        assert_eq!(report.folds.len(), 5);
        assert!(report.span.is_none());
        // Every seed positive contains a lexicon term and no negative does
        assert_eq!(report.lex.f1, (1.0, 0.0));
        assert!(report.hyb.recall.0 >= report.ml.recall.0);
        for fold in &report.folds {
            assert!((0.0..=1.0).contains(&fold.threshold));
        }
    }

    #[test]
    fn test_evaluate_with_spans() {
        let lex = Lexicon::builtin().unwrap();
        let config = EvalConfig {
            spans_col: Some("spans".into()),
            k: 2,
            ..EvalConfig::default()
        };
        let report = evaluate(&with_spans(), &lex, &config).unwrap();
        let span = report.span.unwrap();
        assert!(span.lex > 0.5);
        assert!((0.0..=1.0).contains(&span.ml));
        assert!((0.0..=1.0).contains(&span.hyb));
        assert!(report.folds.iter().all(|f| f.span.is_some()));
    }

    #[test]
    fn test_truth_past_text_end_is_clamped() {
        let lex = Lexicon::builtin().unwrap();
        let base = with_spans();
        let owned = |name: &str| -> Vec<String> {
            base.column(name).unwrap().into_iter().map(String::from).collect()
        };
        let mut spans = owned("spans");
        spans[0] = format!("4-{}", usize::MAX);
        spans[1] = "0-30000000".to_string();
        let rows = Dataset::from_columns(vec![
            ("text", owned("text")),
            ("label", owned("label")),
            ("spans", spans),
        ]);

        let config = EvalConfig {
            spans_col: Some("spans".into()),
            k: 2,
            ..EvalConfig::default()
        };
        let span = evaluate(&rows, &lex, &config).unwrap().span.unwrap();
        assert!(span.lex > 0.5);
        assert!((0.0..=1.0).contains(&span.hyb));
    }

    #[test]
    fn test_missing_label_column() {
        let lex = Lexicon::builtin().unwrap();
        let ds = Dataset::from_columns(vec![("text", vec!["a".to_string(); 6])]);
        assert!(matches!(
            evaluate(&ds, &lex, &EvalConfig::default()),
            Err(SpanflagError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_missing_spans_column_is_skipped() {
        let lex = Lexicon::builtin().unwrap();
        let config = EvalConfig {
            spans_col: Some("gold".into()),
            ..EvalConfig::default()
        };
        let report = evaluate(&seed_dataset(), &lex, &config).unwrap();
        assert!(report.span.is_none());
    }

    #[test]
    fn test_folds_are_reproducible() {
        let lex = Lexicon::builtin().unwrap();
        let a = evaluate(&seed_dataset(), &lex, &EvalConfig::default()).unwrap();
        let b = evaluate(&seed_dataset(), &lex, &EvalConfig::default()).unwrap();
        let thr_a: Vec<f64> = a.folds.iter().map(|f| f.threshold).collect();
        let thr_b: Vec<f64> = b.folds.iter().map(|f| f.threshold).collect();
        assert_eq!(thr_a, thr_b);
    }
}
