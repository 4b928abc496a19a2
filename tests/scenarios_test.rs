//! End-to-end detection and evaluation scenarios
//!
//! Runs the full analyzer with a model trained on the built-in seed set.

use spanflag::classifier::{train, TrainConfig, TrainedModel};
use spanflag::dataset::{seed_dataset, Dataset};
use spanflag::detectors::merge_spans;
use spanflag::eval::{char_f1, evaluate, parse_ground_truth, EvalConfig};
use spanflag::lexicon::Lexicon;
use spanflag::models::{Source, Span};
use spanflag::pipeline::Analyzer;
use spanflag::reporters::html::highlight;

fn seed_model(lexicon: &Lexicon) -> TrainedModel {
    train(&seed_dataset(), lexicon, &TrainConfig::default()).unwrap()
}

#[test]
fn test_lexicon_term_is_flagged() {
    let lexicon = Lexicon::builtin().unwrap();
    let model = seed_model(&lexicon);
    let analysis = Analyzer::new(&lexicon, Some(&model))
        .analyze("mày ngu quá")
        .unwrap();

    assert_eq!(analysis.prediction, 1);
    assert!(analysis.is_profane_by_list);
    let lexicon_ngu = |s: &Span| s.source.contains(Source::Lexicon) && s.text.contains("ngu");
    assert!(analysis.spans.iter().any(lexicon_ngu));
    let p = analysis.probability_profane.unwrap();
    assert!((0.0..=100.0).contains(&p));
}

#[test]
fn test_constructive_comment_is_clean() {
    let lexicon = Lexicon::builtin().unwrap();
    let model = seed_model(&lexicon);
    let analysis = Analyzer::new(&lexicon, Some(&model))
        .analyze("bạn nên cố gắng hơn")
        .unwrap();

    assert_eq!(analysis.prediction, 0);
    assert!(analysis.spans.is_empty());
    assert!(!analysis.is_profane_by_list);
    assert!(analysis.probability_profane.unwrap() < 50.0);
    assert_eq!(analysis.highlighted_html, "bạn nên cố gắng hơn");
}

#[test]
fn test_profane_abbreviation_is_flagged() {
    let lexicon = Lexicon::builtin().unwrap();
    let model = seed_model(&lexicon);
    let analysis = Analyzer::new(&lexicon, Some(&model))
        .analyze("vcl dở tệ")
        .unwrap();

    assert_eq!(analysis.prediction, 1);
    assert_eq!(analysis.normalized_text, "vãi cả lồn dở tệ");
    let first = &analysis.spans[0];
    assert_eq!((first.start, first.end), (0, 3));
    assert_eq!(first.text, "vcl");
    assert!(first.source.contains(Source::Abbrev));
}

#[test]
fn test_exact_span_scores_perfectly() {
    let truth = parse_ground_truth("0-3");
    assert_eq!(char_f1(&parse_ground_truth("0-3"), &truth), (1.0, 1.0, 1.0));
    assert_eq!(char_f1(&[], &truth), (0.0, 0.0, 0.0));
}

#[test]
fn test_merged_spans_are_disjoint_and_stable() {
    let lexicon = Lexicon::builtin().unwrap();
    let model = seed_model(&lexicon);
    let analyzer = Analyzer::new(&lexicon, Some(&model));
    let texts = [
        "đồ ngu, cút đi",
        "DM thằng này vô học, đồ rác rưởi",
        "vcl vcl vcl",
        "thối lợm   thật sự đáng khinh",
        "",
    ];
    for text in texts {
        let spans = analyzer.analyze(text).unwrap().spans;
        for pair in spans.windows(2) {
            assert!(pair[0].end < pair[1].start, "overlap in {:?}", text);
        }
        assert_eq!(merge_spans(spans.clone(), text), spans);
        assert_eq!(analyzer.analyze(text).unwrap().spans, spans);
    }
}

#[test]
fn test_highlight_without_spans_round_trips() {
    assert_eq!(highlight("bài làm <tốt>", &[]), "bài làm &lt;tốt&gt;");
}

#[test]
fn test_wildcard_term() {
    let no_abbreviations: &[(&str, &str)] = &[];
    let lexicon = Lexicon::new(&["đ*m"], no_abbreviations).unwrap();
    assert!(lexicon.matches_any("đ.m thằng kia"));
    assert!(lexicon.matches_any("Đ..M"));
    assert!(!lexicon.matches_any("đ m"));
    assert!(!lexicon.matches_any("ađm"));
}

#[test]
fn test_eval_with_ground_truth_spans() {
    let rows = [
        ("mày ngu quá", "1", "4-7"),
        ("đồ ngu", "1", "0-6"),
        ("cút đi", "1", "0-6"),
        ("thằng vô học", "1", "6-12"),
        ("đồ rác rưởi", "1", "0-11"),
        ("đồ điên", "1", "0-7"),
        ("bài làm tốt", "0", ""),
        ("cảm ơn bạn", "0", ""),
        ("cần bổ sung ví dụ", "0", ""),
        ("trình bày rõ ràng", "0", ""),
        ("nội dung hay", "0", ""),
        ("cố gắng thêm nhé", "0", ""),
    ];
    let dataset = Dataset::from_columns(vec![
        ("text", rows.iter().map(|r| r.0.to_string()).collect()),
        ("label", rows.iter().map(|r| r.1.to_string()).collect()),
        ("spans", rows.iter().map(|r| r.2.to_string()).collect()),
    ]);
    let config = EvalConfig {
        spans_col: Some("spans".into()),
        k: 3,
        ..EvalConfig::default()
    };
    let report = evaluate(&dataset, &Lexicon::builtin().unwrap(), &config).unwrap();

    assert_eq!(report.folds.len(), 3);
    assert_eq!(report.lex.f1.0, 1.0);
    let span = report.span.unwrap();
    assert_eq!(span.lex, 1.0);
    assert!(span.hyb <= 1.0 && span.ml <= 1.0);
}
