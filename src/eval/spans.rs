//! Character-level span scoring against ground truth

use crate::models::Span;
use std::collections::BTreeSet;
use std::ops::Range;

/// Parse `"start-end|start-end"` into ranges.
///
/// Entries that are not two integers joined by `-` are skipped.
pub fn parse_ground_truth(cell: &str) -> Vec<Range<usize>> {
    cell.split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let parsed = part.split_once('-').and_then(|(a, b)| {
                let start = a.trim().parse::<usize>().ok()?;
                let end = b.trim().parse::<usize>().ok()?;
                Some(start..end)
            });
            if parsed.is_none() {
                tracing::debug!("Skipping malformed span {:?}", part);
            }
            parsed
        })
        .collect()
}

/// Clip ranges to a text of `len` characters, dropping any left empty
pub fn clamp_ranges(ranges: Vec<Range<usize>>, len: usize) -> Vec<Range<usize>> {
    ranges
        .into_iter()
        .filter_map(|r| {
            if r.end > len {
                tracing::debug!("Span {}-{} exceeds text length {}", r.start, r.end, len);
            }
            let clipped = r.start.min(len)..r.end.min(len);
            (clipped.start < clipped.end).then_some(clipped)
        })
        .collect()
}

/// Ranges of a span list
pub fn span_ranges(spans: &[Span]) -> Vec<Range<usize>> {
    spans.iter().map(Span::range).collect()
}

fn char_set(ranges: &[Range<usize>]) -> BTreeSet<usize> {
    ranges.iter().flat_map(|r| r.clone()).collect()
}

/// Precision, recall and F1 over covered character offsets.
///
/// Nothing predicted and nothing expected is perfect agreement `(1, 1, 1)`;
/// nothing predicted against a non-empty truth is `(0, 0, 0)`.
pub fn char_f1(predicted: &[Range<usize>], truth: &[Range<usize>]) -> (f64, f64, f64) {
    let p = char_set(predicted);
    let g = char_set(truth);
    if p.is_empty() && g.is_empty() {
        return (1.0, 1.0, 1.0);
    }
    if p.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let tp = p.intersection(&g).count() as f64;
    let precision = tp / p.len() as f64;
    let recall = if g.is_empty() { 0.0 } else { tp / g.len() as f64 };
    (
        precision,
        recall,
        crate::eval::metrics::f1_score(precision, recall),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ground_truth() {
        assert_eq!(parse_ground_truth("0-3|5-9"), vec![0..3, 5..9]);
        assert_eq!(parse_ground_truth(" 2-4 | x | 7- | -1-2 |"), vec![2..4]);
        assert!(parse_ground_truth("").is_empty());
    }

    #[test]
    fn test_clamp_ranges_to_text_length() {
        let truth = parse_ground_truth("0-30000000|2-5|9-12|4-1");
        assert_eq!(clamp_ranges(truth, 6), vec![0..6, 2..5]);

        let huge = parse_ground_truth(&format!("0-{}", usize::MAX));
        let clipped = clamp_ranges(huge, 3);
        assert_eq!(char_f1(&[0..3], &clipped), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_exact_match_is_perfect() {
        let truth = parse_ground_truth("0-3");
        assert_eq!(char_f1(&[0..3], &truth), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_prediction() {
        let truth = parse_ground_truth("0-3");
        assert_eq!(char_f1(&[], &truth), (0.0, 0.0, 0.0));
        assert_eq!(char_f1(&[], &[]), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_self_agreement() {
        let spans = vec![1..4, 6..10, 8..12];
        assert_eq!(char_f1(&spans, &spans), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_partial_overlap() {
        // predicted {0,1,2,3}, truth {2,3,4,5}
        let (p, r, f1) = char_f1(&[0..4], &[2..6]);
        assert_eq!((p, r, f1), (0.5, 0.5, 0.5));
    }

    #[test]
    fn test_prediction_without_truth() {
        assert_eq!(char_f1(&[0..2], &[]), (0.0, 0.0, 0.0));
    }
}
