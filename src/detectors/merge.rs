//! Overlap resolution for detector output

use crate::models::{CharIndex, Span};

/// Merge overlapping or touching spans into a sorted, disjoint set.
///
/// A span starting at or before the current span's end is absorbed: the end
/// is extended and the provenance unioned. Merged spans are rebuilt with
/// their text sliced from `text`. Merging a merged set is a no-op.
pub fn merge_spans(mut spans: Vec<Span>, text: &str) -> Vec<Span> {
    if spans.is_empty() {
        return spans;
    }
    spans.sort_by_key(|s| (s.start, s.end));

    let mut ranges: Vec<(usize, usize, crate::models::Provenance)> = Vec::new();
    for s in &spans {
        match ranges.last_mut() {
            Some(last) if s.start <= last.1 => {
                *last = (last.0, last.1.max(s.end), last.2.union(s.source));
            }
            _ => ranges.push((s.start, s.end, s.source)),
        }
    }

    let index = CharIndex::new(text);
    ranges
        .into_iter()
        .map(|(start, end, source)| {
            Span::new(start, end, index.slice(start, end), source)
        })
        .collect()
}
