//! HTML highlight rendering
//!
//! Wraps every flagged span in a `<mark>` whose tooltip lists the detectors
//! that produced it. Everything outside the marks is escaped verbatim.

use crate::models::{CharIndex, Span};

/// Render `text` with `spans` highlighted.
///
/// Spans must be merged (sorted and disjoint); with no spans the result is
/// just the escaped text.
pub fn highlight(text: &str, spans: &[Span]) -> String {
    if spans.is_empty() {
        return html_escape(text);
    }
    let index = CharIndex::new(text);
    let mut html = String::with_capacity(text.len() + spans.len() * 48);
    let mut last = 0;
    for span in spans {
        html.push_str(&html_escape(index.slice(last, span.start)));
        html.push_str(&format!(
            "<mark title='source: {}'>{}</mark>",
            html_escape(&span.source.to_string()),
            html_escape(index.slice(span.start, span.end))
        ));
        last = span.end.max(last);
    }
    html.push_str(&html_escape(index.slice(last, index.char_len())));
    html
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Provenance, Source};

    #[test]
    fn test_no_spans_is_escaped_text() {
        assert_eq!(highlight("a < b & 'c'", &[]), "a &lt; b &amp; &#39;c&#39;");
        assert_eq!(highlight("mày ngu quá", &[]), "mày ngu quá");
    }

    #[test]
    fn test_marks_use_char_offsets() {
        let source = Provenance::single(Source::Lexicon).union(Provenance::single(Source::Ml));
        let spans = vec![Span::new(4, 7, "ngu", source)];
        assert_eq!(
            highlight("mày ngu quá", &spans),
            "mày <mark title='source: lexicon, ml'>ngu</mark> quá"
        );
    }

    #[test]
    fn test_span_text_is_escaped() {
        let spans = vec![Span::new(0, 3, "<b>", Provenance::single(Source::Abbrev))];
        assert_eq!(
            highlight("<b> x", &spans),
            "<mark title='source: abbrev'>&lt;b&gt;</mark> x"
        );
    }
}
