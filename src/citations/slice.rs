//! Interval slicer: restrict spans to a visible window of a larger text
//!
//! Used when only part of a long message is rendered (virtualized lists,
//! "show more" truncation). Output offsets are relative to the window.

use std::ops::Range;

use super::segment::{ceil_char_boundary, compute_segments, floor_char_boundary};
use super::types::{CitationSpan, TextSegment};

/// Clip `spans` to `[slice_start, slice_end)` and rebase them onto the slice.
///
/// Spans that do not overlap the window, or become zero-width after clipping,
/// are dropped. An empty or inverted window yields no spans.
pub fn slice_spans(spans: &[CitationSpan], slice_start: usize, slice_end: usize) -> Vec<CitationSpan> {
    if slice_start >= slice_end {
        return Vec::new();
    }
    spans
        .iter()
        .filter(|s| s.start < slice_end && s.end > slice_start)
        .filter_map(|s| {
            let start = s.start.max(slice_start) - slice_start;
            let end = s.end.min(slice_end) - slice_start;
            (start < end).then(|| CitationSpan::new(start, end, s.citation_id.clone()))
        })
        .collect()
}

/// Segments for the `window` of `text`, with spans computed against the whole text.
///
/// The window is clamped to the text and widened to character boundaries.
pub fn segment_window(text: &str, spans: &[CitationSpan], window: Range<usize>) -> Vec<TextSegment> {
    let end = ceil_char_boundary(text, window.end.min(text.len()));
    let start = floor_char_boundary(text, window.start.min(end));
    let local = slice_spans(spans, start, end);
    compute_segments(&text[start..end], &local)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, id: &str) -> CitationSpan {
        CitationSpan::new(start, end, id)
    }

    #[test]
    fn test_partial_overlap_rebased() {
        let out = slice_spans(&[span(5, 15, "a")], 10, 20);
        assert_eq!(out, vec![span(0, 5, "a")]);
    }

    #[test]
    fn test_outside_dropped() {
        assert!(slice_spans(&[span(0, 10, "a"), span(20, 30, "b")], 10, 20).is_empty());
    }

    #[test]
    fn test_inside_kept() {
        assert_eq!(slice_spans(&[span(12, 14, "a")], 10, 20), vec![span(2, 4, "a")]);
    }

    #[test]
    fn test_covering_span_clipped_both_sides() {
        assert_eq!(slice_spans(&[span(0, 100, "a")], 10, 20), vec![span(0, 10, "a")]);
    }

    #[test]
    fn test_zero_width_dropped() {
        assert!(slice_spans(&[span(12, 12, "a")], 10, 20).is_empty());
    }

    #[test]
    fn test_empty_window() {
        assert!(slice_spans(&[span(0, 100, "a")], 10, 10).is_empty());
    }

    #[test]
    fn test_inverted_window() {
        assert!(slice_spans(&[span(0, 20, "a")], 10, 5).is_empty());
    }

    #[test]
    fn test_segment_window() {
        let text = "The cat sat on the mat";
        let spans = [span(4, 7, "cat"), span(19, 22, "mat")];
        let segments = segment_window(text, &spans, 6..20);
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["t", " sat on the ", "m"]);
        assert_eq!(segments[0].citation_ids, vec!["cat"]);
        assert_eq!(segments[2].citation_ids, vec!["mat"]);
    }

    #[test]
    fn test_segment_window_clamped() {
        let segments = segment_window("short", &[span(0, 5, "a")], 2..50);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "ort");
    }
}
