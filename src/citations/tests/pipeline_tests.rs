use crate::citations::{
    compute_segments, find_pattern_spans, remap_to_pretty, render_segments, segment_window,
    slice_spans, Citation, CitationMatcher, CitationSpan, PositionMap, Role, Utf16Index,
};

fn cite(block: usize, start: usize, end: usize, pattern: &str) -> Citation {
    Citation {
        start_idx: start,
        end_idx: end,
        transcript_idx: Some(0),
        block_idx: Some(block),
        metadata_key: None,
        start_pattern: Some(pattern.to_string()),
    }
}

#[test]
fn test_cat_and_mat_scenario() {
    let text = "The cat sat on the mat";
    let citations = [cite(0, 4, 7, "cat"), cite(0, 19, 22, "mat")];

    let mut matcher = CitationMatcher::default();
    let spans = matcher.match_citations(text, &citations);
    let segments = compute_segments(text, &spans);

    let view: Vec<(&str, usize)> = segments
        .iter()
        .map(|s| (s.text.as_str(), s.citation_ids.len()))
        .collect();
    assert_eq!(view, vec![("The ", 0), ("cat", 1), (" sat on the ", 0), ("mat", 1)]);
    assert_eq!(segments[1].citation_ids, vec!["0-0-4-7"]);
    assert_eq!(segments[3].citation_ids, vec!["0-0-19-22"]);

    let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(joined, text);
}

#[test]
fn test_overlapping_citations_rendered() {
    let text = "the quick brown fox";
    let citations = [cite(0, 0, 0, "quick brown"), cite(1, 0, 0, "brown fox")];

    let mut matcher = CitationMatcher::default();
    let spans = matcher.match_citations(text, &citations);
    let rendered = render_segments(compute_segments(text, &spans), Some(Role::Assistant), Some("0-1-0-0"));

    let texts: Vec<&str> = rendered.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["the ", "quick ", "brown", " fox"]);
    assert!(!rendered[1].highlighted);
    assert!(rendered[2].highlighted);
    assert_eq!(rendered[2].citation_ids.len(), 2);
    assert!(rendered[3].highlighted);
}

#[test]
fn test_reflowed_message() {
    // Pattern captured against a single-line rendering, displayed wrapped
    let text = "The agent decided to\n    retry the request after\n    a short delay.";
    let citations = [cite(2, 0, 0, "retry the request after a short delay")];

    let mut matcher = CitationMatcher::default();
    let spans = matcher.match_citations(text, &citations);
    assert_eq!(spans.len(), 1);
    assert!(text[spans[0].start..spans[0].end].starts_with("retry"));
    assert!(text[spans[0].start..spans[0].end].ends_with("delay"));
}

#[test]
fn test_windowed_rendering_matches_full_rendering() {
    let text = "alpha beta gamma delta epsilon";
    let citations = [cite(0, 0, 0, "beta gamma"), cite(0, 1, 1, "delta")];

    let mut matcher = CitationMatcher::default();
    let spans = matcher.match_citations(text, &citations);

    let window = 8..22;
    let windowed = segment_window(text, &spans, window.clone());
    let manual = compute_segments(&text[window.clone()], &slice_spans(&spans, window.start, window.end));
    assert_eq!(windowed, manual);

    let joined: String = windowed.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(joined, &text[window]);
}

#[test]
fn test_metadata_spans_follow_pretty_printing() {
    let raw = r#"{"verdict":"pass","scores":[3,4]}"#;
    // Citation pattern located against the raw blob
    let spans = find_pattern_spans(raw, r#""scores":[3,4]"#);
    assert_eq!(spans.len(), 1);

    let remapped = remap_to_pretty(raw, &spans).unwrap();
    assert!(remapped.failure.is_none());
    let shown = &remapped.text[remapped.spans[0].start..remapped.spans[0].end];
    assert!(shown.starts_with("\"scores\""));
    assert!(shown.ends_with(']'));
}

#[test]
fn test_remap_then_segment_non_ascii() {
    let original = r#"{"note":"naïve café"}"#;
    let pretty = "{\n  \"note\": \"naïve café\"\n}";
    let spans = find_pattern_spans(original, "café");
    let map = PositionMap::build(original, pretty);
    let moved = map.translate_spans(&spans);

    let segments = compute_segments(pretty, &moved);
    let cited: Vec<&str> = segments
        .iter()
        .filter(|s| s.is_cited())
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(cited, vec!["café"]);
}

#[test]
fn test_utf16_offsets_for_js() {
    let text = "😀 cat";
    let mut matcher = CitationMatcher::default();
    let spans = matcher.match_citations(text, &[cite(0, 0, 0, "cat")]);
    let index = Utf16Index::new(text);
    let js_spans = index.spans_to_utf16(&spans);
    // Emoji is two UTF-16 units, then a space
    assert_eq!(js_spans, vec![CitationSpan::new(3, 6, "0-0-0-0")]);
}
