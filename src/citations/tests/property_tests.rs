//! Invariants over generated text, span sets and JSON documents

use proptest::prelude::*;
use serde_json::Value;

use crate::citations::segment::{ceil_char_boundary, floor_char_boundary};
use crate::citations::{compute_segments, slice_spans, CitationSpan, PositionMap};

/// Raw offsets, deliberately allowed past the text and inside multi-byte chars
fn arb_spans(max_offset: usize, max_count: usize) -> impl Strategy<Value = Vec<CitationSpan>> {
    proptest::collection::vec((0..max_offset, 0..max_offset, 0..4u8), 0..max_count).prop_map(
        |raw| {
            raw.into_iter()
                .map(|(start, end, id)| CitationSpan::new(start, end, format!("c{}", id)))
                .collect()
        },
    )
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "\\PC{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::vec(("[a-zé ]{0,6}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Span bounds as the segmenter sees them
fn effective_range(text: &str, span: &CitationSpan) -> (usize, usize) {
    let len = text.len();
    (
        floor_char_boundary(text, span.start.min(len)),
        ceil_char_boundary(text, span.end.min(len)),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn segments_reconstruct_text(
        text in "\\PC{0,60}",
        spans in arb_spans(256, 8),
    ) {
        let segments = compute_segments(&text, &spans);
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn segment_ids_match_covering_spans(
        text in "\\PC{0,60}",
        spans in arb_spans(256, 6),
    ) {
        let segments = compute_segments(&text, &spans);

        let mut offset = 0;
        for segment in &segments {
            let (start, end) = (offset, offset + segment.text.len());
            let mut expected: Vec<String> = spans
                .iter()
                .filter(|s| {
                    let (s_start, s_end) = effective_range(&text, s);
                    s_start < s_end && s_start <= start && s_end >= end
                })
                .map(|s| s.citation_id.clone())
                .collect();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(&segment.citation_ids, &expected);
            offset = end;
        }
        prop_assert_eq!(offset, text.len());
    }

    #[test]
    fn sliced_spans_stay_in_window(
        spans in arb_spans(120, 10),
        slice_start in 0..120usize,
        slice_end in 0..120usize,
    ) {
        let sliced = slice_spans(&spans, slice_start, slice_end);
        if slice_start >= slice_end {
            prop_assert!(sliced.is_empty());
        }
        for s in &sliced {
            prop_assert!(s.start < s.end);
            prop_assert!(s.end <= slice_end - slice_start);
        }
    }

    #[test]
    fn remap_preserves_non_whitespace_content(value in arb_json()) {
        let raw = serde_json::to_string(&value).unwrap();
        let pretty = serde_json::to_string_pretty(&value).unwrap();
        let map = PositionMap::build(&raw, &pretty);
        prop_assert!(map.is_aligned());

        for (i, c) in raw.char_indices() {
            if c.is_whitespace() {
                continue;
            }
            let mapped = map.map_offset(i);
            prop_assert_eq!(pretty[mapped..].chars().next(), Some(c), "offset {}", i);
        }
    }
}
