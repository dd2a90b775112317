//! Interval merger: overlapping citation spans -> ordered text segments
//!
//! Boundary sweep over `{0, len}` plus every span start/end. At each boundary
//! the closes scheduled there are applied before the opens, then the slice up
//! to the next boundary is emitted with a snapshot of the active ids.
//!
//! Guarantees:
//! - Concatenating segment texts reproduces the input exactly
//! - Segment boundaries only occur at span starts/ends
//! - `citation_ids` is sorted and constant within a segment

use std::collections::{BTreeMap, BTreeSet};

use super::types::{CitationSpan, TextSegment};

/// Split `text` into segments according to `spans`.
///
/// Zero-width or inverted spans are ignored. Offsets past the end of the text
/// are clamped and offsets inside a multi-byte character are widened to the
/// enclosing character.
pub fn compute_segments(text: &str, spans: &[CitationSpan]) -> Vec<TextSegment> {
    let len = text.len();

    let mut opens: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    let mut closes: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    let mut boundaries: BTreeSet<usize> = BTreeSet::new();

    for span in spans {
        let start = floor_char_boundary(text, span.start.min(len));
        let end = ceil_char_boundary(text, span.end.min(len));
        if start >= end {
            continue;
        }
        opens.entry(start).or_default().push(span.citation_id.as_str());
        closes.entry(end).or_default().push(span.citation_id.as_str());
        boundaries.insert(start);
        boundaries.insert(end);
    }

    if boundaries.is_empty() {
        return vec![TextSegment {
            text: text.to_string(),
            citation_ids: Vec::new(),
        }];
    }

    boundaries.insert(0);
    boundaries.insert(len);
    let boundaries: Vec<usize> = boundaries.into_iter().collect();

    // Reference counted so overlapping spans of one citation keep it active
    let mut active: BTreeMap<&str, usize> = BTreeMap::new();
    let mut segments = Vec::with_capacity(boundaries.len());

    for pair in boundaries.windows(2) {
        let (from, to) = (pair[0], pair[1]);

        if let Some(ids) = closes.get(&from) {
            for id in ids {
                let remaining = match active.get_mut(id) {
                    Some(count) => {
                        *count -= 1;
                        *count
                    }
                    None => continue,
                };
                if remaining == 0 {
                    active.remove(id);
                }
            }
        }
        if let Some(ids) = opens.get(&from) {
            for id in ids {
                *active.entry(*id).or_insert(0) += 1;
            }
        }

        segments.push(TextSegment {
            text: text[from..to].to_string(),
            citation_ids: active.keys().map(|id| id.to_string()).collect(),
        });
    }

    segments
}

pub(crate) fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

pub(crate) fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
