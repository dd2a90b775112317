//! PositionMap: offset alignment between a text and its whitespace-reformatted copy
//!
//! Spans are computed against one rendering (e.g. compact JSON) but displayed
//! against another (pretty-printed JSON). Pretty-printing only inserts or
//! removes whitespace, so a two-cursor walk aligns every original character
//! with its counterpart in the transformed text.
//!
//! Offsets are UTF-8 byte offsets; every byte of an original character maps to
//! the start of its transformed counterpart.

use super::types::CitationSpan;

/// First non-whitespace mismatch found while aligning, plus the total count.
///
/// Means the transform did more than reformat whitespace; later mappings are
/// best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentFailure {
    pub original_offset: usize,
    pub transformed_offset: usize,
    pub expected: char,
    pub found: char,
    pub mismatches: usize,
}

impl std::fmt::Display for AlignmentFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "alignment failed at original offset {} (expected {:?}, found {:?} at {}); {} mismatch(es)",
            self.original_offset, self.expected, self.found, self.transformed_offset, self.mismatches
        )
    }
}

#[derive(Debug, Clone)]
pub struct PositionMap {
    /// Original byte -> transformed start offset
    starts: Vec<usize>,
    /// Original byte -> transformed offset one character past the mapped position
    ends: Vec<usize>,
    transformed_len: usize,
    failure: Option<AlignmentFailure>,
}

impl PositionMap {
    /// Align `original` against `transformed`.
    ///
    /// Never fails: mismatches are recorded in [`PositionMap::failure`] and the
    /// walk continues. Original positions left over once `transformed` is
    /// exhausted map to its end.
    pub fn build(original: &str, transformed: &str) -> Self {
        let transformed_len = transformed.len();
        let mut starts = vec![transformed_len; original.len()];
        let mut ends = vec![transformed_len; original.len()];
        let mut failure: Option<AlignmentFailure> = None;

        let mut orig = original.char_indices().peekable();
        let mut trans = transformed.char_indices().peekable();

        while let (Some(&(oi, oc)), Some(&(ti, tc))) = (orig.peek(), trans.peek()) {
            let o_ws = oc.is_whitespace();
            let t_ws = tc.is_whitespace();
            let t_end = ti + tc.len_utf8();

            if oc == tc || (o_ws && t_ws) {
                fill(&mut starts, &mut ends, oi, oc.len_utf8(), ti, t_end);
                orig.next();
                trans.next();
            } else if t_ws {
                // Padding inserted by the transform
                trans.next();
            } else if o_ws {
                // Whitespace removed by the transform
                fill(&mut starts, &mut ends, oi, oc.len_utf8(), ti, t_end);
                orig.next();
            } else {
                match failure.as_mut() {
                    Some(f) => f.mismatches += 1,
                    None => {
                        failure = Some(AlignmentFailure {
                            original_offset: oi,
                            transformed_offset: ti,
                            expected: oc,
                            found: tc,
                            mismatches: 1,
                        })
                    }
                }
                fill(&mut starts, &mut ends, oi, oc.len_utf8(), ti, t_end);
                orig.next();
                trans.next();
            }
        }

        Self {
            starts,
            ends,
            transformed_len,
            failure,
        }
    }

    pub fn failure(&self) -> Option<&AlignmentFailure> {
        self.failure.as_ref()
    }

    pub fn is_aligned(&self) -> bool {
        self.failure.is_none()
    }

    /// Map an original offset to the transformed text
    pub fn map_offset(&self, pos: usize) -> usize {
        self.starts.get(pos).copied().unwrap_or(self.transformed_len)
    }

    /// Translate one span; `None` if it becomes empty or inverted
    pub fn translate_span(&self, span: &CitationSpan) -> Option<CitationSpan> {
        if span.start >= span.end {
            return None;
        }
        let start = self.map_offset(span.start);
        let end = self
            .ends
            .get(span.end - 1)
            .copied()
            .unwrap_or(self.transformed_len);
        (start < end).then(|| CitationSpan::new(start, end, span.citation_id.clone()))
    }

    pub fn translate_spans(&self, spans: &[CitationSpan]) -> Vec<CitationSpan> {
        spans.iter().filter_map(|s| self.translate_span(s)).collect()
    }
}

fn fill(starts: &mut [usize], ends: &mut [usize], at: usize, width: usize, start: usize, end: usize) {
    for i in at..at + width {
        starts[i] = start;
        ends[i] = end;
    }
}
