//! Core data structures: citations, located spans and text segments.

use serde::{Deserialize, Serialize};

// =============================================================================
// Citation
// =============================================================================

/// A reference to a span of source material, as sent by the transcript API.
///
/// `start_idx`/`end_idx` are hints against some canonical text and are never
/// used for rendering directly; live spans come from `start_pattern`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default)]
    pub start_idx: usize,
    #[serde(default)]
    pub end_idx: usize,
    #[serde(default)]
    pub transcript_idx: Option<usize>,
    #[serde(default)]
    pub block_idx: Option<usize>,
    #[serde(default)]
    pub metadata_key: Option<String>,
    #[serde(default)]
    pub start_pattern: Option<String>,
}

/// What a citation points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationTarget<'a> {
    /// Prose inside a transcript message block
    Block {
        transcript_idx: Option<usize>,
        block_idx: Option<usize>,
    },
    /// A structured-metadata field
    Metadata {
        transcript_idx: Option<usize>,
        key: &'a str,
    },
    /// Neither a block nor a metadata key
    Unanchored,
}

impl Citation {
    /// Derived identity: `"{transcript_idx}-{block_idx}-{start_idx}-{end_idx}"`.
    ///
    /// Absent indices render as `_`.
    pub fn id(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            fmt_index(self.transcript_idx),
            fmt_index(self.block_idx),
            self.start_idx,
            self.end_idx
        )
    }

    /// Pattern to search for, if it is non-empty
    pub fn pattern(&self) -> Option<&str> {
        self.start_pattern.as_deref().filter(|p| !p.is_empty())
    }

    pub fn target(&self) -> CitationTarget<'_> {
        match (&self.metadata_key, self.block_idx, self.transcript_idx) {
            (Some(key), _, transcript_idx) => CitationTarget::Metadata {
                transcript_idx,
                key: key.as_str(),
            },
            (None, None, None) => CitationTarget::Unanchored,
            (None, block_idx, transcript_idx) => CitationTarget::Block {
                transcript_idx,
                block_idx,
            },
        }
    }

    /// True if this citation refers to the same source span as `other`
    pub fn same_identity(&self, other: &Citation) -> bool {
        self.transcript_idx == other.transcript_idx
            && self.block_idx == other.block_idx
            && self.start_idx == other.start_idx
            && self.end_idx == other.end_idx
    }
}

fn fmt_index(idx: Option<usize>) -> String {
    match idx {
        Some(i) => i.to_string(),
        None => "_".to_string(),
    }
}

// =============================================================================
// Spans and segments
// =============================================================================

/// A located match: half-open `[start, end)` byte range tagged with a citation id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitationSpan {
    pub start: usize,
    pub end: usize,
    pub citation_id: String,
}

impl CitationSpan {
    pub fn new(start: usize, end: usize, citation_id: impl Into<String>) -> Self {
        Self {
            start,
            end,
            citation_id: citation_id.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Zero-width or inverted
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A contiguous slice of text with the ids of every citation covering it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub citation_ids: Vec<String>,
}

impl TextSegment {
    pub fn is_cited(&self) -> bool {
        !self.citation_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_id_format() {
        let c = Citation {
            start_idx: 4,
            end_idx: 7,
            transcript_idx: Some(0),
            block_idx: Some(2),
            ..Default::default()
        };
        assert_eq!(c.id(), "0-2-4-7");
    }

    #[test]
    fn test_citation_id_missing_indices() {
        let c = Citation {
            start_idx: 1,
            end_idx: 3,
            ..Default::default()
        };
        assert_eq!(c.id(), "_-_-1-3");
    }

    #[test]
    fn test_parse_js_shape() {
        let json = r#"{"start_idx": 4, "end_idx": 7, "transcript_idx": 0, "block_idx": 1, "start_pattern": "cat"}"#;
        let c: Citation = serde_json::from_str(json).unwrap();
        assert_eq!(c.pattern(), Some("cat"));
        assert!(c.metadata_key.is_none());
    }

    #[test]
    fn test_parse_nulls() {
        let json = r#"{"start_idx": 0, "end_idx": 0, "transcript_idx": null, "block_idx": null, "start_pattern": null}"#;
        let c: Citation = serde_json::from_str(json).unwrap();
        assert_eq!(c.pattern(), None);
        assert_eq!(c.target(), CitationTarget::Unanchored);
    }

    #[test]
    fn test_empty_pattern_is_none() {
        let c = Citation {
            start_pattern: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(c.pattern(), None);
    }

    #[test]
    fn test_target_discrimination() {
        let meta = Citation {
            transcript_idx: Some(3),
            metadata_key: Some("scores".into()),
            ..Default::default()
        };
        assert_eq!(
            meta.target(),
            CitationTarget::Metadata { transcript_idx: Some(3), key: "scores" }
        );

        let block = Citation {
            transcript_idx: Some(3),
            block_idx: Some(5),
            ..Default::default()
        };
        assert_eq!(
            block.target(),
            CitationTarget::Block { transcript_idx: Some(3), block_idx: Some(5) }
        );
    }

    #[test]
    fn test_identity_ignores_pattern() {
        let a = Citation {
            start_idx: 1,
            end_idx: 2,
            start_pattern: Some("x".into()),
            ..Default::default()
        };
        let b = Citation {
            start_idx: 1,
            end_idx: 2,
            start_pattern: Some("y".into()),
            ..Default::default()
        };
        assert!(a.same_identity(&b));
    }
}
