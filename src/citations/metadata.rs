//! Metadata highlighting: JSON blobs attached to transcripts
//!
//! Metadata values are displayed pretty-printed while judge citations quote
//! them in whatever shape the model saw (usually compact). Matching therefore
//! runs in JSON-aware mode, and spans computed against the raw text can be
//! carried over to the pretty rendering via [`PositionMap`].

use serde_json::Value;

use super::error::CiteError;
use super::matcher::find_pattern_spans;
use super::remap::{AlignmentFailure, PositionMap};
use super::types::{Citation, CitationSpan, CitationTarget};

/// A metadata value ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataHighlight {
    pub text: String,
    pub spans: Vec<CitationSpan>,
}

/// Spans translated onto a pretty-printed copy of the source
#[derive(Debug, Clone, PartialEq)]
pub struct RemappedText {
    pub text: String,
    pub spans: Vec<CitationSpan>,
    pub failure: Option<AlignmentFailure>,
}

/// Re-indent a raw JSON document with two-space indentation
pub fn pretty_print_json(raw: &str) -> Result<String, CiteError> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Display form of a metadata value: strings unquoted, everything else pretty JSON
pub fn format_metadata_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Format `value` and locate `pattern` in it (JSON-aware, uncached)
pub fn highlight_metadata_value(value: &Value, pattern: &str) -> MetadataHighlight {
    let text = format_metadata_value(value);
    let spans = find_pattern_spans(&text, pattern);
    MetadataHighlight { text, spans }
}

/// Citations pointing at the metadata field `key`
pub fn metadata_citations<'a>(citations: &'a [Citation], key: &str) -> Vec<&'a Citation> {
    citations
        .iter()
        .filter(|c| matches!(c.target(), CitationTarget::Metadata { key: k, .. } if k == key))
        .collect()
}

/// Pretty-print `raw` and move `spans` (computed against `raw`) onto it
pub fn remap_to_pretty(raw: &str, spans: &[CitationSpan]) -> Result<RemappedText, CiteError> {
    let text = pretty_print_json(raw)?;
    let map = PositionMap::build(raw, &text);
    Ok(RemappedText {
        spans: map.translate_spans(spans),
        failure: map.failure().copied(),
        text,
    })
}
