//! CitationHighlighter - JS-facing facade over the citation pipeline
//!
//! All offsets exchanged with JavaScript are UTF-16 code units; conversion to
//! and from UTF-8 byte offsets happens here and nowhere else.
//!
//! # Usage (JavaScript)
//! ```javascript
//! import init, { CitationHighlighter } from 'citecore';
//!
//! await init();
//! const highlighter = new CitationHighlighter();
//! const { spans, stats } = highlighter.matchCitations(text, citations);
//! const segments = highlighter.renderCitations(text, citations, 'assistant');
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Range;
use wasm_bindgen::prelude::*;

use crate::citations::{
    compute_segments, find_pattern_spans, highlight_metadata_value, pretty_print_json,
    render_segments, resolve_click, segment_window, slice_spans, Citation, CitationMatcher,
    CitationSpan, HighlightState, MatcherConfig, PositionMap, RenderedSegment, Role,
    TextSegment, Utf16Index,
};

// ==================== TYPE DEFINITIONS ====================

/// Result of `matchCitations`
#[derive(Serialize)]
pub struct MatchResult {
    pub spans: Vec<CitationSpan>,
    pub stats: MatchStats,
}

/// Performance statistics for one match call
#[derive(Serialize)]
pub struct MatchStats {
    pub total_time_ms: f64,
    pub text_length: usize,
    pub citation_count: usize,
    pub span_count: usize,
    pub cache_hit: bool,
}

/// Result of the ad-hoc highlight calls
#[derive(Serialize)]
pub struct PatternHighlight {
    pub text: String,
    pub spans: Vec<CitationSpan>,
    pub segments: Vec<TextSegment>,
}

/// Result of `remapSpans`
#[derive(Serialize)]
pub struct RemapResult {
    pub spans: Vec<CitationSpan>,
    pub aligned: bool,
}

#[derive(Deserialize)]
struct SpanInput {
    start: usize,
    end: usize,
    #[serde(default)]
    citation_id: String,
}

impl From<SpanInput> for CitationSpan {
    fn from(s: SpanInput) -> Self {
        CitationSpan::new(s.start, s.end, s.citation_id)
    }
}

// ==================== MAIN IMPLEMENTATION ====================

/// CitationHighlighter - matching, segmentation and highlight state for one view
#[wasm_bindgen]
pub struct CitationHighlighter {
    matcher: CitationMatcher,
    highlight: HighlightState,
}

#[wasm_bindgen]
impl CitationHighlighter {
    /// Create a new CitationHighlighter with optional configuration
    ///
    /// # Arguments
    /// * `config` - Optional `{ max_matches_per_citation?, cache_capacity? }`
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CitationHighlighter, JsValue> {
        let config: MatcherConfig = if config.is_null() || config.is_undefined() {
            MatcherConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        Ok(Self {
            matcher: CitationMatcher::new(config),
            highlight: HighlightState::new(),
        })
    }

    /// Locate every citation pattern in `text`
    ///
    /// Returns `{ spans, stats }` with UTF-16 offsets.
    #[wasm_bindgen(js_name = matchCitations)]
    pub fn js_match_citations(&mut self, text: &str, citations: JsValue) -> Result<JsValue, JsValue> {
        let citations = parse_citations(citations)?;
        let start = js_sys::Date::now();
        let hits_before = self.matcher.stats().cache.hits;

        let spans = self.matcher.match_citations(text, &citations);
        let index = Utf16Index::new(text);

        let result = MatchResult {
            stats: MatchStats {
                total_time_ms: js_sys::Date::now() - start,
                text_length: index.utf16_len(),
                citation_count: citations.len(),
                span_count: spans.len(),
                cache_hit: self.matcher.stats().cache.hits > hits_before,
            },
            spans: index.spans_to_utf16(&spans),
        };

        to_js(&result)
    }

    /// Match and segment in one call
    #[wasm_bindgen(js_name = segmentCitations)]
    pub fn js_segment_citations(&mut self, text: &str, citations: JsValue) -> Result<JsValue, JsValue> {
        let citations = parse_citations(citations)?;
        let segments = self.segment(text, &citations);
        to_js(&segments)
    }

    /// Match, segment and attach palette colours
    ///
    /// # Arguments
    /// * `role` - Message role selecting the palette (neutral when absent/unknown)
    /// * `highlighted_id` - Overrides the stored highlight when given
    #[wasm_bindgen(js_name = renderCitations)]
    pub fn js_render_citations(
        &mut self,
        text: &str,
        citations: JsValue,
        role: Option<String>,
        highlighted_id: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let citations = parse_citations(citations)?;
        let rendered = self.render(text, &citations, role.as_deref(), highlighted_id.as_deref());
        to_js(&rendered)
    }

    /// Render only `text[window_start..window_end)` (UTF-16 offsets)
    ///
    /// `role` and `highlighted_id` behave as in `renderCitations`.
    #[wasm_bindgen(js_name = renderWindow)]
    pub fn js_render_window(
        &mut self,
        text: &str,
        citations: JsValue,
        window_start: usize,
        window_end: usize,
        role: Option<String>,
        highlighted_id: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let citations = parse_citations(citations)?;
        let index = Utf16Index::new(text);
        let window = index.to_byte(window_start)..index.to_byte(window_end);
        let rendered = self.render_window(
            text,
            &citations,
            window,
            role.as_deref(),
            highlighted_id.as_deref(),
        );
        to_js(&rendered)
    }

    /// Highlight an arbitrary JSON-ish pattern in `text` (uncached)
    #[wasm_bindgen(js_name = highlightPattern)]
    pub fn js_highlight_pattern(&self, text: &str, pattern: &str) -> Result<JsValue, JsValue> {
        let spans = find_pattern_spans(text, pattern);
        let segments = compute_segments(text, &spans);
        let index = Utf16Index::new(text);
        to_js(&PatternHighlight {
            text: text.to_string(),
            spans: index.spans_to_utf16(&spans),
            segments,
        })
    }

    /// Pretty-print a metadata value and highlight `pattern` inside it
    #[wasm_bindgen(js_name = highlightMetadata)]
    pub fn js_highlight_metadata(&self, value: JsValue, pattern: &str) -> Result<JsValue, JsValue> {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid metadata value: {}", e)))?;

        let highlight = highlight_metadata_value(&value, pattern);
        let segments = compute_segments(&highlight.text, &highlight.spans);
        let index = Utf16Index::new(&highlight.text);
        to_js(&PatternHighlight {
            spans: index.spans_to_utf16(&highlight.spans),
            text: highlight.text,
            segments,
        })
    }

    /// Clip spans to `[slice_start, slice_end)` and rebase them
    #[wasm_bindgen(js_name = sliceSpans)]
    pub fn js_slice_spans(spans: JsValue, slice_start: usize, slice_end: usize) -> Result<JsValue, JsValue> {
        let spans = parse_spans(spans)?;
        to_js(&slice_spans(&spans, slice_start, slice_end))
    }

    /// Translate spans computed against `original` onto `transformed`
    ///
    /// Alignment failures are logged as warnings; the result is best-effort.
    #[wasm_bindgen(js_name = remapSpans)]
    pub fn js_remap_spans(original: &str, transformed: &str, spans: JsValue) -> Result<JsValue, JsValue> {
        let spans = parse_spans(spans)?;
        let original_index = Utf16Index::new(original);
        let transformed_index = Utf16Index::new(transformed);

        let map = PositionMap::build(original, transformed);
        if let Some(failure) = map.failure() {
            web_sys::console::warn_1(&format!("[CitationHighlighter] Remap: {}", failure).into());
        }

        let translated = map.translate_spans(&original_index.spans_to_bytes(&spans));
        to_js(&RemapResult {
            spans: transformed_index.spans_to_utf16(&translated),
            aligned: map.is_aligned(),
        })
    }

    /// Re-indent raw JSON with two-space indentation
    #[wasm_bindgen(js_name = prettyPrintJson)]
    pub fn js_pretty_print_json(raw: &str) -> Result<String, JsValue> {
        pretty_print_json(raw).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Derived citation id `"{transcript_idx}-{block_idx}-{start_idx}-{end_idx}"`
    #[wasm_bindgen(js_name = citationId)]
    pub fn js_citation_id(citation: JsValue) -> Result<String, JsValue> {
        let citation: Citation = serde_wasm_bindgen::from_value(citation)
            .map_err(|e| JsValue::from_str(&format!("Invalid citation: {}", e)))?;
        Ok(citation.id())
    }

    #[wasm_bindgen(js_name = setHighlighted)]
    pub fn set_highlighted(&mut self, citation_id: &str) {
        self.highlight.highlight(citation_id);
    }

    #[wasm_bindgen(js_name = clearHighlighted)]
    pub fn clear_highlighted(&mut self) {
        self.highlight.clear();
    }

    #[wasm_bindgen(js_name = getHighlighted)]
    pub fn get_highlighted(&self) -> Option<String> {
        self.highlight.current().map(str::to_string)
    }

    /// Citation to navigate to when a segment carrying `citation_ids` is clicked
    ///
    /// Returns `null` when no citation matches.
    #[wasm_bindgen(js_name = resolveClick)]
    pub fn js_resolve_click(&self, citation_ids: JsValue, citations: JsValue) -> Result<JsValue, JsValue> {
        let ids: Vec<String> = serde_wasm_bindgen::from_value(citation_ids)
            .map_err(|e| JsValue::from_str(&format!("Invalid citation ids: {}", e)))?;
        let citations = parse_citations(citations)?;

        match resolve_click(&ids, &citations, self.highlight.current()) {
            Some(citation) => to_js(citation),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = clearCache)]
    pub fn clear_cache(&mut self) {
        self.matcher.clear_cache();
    }

    #[wasm_bindgen(js_name = getCacheStats)]
    pub fn get_cache_stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.matcher.stats())
    }
}

impl CitationHighlighter {
    /// Native constructor (no JS config parsing)
    pub fn with_config(config: MatcherConfig) -> Self {
        Self {
            matcher: CitationMatcher::new(config),
            highlight: HighlightState::new(),
        }
    }

    /// Segments for `text`, byte offsets
    pub fn segment(&mut self, text: &str, citations: &[Citation]) -> Vec<TextSegment> {
        let spans = self.matcher.match_citations(text, citations);
        compute_segments(text, &spans)
    }

    /// Render descriptors; `highlighted_id` falls back to the stored highlight
    pub fn render(
        &mut self,
        text: &str,
        citations: &[Citation],
        role: Option<&str>,
        highlighted_id: Option<&str>,
    ) -> Vec<RenderedSegment> {
        let segments = self.segment(text, citations);
        let role = role.and_then(Role::parse);
        let highlighted = highlighted_id.or(self.highlight.current());
        render_segments(segments, role, highlighted)
    }

    /// Render descriptors for the byte range `window` of `text`
    pub fn render_window(
        &mut self,
        text: &str,
        citations: &[Citation],
        window: Range<usize>,
        role: Option<&str>,
        highlighted_id: Option<&str>,
    ) -> Vec<RenderedSegment> {
        let spans = self.matcher.match_citations(text, citations);
        let segments = segment_window(text, &spans, window);
        let role = role.and_then(Role::parse);
        let highlighted = highlighted_id.or(self.highlight.current());
        render_segments(segments, role, highlighted)
    }
}

// ==================== HELPERS ====================

fn parse_citations(citations: JsValue) -> Result<Vec<Citation>, JsValue> {
    if citations.is_null() || citations.is_undefined() {
        return Ok(Vec::new());
    }
    serde_wasm_bindgen::from_value(citations)
        .map_err(|e| JsValue::from_str(&format!("Invalid citations: {}", e)))
}

fn parse_spans(spans: JsValue) -> Result<Vec<CitationSpan>, JsValue> {
    let spans: Vec<SpanInput> = serde_wasm_bindgen::from_value(spans)
        .map_err(|e| JsValue::from_str(&format!("Invalid spans: {}", e)))?;
    Ok(spans.into_iter().map(CitationSpan::from).collect())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        web_sys::console::error_1(&format!("[CitationHighlighter] Serialization failed: {:?}", e).into());
        JsValue::from_str(&format!("Serialization error: {}", e))
    })
}
