//! CiteCore: Citation Matching + Highlighting Engine
//!
//! A Rust/WASM implementation of the transcript viewer's citation pipeline.
//!
//! # Architecture
//!
//! ## Citation Components
//! - `pattern.rs` - Whitespace-tolerant pattern compiler (plain text + JSON-aware)
//! - `matcher.rs` - CitationMatcher: per-citation scanning with a bounded match cap
//! - `cache.rs` - MatchCache: LRU cache keyed by text hash + citation signature
//! - `segment.rs` - Boundary sweep turning overlapping spans into segments
//! - `slice.rs` - Window clipping for virtualized rendering
//! - `remap.rs` - PositionMap: original -> pretty-printed offset alignment
//! - `render.rs` - Render descriptors, role palettes, highlight state
//! - `metadata.rs` - JSON metadata pretty-printing + ad-hoc highlighting
//! - `offsets.rs` - UTF-8 <-> UTF-16 offset bridge for the JS boundary
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { CitationHighlighter } from 'citecore';
//!
//! await init();
//!
//! const highlighter = new CitationHighlighter({ max_matches_per_citation: 200 });
//!
//! const rendered = highlighter.renderCitations(
//!   "The cat sat on the mat",
//!   [
//!     { transcript_idx: 0, block_idx: 1, start_idx: 4, end_idx: 7, start_pattern: "cat" },
//!     { transcript_idx: 0, block_idx: 1, start_idx: 19, end_idx: 22, start_pattern: "mat" },
//!   ],
//!   "assistant",
//!   "0-1-4-7",
//! );
//!
//! // [{ text: "The ", citation_ids: [] }, { text: "cat", citation_ids: ["0-1-4-7"], highlighted: true, ... }, ...]
//! console.log(rendered);
//! ```

pub mod citations;
pub mod wasm;

// Public exports - Citations
pub use citations::*;

// Public exports - WASM surface
pub use wasm::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("citecore v{}", env!("CARGO_PKG_VERSION"))
}
