//! Render descriptors for segmented, highlightable text
//!
//! The JS presentation layer turns each [`RenderedSegment`] into either a
//! plain text node or a clickable span. Colours come from a palette chosen by
//! message role; the active colour marks segments containing the externally
//! highlighted citation id.

use serde::{Deserialize, Serialize};

use super::types::{Citation, CitationSpan, TextSegment};

// =============================================================================
// Palettes
// =============================================================================

/// Author role of the message being rendered
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

impl Role {
    /// Case-insensitive; unknown roles yield `None` (neutral palette)
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_ascii_lowercase().as_str() {
            "user" | "human" => Some(Role::User),
            "assistant" | "ai" => Some(Role::Assistant),
            "system" => Some(Role::System),
            "tool" => Some(Role::Tool),
            _ => None,
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighlightStyle {
    pub background: &'static str,
    pub border: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub idle: HighlightStyle,
    pub active: HighlightStyle,
}

const NEUTRAL: Palette = Palette {
    idle: HighlightStyle { background: "#fef9c3", border: "#fde047" },
    active: HighlightStyle { background: "#fde047", border: "#ca8a04" },
};

const USER: Palette = Palette {
    idle: HighlightStyle { background: "#dbeafe", border: "#93c5fd" },
    active: HighlightStyle { background: "#93c5fd", border: "#2563eb" },
};

const ASSISTANT: Palette = Palette {
    idle: HighlightStyle { background: "#fef3c7", border: "#fcd34d" },
    active: HighlightStyle { background: "#fcd34d", border: "#d97706" },
};

const SYSTEM: Palette = Palette {
    idle: HighlightStyle { background: "#f3f4f6", border: "#d1d5db" },
    active: HighlightStyle { background: "#d1d5db", border: "#4b5563" },
};

const TOOL: Palette = Palette {
    idle: HighlightStyle { background: "#dcfce7", border: "#86efac" },
    active: HighlightStyle { background: "#86efac", border: "#16a34a" },
};

pub fn palette_for(role: Option<Role>) -> Palette {
    match role {
        Some(Role::User) => USER,
        Some(Role::Assistant) => ASSISTANT,
        Some(Role::System) => SYSTEM,
        Some(Role::Tool) => TOOL,
        None => NEUTRAL,
    }
}

// =============================================================================
// Rendering
// =============================================================================

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RenderedSegment {
    pub text: String,
    pub citation_ids: Vec<String>,
    pub highlighted: bool,
    /// `None` for uncited text
    pub style: Option<HighlightStyle>,
}

/// Attach palette colours and highlight state to segments
pub fn render_segments(
    segments: Vec<TextSegment>,
    role: Option<Role>,
    highlighted_citation_id: Option<&str>,
) -> Vec<RenderedSegment> {
    let palette = palette_for(role);
    segments
        .into_iter()
        .map(|segment| {
            if !segment.is_cited() {
                return RenderedSegment {
                    text: segment.text,
                    citation_ids: Vec::new(),
                    highlighted: false,
                    style: None,
                };
            }
            let highlighted = highlighted_citation_id
                .is_some_and(|id| segment.citation_ids.iter().any(|c| c == id));
            RenderedSegment {
                text: segment.text,
                citation_ids: segment.citation_ids,
                highlighted,
                style: Some(if highlighted { palette.active } else { palette.idle }),
            }
        })
        .collect()
}

/// Segment `text` with the supplied segmenter, then render
pub fn render_text<F>(
    text: &str,
    spans: &[CitationSpan],
    segmenter: F,
    role: Option<Role>,
    highlighted_citation_id: Option<&str>,
) -> Vec<RenderedSegment>
where
    F: Fn(&str, &[CitationSpan]) -> Vec<TextSegment>,
{
    render_segments(segmenter(text, spans), role, highlighted_citation_id)
}

// =============================================================================
// Interaction
// =============================================================================

/// Currently highlighted citation, driven by hover/selection elsewhere in the UI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    highlighted: Option<String>,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight(&mut self, citation_id: impl Into<String>) {
        self.highlighted = Some(citation_id.into());
    }

    pub fn clear(&mut self) {
        self.highlighted = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn is_highlighted(&self, citation_id: &str) -> bool {
        self.highlighted.as_deref() == Some(citation_id)
    }
}

/// Citation a click on a segment should navigate to.
///
/// Prefers the highlighted citation when the segment carries it, otherwise the
/// first id of the segment.
pub fn resolve_click<'a>(
    citation_ids: &[String],
    citations: &'a [Citation],
    highlighted_citation_id: Option<&str>,
) -> Option<&'a Citation> {
    let target = highlighted_citation_id
        .filter(|h| citation_ids.iter().any(|id| id == h))
        .or_else(|| citation_ids.first().map(String::as_str))?;
    citations.iter().find(|c| c.id() == target)
}
