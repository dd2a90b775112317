//! Error type shared by the citation pipeline.
//!
//! Only pattern compilation and JSON parsing can fail. Alignment problems and
//! degenerate spans are data, not errors (see `remap.rs` and `segment.rs`).

#[derive(Debug, Clone, PartialEq)]
pub enum CiteError {
    /// Compiler was handed an empty pattern
    EmptyPattern,
    /// Generated regex was rejected (size limit, etc.)
    InvalidPattern(String),
    /// Metadata text could not be parsed as JSON
    InvalidJson(String),
}

impl std::fmt::Display for CiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CiteError::EmptyPattern => write!(f, "Empty citation pattern"),
            CiteError::InvalidPattern(msg) => write!(f, "Invalid citation pattern: {}", msg),
            CiteError::InvalidJson(msg) => write!(f, "Invalid JSON: {}", msg),
        }
    }
}

impl std::error::Error for CiteError {}

impl From<regex::Error> for CiteError {
    fn from(e: regex::Error) -> Self {
        CiteError::InvalidPattern(e.to_string())
    }
}

impl From<serde_json::Error> for CiteError {
    fn from(e: serde_json::Error) -> Self {
        CiteError::InvalidJson(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(CiteError::EmptyPattern.to_string(), "Empty citation pattern");
        assert!(CiteError::InvalidJson("eof".into()).to_string().contains("eof"));
    }

    #[test]
    fn test_from_serde_json() {
        let err: CiteError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, CiteError::InvalidJson(_)));
    }
}
