//! UTF-8 <-> UTF-16 offset conversion
//!
//! JavaScript indexes strings in UTF-16 code units, Rust in UTF-8 bytes.
//! Spans cross the WASM boundary in UTF-16 and are processed internally in
//! bytes.

use super::types::CitationSpan;

pub struct Utf16Index {
    /// Byte offset of every char start, plus the text length
    bytes: Vec<usize>,
    /// UTF-16 offset of every char start, plus the UTF-16 length
    units: Vec<usize>,
    ascii: bool,
}

impl Utf16Index {
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                bytes: vec![text.len()],
                units: vec![text.len()],
                ascii: true,
            };
        }

        let mut bytes = Vec::with_capacity(text.len() + 1);
        let mut units = Vec::with_capacity(text.len() + 1);
        let mut unit = 0;
        for (i, c) in text.char_indices() {
            bytes.push(i);
            units.push(unit);
            unit += c.len_utf16();
        }
        bytes.push(text.len());
        units.push(unit);

        Self { bytes, units, ascii: false }
    }

    pub fn utf16_len(&self) -> usize {
        self.units.last().copied().unwrap_or(0)
    }

    /// Byte offset -> UTF-16 offset (mid-character offsets round down)
    pub fn to_utf16(&self, byte: usize) -> usize {
        if self.ascii {
            return byte.min(self.utf16_len());
        }
        match self.bytes.binary_search(&byte) {
            Ok(i) => self.units[i],
            Err(0) => 0,
            Err(i) if i >= self.bytes.len() => self.utf16_len(),
            Err(i) => self.units[i - 1],
        }
    }

    /// UTF-16 offset -> byte offset (offsets inside a surrogate pair round down)
    pub fn to_byte(&self, unit: usize) -> usize {
        let text_len = self.bytes.last().copied().unwrap_or(0);
        if self.ascii {
            return unit.min(text_len);
        }
        match self.units.binary_search(&unit) {
            Ok(i) => self.bytes[i],
            Err(0) => 0,
            Err(i) if i >= self.units.len() => text_len,
            Err(i) => self.bytes[i - 1],
        }
    }

    pub fn spans_to_utf16(&self, spans: &[CitationSpan]) -> Vec<CitationSpan> {
        spans
            .iter()
            .map(|s| CitationSpan::new(self.to_utf16(s.start), self.to_utf16(s.end), s.citation_id.clone()))
            .collect()
    }

    pub fn spans_to_bytes(&self, spans: &[CitationSpan]) -> Vec<CitationSpan> {
        spans
            .iter()
            .map(|s| CitationSpan::new(self.to_byte(s.start), self.to_byte(s.end), s.citation_id.clone()))
            .collect()
    }
}
