//! MatchCache: LRU cache for citation match results
//!
//! Keyed by a cheap 32-bit rolling hash of the text plus the ordered
//! `(transcript_idx, block_idx, start_idx, end_idx, start_pattern)` signature
//! of the citations.
//! Values are shared immutable span lists, so a hit never copies and callers
//! cannot corrupt the stored entry.

use serde::Serialize;
use std::collections::HashMap;
use std::rc::Rc;

use super::types::{Citation, CitationSpan};

/// Separates fields inside a signature entry
const FIELD_SEP: char = '\u{1f}';
/// Separates citations inside a signature
const ENTRY_SEP: char = '\u{1e}';

/// Cache key for one (text, citation-set) computation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    text_hash: u32,
    text_len: usize,
    signature: String,
}

impl CacheKey {
    pub fn new(text: &str, citations: &[Citation]) -> Self {
        Self {
            text_hash: rolling_hash(text),
            text_len: text.len(),
            signature: citation_signature(citations),
        }
    }
}

/// 32-bit rolling hash (`h = h * 31 + c`, wrapping). Not collision resistant.
pub fn rolling_hash(text: &str) -> u32 {
    text.chars()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32))
}

/// Ordered signature of the fields that influence matching
pub fn citation_signature(citations: &[Citation]) -> String {
    let mut sig = String::new();
    for citation in citations {
        if !sig.is_empty() {
            sig.push(ENTRY_SEP);
        }
        if let Some(t) = citation.transcript_idx {
            sig.push_str(&t.to_string());
        }
        sig.push(FIELD_SEP);
        if let Some(b) = citation.block_idx {
            sig.push_str(&b.to_string());
        }
        sig.push(FIELD_SEP);
        // Part of the citation id carried by every span
        sig.push_str(&citation.start_idx.to_string());
        sig.push(FIELD_SEP);
        sig.push_str(&citation.end_idx.to_string());
        sig.push(FIELD_SEP);
        if let Some(p) = &citation.start_pattern {
            sig.push_str(p);
        }
    }
    sig
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchCacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Bounded LRU cache of match results
pub struct MatchCache {
    entries: HashMap<CacheKey, Rc<[CitationSpan]>>,
    /// Least recently used at the front
    access_order: Vec<CacheKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl MatchCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            access_order: Vec::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a result, marking it as recently used
    pub fn get(&mut self, key: &CacheKey) -> Option<Rc<[CitationSpan]>> {
        match self.entries.get(key) {
            Some(spans) => {
                let spans = Rc::clone(spans);
                self.hits += 1;
                self.mark_accessed(key);
                Some(spans)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a result, evicting the least recently used entry at capacity
    pub fn insert(&mut self, key: CacheKey, spans: Rc<[CitationSpan]>) {
        if self.capacity == 0 {
            return;
        }

        if self.entries.contains_key(&key) {
            self.entries.insert(key.clone(), spans);
            self.mark_accessed(&key);
            return;
        }

        if self.entries.len() >= self.capacity && !self.access_order.is_empty() {
            let evicted = self.access_order.remove(0);
            self.entries.remove(&evicted);
        }

        self.entries.insert(key.clone(), spans);
        self.access_order.push(key);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry; results are recomputed on demand
    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn stats(&self) -> MatchCacheStats {
        MatchCacheStats {
            entries: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Move key to the back of the LRU list
    fn mark_accessed(&mut self, key: &CacheKey) {
        if let Some(idx) = self.access_order.iter().position(|k| k == key) {
            let k = self.access_order.remove(idx);
            self.access_order.push(k);
        }
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_CACHE_CAPACITY)
    }
}
