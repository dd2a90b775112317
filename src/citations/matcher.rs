//! CitationMatcher: locate citation patterns in freshly rendered text
//!
//! Every citation carrying a `start_pattern` is compiled in plain-text mode and
//! scanned left to right. Results are cached per (text, citation-set) so that
//! re-renders with identical inputs skip the scan entirely.

use serde::Serialize;
use std::rc::Rc;

use super::cache::{CacheKey, MatchCache, MatchCacheStats};
use super::config::MatcherConfig;
use super::pattern::{compile_pattern, compile_pattern_bounded, scan_matches, PatternMode};
use super::types::{Citation, CitationSpan};

/// Matcher statistics, cache counters included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatcherStats {
    pub cache: MatchCacheStats,
    /// Patterns that failed to compile and were skipped
    pub compile_failures: u64,
    /// Citations with more matches than the per-citation cap
    pub capped_citations: u64,
}

pub struct CitationMatcher {
    config: MatcherConfig,
    cache: MatchCache,
    compile_failures: u64,
    capped_citations: u64,
}

impl Default for CitationMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl CitationMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            cache: MatchCache::new(config.cache_capacity),
            config,
            compile_failures: 0,
            capped_citations: 0,
        }
    }

    /// Find every span of every citation in `text`.
    ///
    /// Spans are ordered by citation, then left to right. The returned list is
    /// shared with the cache and immutable.
    pub fn match_citations(&mut self, text: &str, citations: &[Citation]) -> Rc<[CitationSpan]> {
        let key = CacheKey::new(text, citations);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let spans: Rc<[CitationSpan]> = self.compute(text, citations).into();
        self.cache.insert(key, Rc::clone(&spans));
        spans
    }

    /// Uncached scan
    fn compute(&mut self, text: &str, citations: &[Citation]) -> Vec<CitationSpan> {
        let limit = self.config.max_matches_per_citation;
        let mut spans = Vec::new();

        for citation in citations {
            let Some(pattern) = citation.pattern() else {
                continue;
            };
            let re = match compile_pattern_bounded(
                pattern,
                PatternMode::PlainText,
                self.config.pattern_size_limit,
            ) {
                Ok(re) => re,
                Err(_) => {
                    self.compile_failures += 1;
                    continue;
                }
            };

            // One extra match tells a capped citation apart from one with exactly `limit`
            let mut ranges = scan_matches(&re, text, limit.saturating_add(1));
            if ranges.len() > limit {
                ranges.truncate(limit);
                self.capped_citations += 1;
            }

            let id = citation.id();
            spans.extend(
                ranges
                    .into_iter()
                    .map(|r| CitationSpan::new(r.start, r.end, id.clone())),
            );
        }

        spans
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn stats(&self) -> MatcherStats {
        MatcherStats {
            cache: self.cache.stats(),
            compile_failures: self.compile_failures,
            capped_citations: self.capped_citations,
        }
    }
}

/// Match one arbitrary pattern in JSON-aware mode, bypassing the cache.
///
/// Spans carry an empty citation id. Empty or uncompilable patterns yield no
/// spans.
pub fn find_pattern_spans(text: &str, pattern: &str) -> Vec<CitationSpan> {
    match compile_pattern(pattern, PatternMode::Json) {
        Ok(re) => scan_matches(&re, text, usize::MAX)
            .into_iter()
            .map(|r| CitationSpan::new(r.start, r.end, String::new()))
            .collect(),
        Err(_) => Vec::new(),
    }
}
