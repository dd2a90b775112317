//! Matcher configuration.

use serde::{Deserialize, Serialize};

/// Maximum spans recorded per citation before scanning stops
pub const DEFAULT_MAX_MATCHES_PER_CITATION: usize = 200;

/// Number of (text, citation-set) results kept by the match cache
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Compiled-program budget for a single citation pattern, in bytes
pub const DEFAULT_PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Configuration for the CitationMatcher
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatcherConfig {
    #[serde(default = "default_max_matches")]
    pub max_matches_per_citation: usize,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Patterns whose compiled regex exceeds this are skipped
    #[serde(default = "default_pattern_size_limit")]
    pub pattern_size_limit: usize,
}

fn default_max_matches() -> usize { DEFAULT_MAX_MATCHES_PER_CITATION }
fn default_cache_capacity() -> usize { DEFAULT_CACHE_CAPACITY }
fn default_pattern_size_limit() -> usize { DEFAULT_PATTERN_SIZE_LIMIT }

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_matches_per_citation: DEFAULT_MAX_MATCHES_PER_CITATION,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            pattern_size_limit: DEFAULT_PATTERN_SIZE_LIMIT,
        }
    }
}
