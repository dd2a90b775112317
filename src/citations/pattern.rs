//! Pattern compiler: citation patterns -> whitespace-tolerant regexes
//!
//! Citation patterns are captured against a canonical rendering of the source,
//! while the text on screen may be re-wrapped, re-indented or pretty-printed.
//! Two modes:
//! - **PlainText**: each whitespace run becomes `\s+`, everything else literal
//! - **Json**: string literals as in PlainText (escapes kept intact), structural
//!   punctuation outside strings gets optional whitespace on both sides

use regex::{Regex, RegexBuilder};
use std::ops::Range;

use super::config::DEFAULT_PATTERN_SIZE_LIMIT;
use super::error::CiteError;

/// How a pattern should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMode {
    PlainText,
    Json,
}

/// One or more whitespace characters
const WS_REQUIRED: &str = r"\s+";
/// Zero or more whitespace characters
const WS_OPTIONAL: &str = r"\s*";

/// Build the regex source for `pattern` without compiling it
pub fn pattern_to_regex_source(pattern: &str, mode: PatternMode) -> String {
    match mode {
        PatternMode::PlainText => plain_source(pattern),
        PatternMode::Json => json_source(pattern),
    }
}

/// Compile `pattern` into a regex usable for all-occurrence scanning
pub fn compile_pattern(pattern: &str, mode: PatternMode) -> Result<Regex, CiteError> {
    compile_pattern_bounded(pattern, mode, DEFAULT_PATTERN_SIZE_LIMIT)
}

/// Like [`compile_pattern`], failing when the compiled program exceeds `size_limit` bytes
pub fn compile_pattern_bounded(
    pattern: &str,
    mode: PatternMode,
    size_limit: usize,
) -> Result<Regex, CiteError> {
    if pattern.is_empty() {
        return Err(CiteError::EmptyPattern);
    }
    Ok(RegexBuilder::new(&pattern_to_regex_source(pattern, mode))
        .size_limit(size_limit)
        .build()?)
}

/// Scan `text` left to right, returning at most `limit` non-empty match ranges.
///
/// Empty matches (possible in Json mode for whitespace-only patterns) are
/// skipped; the regex iterator already steps past them.
pub fn scan_matches(re: &Regex, text: &str, limit: usize) -> Vec<Range<usize>> {
    re.find_iter(text)
        .filter(|m| m.start() < m.end())
        .take(limit)
        .map(|m| m.range())
        .collect()
}

fn plain_source(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            skip_whitespace(&mut chars);
            out.push_str(WS_REQUIRED);
        } else {
            push_literal(&mut out, c);
        }
    }
    out
}

fn json_source(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 3);
    let mut chars = pattern.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            skip_whitespace(&mut chars);
            out.push_str(if in_string { WS_REQUIRED } else { WS_OPTIONAL });
            continue;
        }

        if in_string {
            match c {
                '\\' => {
                    // Escape pair is copied as-is so `\"` never closes the string
                    push_literal(&mut out, c);
                    if let Some(escaped) = chars.next() {
                        push_literal(&mut out, escaped);
                    }
                }
                '"' => {
                    in_string = false;
                    push_literal(&mut out, c);
                }
                _ => push_literal(&mut out, c),
            }
        } else {
            match c {
                '"' => {
                    in_string = true;
                    push_literal(&mut out, c);
                }
                '[' | ']' | '{' | '}' | ',' | ':' => {
                    out.push_str(WS_OPTIONAL);
                    push_literal(&mut out, c);
                    out.push_str(WS_OPTIONAL);
                }
                _ => push_literal(&mut out, c),
            }
        }
    }
    out
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.next_if(|n| n.is_whitespace()).is_some() {}
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
