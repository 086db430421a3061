#![forbid(unsafe_code)]

//! Prefix search over formatted text.
//!
//! Typeahead filtering is prefix-only: a candidate matches when its formatted
//! form starts with the formatted query. [`PrefixMatcher`] formats the query
//! once and is then applied to every candidate.
//!
//! # Example
//! ```
//! use typeahead_text::search::{prefix_match, SearchResult};
//!
//! let hit = prefix_match("Éclair au chocolat", "ecl", true).unwrap();
//! assert_eq!(hit.text("Éclair au chocolat"), "Écl");
//! assert!(prefix_match("Banana", "ap", false).is_none());
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::normalize::format;

/// A match with its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Byte offset range of the match in the source string.
    pub range: std::ops::Range<usize>,
}

impl SearchResult {
    /// Create a new search result.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { range: start..end }
    }

    /// Extract the matched text from the source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// A formatted query, ready to test candidates against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatcher {
    needle: String,
    strip_diacritics: bool,
}

impl PrefixMatcher {
    /// Format `query` once for repeated matching.
    #[must_use]
    pub fn new(query: &str, strip_diacritics: bool) -> Self {
        Self {
            needle: format(query, strip_diacritics),
            strip_diacritics,
        }
    }

    /// The formatted query.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Whether the formatted `candidate` starts with the formatted query.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        format(candidate, self.strip_diacritics).starts_with(&self.needle)
    }
}

/// Locate the prefix of `haystack` matched by `query`.
///
/// The returned range covers whole grapheme clusters of the original string,
/// so a folded "é" is highlighted as one unit. Empty queries never match.
#[must_use]
pub fn prefix_match(haystack: &str, query: &str, strip_diacritics: bool) -> Option<SearchResult> {
    let needle = format(query, strip_diacritics);
    if needle.is_empty() {
        return None;
    }

    // Walk graphemes, accumulating the formatted prefix until it covers the
    // needle; formatting per grapheme keeps original offsets recoverable.
    let mut formatted = String::new();
    for (offset, grapheme) in haystack.grapheme_indices(true) {
        formatted.push_str(&format(grapheme, strip_diacritics));
        if formatted.len() >= needle.len() {
            return formatted
                .starts_with(&needle)
                .then(|| SearchResult::new(0, offset + grapheme.len()));
        }
        if !needle.starts_with(&formatted) {
            return None;
        }
    }
    None
}

/// Case-insensitive full-string equality.
#[must_use]
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
