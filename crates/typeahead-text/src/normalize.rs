#![forbid(unsafe_code)]

//! Query formatting.
//!
//! Queries and option labels are compared in a formatted form: lower-cased,
//! and optionally folded so that accented and unaccented letters compare
//! equal ("é" → "e"). Folding decomposes to NFD, drops the Combining
//! Diacritical Marks block (U+0300–U+036F), and recomposes to NFC, so marks
//! outside that block (e.g. the Devanagari virama) survive.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// First code point of the Combining Diacritical Marks block.
const COMBINING_MARKS_START: char = '\u{0300}';
/// Last code point of the Combining Diacritical Marks block.
const COMBINING_MARKS_END: char = '\u{036F}';

/// Format `raw` for comparison.
///
/// Always lower-cases; folds diacritics when `strip_diacritics` is set.
#[must_use]
pub fn format(raw: &str, strip_diacritics: bool) -> String {
    let lowered = raw.to_lowercase();
    if strip_diacritics {
        self::strip_diacritics(&lowered)
    } else {
        lowered
    }
}

/// Remove combining diacritical marks, keeping base letters.
#[must_use]
pub fn strip_diacritics(s: &str) -> String {
    if s.is_ascii() {
        return s.to_string();
    }
    s.nfd()
        .filter(|c| !(COMBINING_MARKS_START..=COMBINING_MARKS_END).contains(c))
        .nfc()
        .collect()
}

/// Length of a query as the user perceives it (grapheme clusters).
///
/// Minimum-length checks use this so that a decomposed "é" counts once.
#[must_use]
pub fn query_length(query: &str) -> usize {
    query.graphemes(true).count()
}
