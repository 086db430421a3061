#![forbid(unsafe_code)]

//! Text handling for typeahead widgets.
//!
//! - [`normalize`] - query formatting (lower-casing, optional diacritic folding)
//! - [`search`] - prefix matching over formatted text
//!
//! # Example
//! ```
//! use typeahead_text::normalize::format;
//! use typeahead_text::search::PrefixMatcher;
//!
//! assert_eq!(format("Crème Brûlée", true), "creme brulee");
//!
//! let matcher = PrefixMatcher::new("cre", true);
//! assert!(matcher.matches("Crème"));
//! assert!(!matcher.matches("Scream"));
//! ```

pub mod normalize;
pub mod search;

pub use normalize::{format, query_length, strip_diacritics};
pub use search::{PrefixMatcher, SearchResult, equals_ignore_case, prefix_match};
