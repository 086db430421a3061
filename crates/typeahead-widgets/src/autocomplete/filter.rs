#![forbid(unsafe_code)]

//! Result filtering.
//!
//! Produces the result list for a query as indices into the candidate list.
//!
//! # Match Rules
//!
//! 1. Queries shorter than `min_length` produce no results.
//! 2. A custom search function, when supplied and no `data_keys` are
//!    configured, decides everything (membership and order).
//! 3. Otherwise, when `data_keys` names fields besides the option key, an
//!    option matches if any of those fields is a string with the query as
//!    prefix.
//! 4. Otherwise the option key's value must start with the query.
//!
//! Matching is case-insensitive, and diacritic-insensitive when configured.
//!
//! # Incremental Narrowing
//!
//! Filtering runs over the previous results when there are any, and over
//! every candidate otherwise. A narrowed result set therefore cannot grow
//! back when the query is widened; it resets once the results become empty
//! or the candidates are replaced.

use std::fmt;

use typeahead_text::normalize::query_length;
use typeahead_text::search::PrefixMatcher;

use super::config::AutocompleteConfig;
use super::record::Record;

/// Caller-supplied search.
///
/// Receives the query and the candidate pool; returns positions into that
/// pool, in the order results should appear.
pub type SearchFn<T> = dyn Fn(&str, &[&T]) -> Vec<usize>;

/// Applies the configured match rules to a candidate list.
pub struct ResultFilter<'a, T> {
    config: &'a AutocompleteConfig,
    search: Option<&'a SearchFn<T>>,
}

impl<T> fmt::Debug for ResultFilter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultFilter")
            .field("option_key", &self.config.option_key)
            .field("min_length", &self.config.min_length)
            .field("custom_search", &self.search.is_some())
            .finish()
    }
}

impl<'a, T: Record> ResultFilter<'a, T> {
    /// Create a filter for `config`, optionally delegating to `search`.
    #[must_use]
    pub fn new(config: &'a AutocompleteConfig, search: Option<&'a SearchFn<T>>) -> Self {
        Self { config, search }
    }

    /// Whether `query` is long enough to filter.
    #[must_use]
    pub fn accepts(&self, query: &str) -> bool {
        query_length(query) >= self.config.min_length
    }

    /// Filter `candidates` for `query`, narrowing `previous` when non-empty.
    ///
    /// Returned indices point into `candidates` and keep pool order (except
    /// under a custom search, which owns ordering).
    #[must_use]
    pub fn filter(&self, query: &str, candidates: &[T], previous: &[usize]) -> Vec<usize> {
        if !self.accepts(query) {
            return Vec::new();
        }

        let pool: Vec<usize> = if previous.is_empty() {
            (0..candidates.len()).collect()
        } else {
            previous
                .iter()
                .copied()
                .filter(|&i| i < candidates.len())
                .collect()
        };

        let category_keys: Vec<&str> = self.config.category_keys().collect();
        match self.search {
            Some(search) if self.config.data_keys.is_empty() => {
                Self::delegate(search, query, candidates, &pool)
            }
            _ if !category_keys.is_empty() => {
                let matcher = PrefixMatcher::new(query, self.config.strip_diacritics);
                pool.into_iter()
                    .filter(|&i| {
                        category_keys.iter().any(|key| {
                            candidates[i]
                                .field(key)
                                .is_some_and(|value| value.as_str().is_some_and(|s| matcher.matches(s)))
                        })
                    })
                    .collect()
            }
            _ => {
                let matcher = PrefixMatcher::new(query, self.config.strip_diacritics);
                let key = self.config.option_key.as_str();
                pool.into_iter()
                    .filter(|&i| {
                        candidates[i]
                            .field(key)
                            .is_some_and(|value| matcher.matches(&value.to_string()))
                    })
                    .collect()
            }
        }
    }

    fn delegate(search: &SearchFn<T>, query: &str, candidates: &[T], pool: &[usize]) -> Vec<usize> {
        let refs: Vec<&T> = pool.iter().map(|&i| &candidates[i]).collect();
        search(query, &refs)
            .into_iter()
            .filter_map(|position| {
                let index = pool.get(position).copied();
                if index.is_none() {
                    typeahead_core::warn!(
                        position,
                        pool_len = pool.len(),
                        "custom search returned a position outside the pool"
                    );
                }
                index
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    type Row = HashMap<String, String>;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn fruits() -> Vec<Row> {
        vec![
            row(&[("id", "a"), ("name", "Apple")]),
            row(&[("id", "b"), ("name", "Apricot")]),
            row(&[("id", "c"), ("name", "Banana")]),
        ]
    }

    fn cities() -> Vec<Row> {
        vec![
            row(&[("name", "Paris"), ("country", "France"), ("code", "CDG")]),
            row(&[("name", "Lyon"), ("country", "France"), ("code", "LYS")]),
            row(&[("name", "Zürich"), ("country", "Switzerland"), ("code", "ZRH")]),
        ]
    }

    #[test]
    fn short_query_yields_nothing() {
        let config = AutocompleteConfig::new("name");
        let filter = ResultFilter::<Row>::new(&config, None);
        assert!(filter.filter("A", &fruits(), &[]).is_empty());
        assert!(filter.filter("", &fruits(), &[]).is_empty());
    }

    #[test]
    fn key_prefix_match_preserves_order() {
        let config = AutocompleteConfig::new("name");
        let filter = ResultFilter::new(&config, None);
        assert_eq!(filter.filter("Ap", &fruits(), &[]), [0, 1]);
        assert_eq!(filter.filter("aPR", &fruits(), &[]), [1]);
        assert!(filter.filter("pple", &fruits(), &[]).is_empty());
    }

    #[test]
    fn previous_results_narrow_the_pool() {
        let config = AutocompleteConfig::new("name");
        let filter = ResultFilter::new(&config, None);
        // "Ba" would match Banana, but the pool is only Apple/Apricot.
        assert!(filter.filter("Ba", &fruits(), &[0, 1]).is_empty());
        assert_eq!(filter.filter("Ba", &fruits(), &[]), [2]);
    }

    #[test]
    fn stale_previous_indices_are_dropped() {
        let config = AutocompleteConfig::new("name");
        let filter = ResultFilter::new(&config, None);
        assert_eq!(filter.filter("Ap", &fruits(), &[1, 7]), [1]);
    }

    #[test]
    fn data_keys_search_other_fields() {
        let config = AutocompleteConfig::new("name").with_data_keys(&["name", "country"]);
        let filter = ResultFilter::new(&config, None);
        assert_eq!(filter.filter("fr", &cities(), &[]), [0, 1]);
        // The option key itself is excluded from multi-field search.
        assert!(filter.filter("Pa", &cities(), &[]).is_empty());
    }

    #[test]
    fn data_keys_fold_diacritics_when_configured() {
        let strict = AutocompleteConfig::new("code").with_data_keys(&["name"]);
        assert!(ResultFilter::new(&strict, None).filter("zu", &cities(), &[]).is_empty());

        let folded = strict.clone().with_strip_diacritics(true);
        assert_eq!(ResultFilter::new(&folded, None).filter("zu", &cities(), &[]), [2]);
    }

    #[test]
    fn custom_search_owns_semantics() {
        let config = AutocompleteConfig::new("name");
        let contains: Box<SearchFn<Row>> = Box::new(|query, pool| {
            let q = query.to_lowercase();
            let mut hits: Vec<usize> = pool
                .iter()
                .enumerate()
                .filter(|(_, r)| r["name"].to_lowercase().contains(&q))
                .map(|(i, _)| i)
                .collect();
            hits.reverse();
            hits
        });
        let filter = ResultFilter::new(&config, Some(contains.as_ref()));
        // Substring match in reversed order.
        assert_eq!(filter.filter("ap", &fruits(), &[]), [1, 0]);
        assert_eq!(filter.filter("na", &fruits(), &[]), [2]);
        assert_eq!(filter.filter("pp", &fruits(), &[]), [0]);
        // Still subject to the minimum length.
        assert!(filter.filter("p", &fruits(), &[]).is_empty());
    }

    #[test]
    fn custom_search_positions_map_through_pool() {
        let config = AutocompleteConfig::new("name");
        let first_and_bogus: Box<SearchFn<Row>> = Box::new(|_, _| vec![0, 99]);
        let filter = ResultFilter::new(&config, Some(first_and_bogus.as_ref()));
        // Pool is [1, 2]; position 0 is candidate 1, position 99 is dropped.
        assert_eq!(filter.filter("xx", &fruits(), &[1, 2]), [1]);
    }

    #[test]
    fn data_keys_take_precedence_over_custom_search() {
        let config = AutocompleteConfig::new("name").with_data_keys(&["country"]);
        let nothing: Box<SearchFn<Row>> = Box::new(|_, _| Vec::new());
        let filter = ResultFilter::new(&config, Some(nothing.as_ref()));
        assert_eq!(filter.filter("sw", &cities(), &[]), [2]);
    }

    #[test]
    fn missing_key_never_matches() {
        let config = AutocompleteConfig::new("title");
        let filter = ResultFilter::new(&config, None);
        assert!(filter.filter("Ap", &fruits(), &[]).is_empty());
    }
}
