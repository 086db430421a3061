#![forbid(unsafe_code)]

//! Unique element ids for ARIA wiring.
//!
//! Widgets derive every related element id (listbox, options, hints) from one
//! base id. Callers may supply a fixed base id; otherwise one is generated
//! from a process-wide counter.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Prefix used for generated ids.
pub const DEFAULT_PREFIX: &str = "autocomplete";

/// Generate a fresh id of the form `{prefix}-{n}`.
///
/// Ids are unique within the process.
#[must_use]
pub fn generate(prefix: &str) -> String {
    let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{n}")
}

/// Use `fixed` when it is a usable id, otherwise generate one.
///
/// Blank ids are treated as absent.
#[must_use]
pub fn use_id(fixed: Option<&str>) -> String {
    match fixed.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => generate(DEFAULT_PREFIX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = generate("x");
        let b = generate("x");
        assert_ne!(a, b);
        assert!(a.starts_with("x-"));
    }

    #[test]
    fn fixed_id_wins() {
        assert_eq!(use_id(Some("country")), "country");
    }

    #[test]
    fn blank_id_is_generated() {
        assert!(use_id(Some("  ")).starts_with("autocomplete-"));
        assert!(use_id(None).starts_with("autocomplete-"));
    }
}
