#![forbid(unsafe_code)]

//! Autocomplete configuration.
//!
//! Plain data only; callbacks (label function, custom search, confirm
//! handler, status templates) are attached to the controller with builders.
//! With the `serde` feature the config can be loaded from JSON using the same
//! camelCase keys a JavaScript host would pass:
//!
//! ```
//! # #[cfg(feature = "serde")] {
//! use typeahead_widgets::autocomplete::AutocompleteConfig;
//!
//! let config = AutocompleteConfig::from_json(
//!     r#"{ "optionKey": "name", "minLength": 1, "confirmOnBlur": true }"#,
//! ).unwrap();
//! assert_eq!(config.min_length, 1);
//! assert_eq!(config.debounce_in_ms, 1500);
//! # }
//! ```

use std::fmt;
use std::time::Duration;

use typeahead_core::debounce::{DebounceConfig, DebounceError};

/// Default minimum query length before filtering starts.
pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Default delay before a status message is announced.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1500;

/// Autocomplete configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct AutocompleteConfig {
    /// Fixed base id for ARIA wiring. Generated when `None`.
    pub id: Option<String>,
    /// Form field name.
    pub name: Option<String>,
    /// Field holding each option's canonical label.
    pub option_key: String,
    /// Extra searchable fields. When any field other than `option_key` is
    /// listed, matching runs over those fields instead of the label.
    pub data_keys: Vec<String>,
    /// Minimum query length (grapheme clusters) before filtering.
    pub min_length: usize,
    /// Status announcement debounce, in milliseconds.
    pub debounce_in_ms: u64,
    /// Highlight the first result while typing (inline completion).
    pub autoselect: bool,
    /// Confirm the selected option when focus leaves the widget.
    pub confirm_on_blur: bool,
    /// Render a "no results" row when a long-enough query matches nothing.
    pub show_no_options_found: bool,
    /// Compare with diacritics folded ("e" matches "é").
    pub strip_diacritics: bool,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            option_key: String::new(),
            data_keys: Vec::new(),
            min_length: DEFAULT_MIN_LENGTH,
            debounce_in_ms: DEFAULT_DEBOUNCE_MS,
            autoselect: false,
            confirm_on_blur: false,
            show_no_options_found: true,
            strip_diacritics: false,
        }
    }
}

impl AutocompleteConfig {
    /// Config labelling options by `option_key`, defaults elsewhere.
    #[must_use]
    pub fn new(option_key: impl Into<String>) -> Self {
        Self {
            option_key: option_key.into(),
            ..Self::default()
        }
    }

    /// Set a fixed base id (builder).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the form field name (builder).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set extra searchable fields (builder).
    #[must_use]
    pub fn with_data_keys(mut self, keys: &[&str]) -> Self {
        self.data_keys = keys.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set the minimum query length (builder).
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Set the status debounce in milliseconds (builder).
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_in_ms = ms;
        self
    }

    /// Enable inline auto-select (builder).
    #[must_use]
    pub fn with_autoselect(mut self, enabled: bool) -> Self {
        self.autoselect = enabled;
        self
    }

    /// Enable confirm-on-blur (builder).
    #[must_use]
    pub fn with_confirm_on_blur(mut self, enabled: bool) -> Self {
        self.confirm_on_blur = enabled;
        self
    }

    /// Toggle the "no results" row (builder).
    #[must_use]
    pub fn with_show_no_options_found(mut self, enabled: bool) -> Self {
        self.show_no_options_found = enabled;
        self
    }

    /// Enable diacritic-insensitive matching (builder).
    #[must_use]
    pub fn with_strip_diacritics(mut self, enabled: bool) -> Self {
        self.strip_diacritics = enabled;
        self
    }

    /// Searchable fields other than the option key.
    ///
    /// Listing only the option key itself yields an empty slice, which keeps
    /// label matching (and custom search) in charge.
    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.data_keys
            .iter()
            .map(String::as_str)
            .filter(move |key| *key != self.option_key)
    }

    /// Debounce settings for status announcements.
    #[must_use]
    pub fn status_debounce(&self) -> DebounceConfig {
        DebounceConfig::new(Duration::from_millis(self.debounce_in_ms))
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.option_key.trim().is_empty() {
            return Err(ConfigError::EmptyOptionKey);
        }
        self.status_debounce().validate()?;
        Ok(())
    }

    /// Parse and validate a JSON config.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Invalid autocomplete configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `option_key` is empty; options would have no label.
    EmptyOptionKey,
    /// Debounce settings are inconsistent.
    Debounce(DebounceError),
    /// JSON config could not be decoded.
    #[cfg(feature = "serde")]
    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOptionKey => f.write_str("option key must not be empty"),
            Self::Debounce(e) => write!(f, "invalid debounce: {e}"),
            #[cfg(feature = "serde")]
            Self::Json(msg) => write!(f, "invalid config JSON: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Debounce(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DebounceError> for ConfigError {
    fn from(e: DebounceError) -> Self {
        Self::Debounce(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AutocompleteConfig::new("name");
        assert_eq!(config.min_length, 2);
        assert_eq!(config.debounce_in_ms, 1500);
        assert!(!config.autoselect);
        assert!(!config.confirm_on_blur);
        assert!(config.show_no_options_found);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_option_key_is_rejected() {
        assert_eq!(
            AutocompleteConfig::default().validate(),
            Err(ConfigError::EmptyOptionKey)
        );
    }

    #[test]
    fn category_keys_exclude_option_key() {
        let config = AutocompleteConfig::new("name").with_data_keys(&["name", "city", "code"]);
        assert_eq!(config.category_keys().collect::<Vec<_>>(), ["city", "code"]);

        let only_label = AutocompleteConfig::new("name").with_data_keys(&["name"]);
        assert_eq!(only_label.category_keys().count(), 0);
    }

    #[test]
    fn status_debounce_uses_configured_delay() {
        let config = AutocompleteConfig::new("name").with_debounce_ms(250);
        assert_eq!(config.status_debounce().delay, Duration::from_millis(250));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_camel_case_and_defaults() {
        let config = AutocompleteConfig::from_json(
            r#"{ "optionKey": "label", "dataKeys": ["label", "iso"], "autoselect": true }"#,
        )
        .unwrap();
        assert_eq!(config.option_key, "label");
        assert_eq!(config.data_keys, ["label", "iso"]);
        assert!(config.autoselect);
        assert_eq!(config.min_length, DEFAULT_MIN_LENGTH);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_errors_are_reported() {
        let err = AutocompleteConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        let err = AutocompleteConfig::from_json("{}").unwrap_err();
        assert_eq!(err, ConfigError::EmptyOptionKey);
    }
}
