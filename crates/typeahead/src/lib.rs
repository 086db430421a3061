#![forbid(unsafe_code)]

//! Headless typeahead public facade.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a lightweight
//! prelude for day-to-day usage.
//!
//! ```
//! use std::collections::HashMap;
//! use typeahead::prelude::*;
//!
//! fn build() -> typeahead::Result<Autocomplete<HashMap<String, String>>> {
//!     let rows = vec![HashMap::from([("name".to_string(), "Kiwi".to_string())])];
//!     Ok(Autocomplete::new(AutocompleteConfig::new("name").with_min_length(1), rows)?)
//! }
//!
//! let mut ac = build().unwrap();
//! ac.handle_event(&Input::Change("k".into()));
//! assert_eq!(ac.options(), ["Kiwi"]);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use typeahead_core::debounce::{DebounceConfig, DebounceError, Debouncer};
pub use typeahead_core::event::{FocusTarget, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use typeahead_core::platform::{
    CapabilityProfileBuilder, PlatformCapabilities, PlatformProfile, UnknownProfile,
};

// --- Text re-exports -------------------------------------------------------

pub use typeahead_text::{PrefixMatcher, format, query_length, strip_diacritics};

// --- Widget re-exports -----------------------------------------------------

pub use typeahead_widgets::autocomplete::{
    AriaAttributes, Autocomplete, AutocompleteConfig, AutocompleteState, ConfigError, Effect,
    FieldValue, Highlight, Input, KeySlot, ListboxAttributes, MenuPhase, OptionAttributes, Record,
    StatusTemplates,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for typeahead APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid widget configuration.
    Config(ConfigError),
    /// Invalid debounce settings.
    Debounce(DebounceError),
    /// Unrecognized platform profile name.
    Platform(UnknownProfile),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Debounce(err) => write!(f, "{err}"),
            Self::Platform(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Debounce(err) => Some(err),
            Self::Platform(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<DebounceError> for Error {
    fn from(err: DebounceError) -> Self {
        Self::Debounce(err)
    }
}

impl From<UnknownProfile> for Error {
    fn from(err: UnknownProfile) -> Self {
        Self::Platform(err)
    }
}

/// Standard result type for typeahead APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Autocomplete, AutocompleteConfig, Effect, Error, FocusTarget, Highlight, Input, KeyCode,
        KeyEvent, MenuPhase, PlatformCapabilities, Record, Result,
    };

    pub use crate::{core, text, widgets};
}

pub use typeahead_core as core;
pub use typeahead_text as text;
pub use typeahead_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn errors_convert_and_chain() {
        let err: Error = ConfigError::EmptyOptionKey.into();
        assert_eq!(err.to_string(), "option key must not be empty");
        assert!(err.source().is_some());

        let err: Error = "kiosk".parse::<PlatformProfile>().unwrap_err().into();
        assert!(matches!(err, Error::Platform(_)));
    }

    #[test]
    fn platform_from_name() -> Result<()> {
        let profile: PlatformProfile = "touch".parse()?;
        let caps = PlatformCapabilities::from_profile(profile);
        assert!(caps.keeps_menu_open_on_blur);
        Ok(())
    }
}
