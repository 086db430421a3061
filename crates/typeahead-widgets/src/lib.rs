#![forbid(unsafe_code)]

//! Headless interactive widgets built on `typeahead-core` events.

pub mod autocomplete;

pub use autocomplete::{
    Autocomplete, AutocompleteConfig, AutocompleteState, ConfigError, Effect, Highlight, Input,
    KeySlot, MenuPhase, Record,
};
