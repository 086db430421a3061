#![forbid(unsafe_code)]

//! Option records and their labels.
//!
//! The controller treats options as opaque records. It only needs to read
//! named fields: the designated option key for labels and key matching, and
//! any extra searchable fields. [`Record`] is that capability.
//!
//! A label is the option's display text and the value the query adopts when
//! the option is confirmed. [`Labeler`] produces it, preferring a caller
//! supplied label function over the option key.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// Label produced for a record that lacks the option key.
///
/// A missing key is a caller contract violation; it surfaces as this text
/// rather than as a panic.
pub const MISSING_FIELD_LABEL: &str = "undefined";

/// A field value read from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// A string field. Only string fields take part in multi-field search.
    Str(&'a str),
    /// A numeric field.
    Number(f64),
    /// A boolean field.
    Bool(bool),
    /// An explicit null.
    Null,
    /// Any other value, already rendered as text.
    Other(String),
}

impl FieldValue<'_> {
    /// The string contents, if this is a string field.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Number(n) => fmt_number(*n, f),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Numbers print without a trailing `.0` when integral.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        write!(f, "{n:.0}")
    } else {
        write!(f, "{n}")
    }
}

/// Read access to named fields of an option.
pub trait Record {
    /// The value stored under `key`, or `None` when the record has no such
    /// field.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }
}

impl<S: BuildHasher> Record for HashMap<String, String, S> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).map(|v| FieldValue::Str(v))
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).map(|v| FieldValue::Str(v))
    }
}

#[cfg(feature = "serde")]
mod json {
    use super::{FieldValue, Record};
    use serde_json::{Map, Value};

    fn to_field(value: &Value) -> FieldValue<'_> {
        match value {
            Value::String(s) => FieldValue::Str(s),
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| FieldValue::Other(n.to_string()), FieldValue::Number),
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Null => FieldValue::Null,
            other => FieldValue::Other(other.to_string()),
        }
    }

    impl Record for Map<String, Value> {
        fn field(&self, key: &str) -> Option<FieldValue<'_>> {
            self.get(key).map(to_field)
        }
    }

    /// Non-object values have no fields.
    impl Record for Value {
        fn field(&self, key: &str) -> Option<FieldValue<'_>> {
            self.as_object().and_then(|map| map.field(key))
        }
    }
}

/// Caller-supplied label function.
pub type LabelFn<T> = dyn Fn(&T) -> String;

/// Produces option labels.
pub struct Labeler<'a, T> {
    option_key: &'a str,
    format_label: Option<&'a LabelFn<T>>,
}

impl<T> Clone for Labeler<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Labeler<'_, T> {}

impl<T> fmt::Debug for Labeler<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Labeler")
            .field("option_key", &self.option_key)
            .field("format_label", &self.format_label.is_some())
            .finish()
    }
}

impl<'a, T: Record> Labeler<'a, T> {
    /// Create a labeler reading `option_key` unless `format_label` is given.
    #[must_use]
    pub fn new(option_key: &'a str, format_label: Option<&'a LabelFn<T>>) -> Self {
        Self {
            option_key,
            format_label,
        }
    }

    /// The designated option key.
    #[must_use]
    pub fn option_key(&self) -> &'a str {
        self.option_key
    }

    /// Label for `option`; empty for a missing option.
    #[must_use]
    pub fn label(&self, option: Option<&T>) -> String {
        let Some(option) = option else {
            return String::new();
        };
        if let Some(format_label) = self.format_label {
            return format_label(option);
        }
        match option.field(self.option_key) {
            Some(value) => value.to_string(),
            None => {
                typeahead_core::warn!(
                    option_key = self.option_key,
                    "option has no value for the option key"
                );
                MISSING_FIELD_LABEL.to_string()
            }
        }
    }
}
