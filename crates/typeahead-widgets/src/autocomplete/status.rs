#![forbid(unsafe_code)]

//! Screen-reader status announcements.
//!
//! The status region describes the result list in words ("2 results are
//! available"). Messages are computed from a [`StatusSnapshot`] through
//! overridable [`StatusTemplates`], then debounced by [`StatusAnnouncer`] so
//! a fast typist does not trigger an announcement per keystroke.

use std::fmt;
use std::time::Instant;

use typeahead_core::debounce::{DebounceConfig, DebounceError, Debouncer};

/// Message templates. Replace any field to localize.
pub struct StatusTemplates {
    /// Query too short; receives the minimum length.
    pub less_than_min: Box<dyn Fn(usize) -> String>,
    /// Query long enough but nothing matched.
    pub no_results: Box<dyn Fn() -> String>,
    /// An option is highlighted; receives its label, the result count, and
    /// its 0-based index.
    pub option_selected: Box<dyn Fn(&str, usize, usize) -> String>,
    /// Results are available; receives the count and the (possibly empty)
    /// highlighted-option sentence.
    pub total_results: Box<dyn Fn(usize, &str) -> String>,
}

impl Default for StatusTemplates {
    fn default() -> Self {
        Self {
            less_than_min: Box::new(|min| format!("Type in {min} or more characters for results")),
            no_results: Box::new(|| "No search results".to_string()),
            option_selected: Box::new(|option, length, index| {
                format!("{option} {} of {length} is highlighted", index + 1)
            }),
            total_results: Box::new(|length, selected| {
                let (noun, verb) = if length == 1 {
                    ("result", "is")
                } else {
                    ("results", "are")
                };
                format!("{length} {noun} {verb} available. {selected}")
                    .trim_end()
                    .to_string()
            }),
        }
    }
}

impl fmt::Debug for StatusTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusTemplates").finish_non_exhaustive()
    }
}

/// Inputs to a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot<'a> {
    /// Whether the widget has focus.
    pub in_focus: bool,
    /// Whether the query already names an option.
    pub has_valid_option: bool,
    /// Query length in grapheme clusters.
    pub query_length: usize,
    /// Configured minimum query length.
    pub min_length: usize,
    /// Number of results.
    pub length: usize,
    /// Label of the selected option.
    pub selected_option: Option<&'a str>,
    /// Index of the selected option.
    pub selected_index: Option<usize>,
}

impl StatusTemplates {
    /// Message for `snapshot`; empty while silent.
    ///
    /// The region is silent when the widget is not focused or the query
    /// already names an option.
    #[must_use]
    pub fn message(&self, snapshot: &StatusSnapshot<'_>) -> String {
        if !snapshot.in_focus || snapshot.has_valid_option {
            return String::new();
        }
        if snapshot.query_length < snapshot.min_length {
            return (self.less_than_min)(snapshot.min_length);
        }
        if snapshot.length == 0 {
            return (self.no_results)();
        }
        let selected = match (snapshot.selected_option, snapshot.selected_index) {
            (Some(option), Some(index)) => (self.option_selected)(option, snapshot.length, index),
            _ => String::new(),
        };
        (self.total_results)(snapshot.length, &selected)
    }
}

/// Debounced status region.
#[derive(Debug, Clone)]
pub struct StatusAnnouncer {
    debouncer: Debouncer<String>,
    /// Last message submitted, announced or not.
    latest: String,
    /// Last message released to the host.
    announced: String,
}

impl StatusAnnouncer {
    /// Create an announcer with the given debounce settings.
    pub fn new(config: DebounceConfig) -> Result<Self, DebounceError> {
        Ok(Self {
            debouncer: Debouncer::new(config)?,
            latest: String::new(),
            announced: String::new(),
        })
    }

    /// Submit the current message. Unchanged messages are ignored.
    ///
    /// Returns the message when it is released immediately (leading edge).
    pub fn update(&mut self, message: String, now: Instant) -> Option<String> {
        if message == self.latest {
            return None;
        }
        self.latest.clone_from(&message);
        let released = self.debouncer.push(message, now)?;
        self.announced.clone_from(&released);
        Some(released)
    }

    /// Release the pending message once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let released = self.debouncer.poll(now)?;
        typeahead_core::debug!(message = %released, "status announced");
        self.announced.clone_from(&released);
        Some(released)
    }

    /// The message most recently released.
    #[must_use]
    pub fn announced(&self) -> &str {
        &self.announced
    }

    /// When the pending message will be released, if one is waiting.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Drop the pending message.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snapshot() -> StatusSnapshot<'static> {
        StatusSnapshot {
            in_focus: true,
            has_valid_option: false,
            query_length: 2,
            min_length: 2,
            length: 2,
            selected_option: None,
            selected_index: None,
        }
    }

    #[test]
    fn default_messages() {
        let t = StatusTemplates::default();
        assert_eq!(t.message(&snapshot()), "2 results are available.");

        let one = StatusSnapshot {
            length: 1,
            ..snapshot()
        };
        assert_eq!(t.message(&one), "1 result is available.");

        let short = StatusSnapshot {
            query_length: 1,
            ..snapshot()
        };
        assert_eq!(t.message(&short), "Type in 2 or more characters for results");

        let none = StatusSnapshot {
            length: 0,
            ..snapshot()
        };
        assert_eq!(t.message(&none), "No search results");
    }

    #[test]
    fn selected_option_is_described() {
        let t = StatusTemplates::default();
        let s = StatusSnapshot {
            selected_option: Some("Apricot"),
            selected_index: Some(1),
            ..snapshot()
        };
        assert_eq!(
            t.message(&s),
            "2 results are available. Apricot 2 of 2 is highlighted"
        );
    }

    #[test]
    fn silent_without_focus_or_after_valid_choice() {
        let t = StatusTemplates::default();
        let unfocused = StatusSnapshot {
            in_focus: false,
            ..snapshot()
        };
        assert_eq!(t.message(&unfocused), "");
        let valid = StatusSnapshot {
            has_valid_option: true,
            ..snapshot()
        };
        assert_eq!(t.message(&valid), "");
    }

    #[test]
    fn templates_are_overridable() {
        let t = StatusTemplates {
            no_results: Box::new(|| "Aucun résultat".to_string()),
            ..StatusTemplates::default()
        };
        let none = StatusSnapshot {
            length: 0,
            ..snapshot()
        };
        assert_eq!(t.message(&none), "Aucun résultat");
    }

    #[test]
    fn announcer_debounces_bursts() {
        let start = Instant::now();
        let delay = Duration::from_millis(100);
        let mut a = StatusAnnouncer::new(DebounceConfig::new(delay)).unwrap();

        assert_eq!(a.update("one".into(), start), None);
        assert_eq!(a.update("two".into(), start + Duration::from_millis(50)), None);
        assert_eq!(a.poll(start + Duration::from_millis(120)), None);
        assert_eq!(
            a.poll(start + Duration::from_millis(150)),
            Some("two".to_string())
        );
        assert_eq!(a.announced(), "two");
        assert_eq!(a.deadline(), None);
    }

    #[test]
    fn unchanged_message_does_not_rearm() {
        let start = Instant::now();
        let mut a = StatusAnnouncer::new(DebounceConfig::new(Duration::from_millis(100))).unwrap();
        a.update("same".into(), start);
        let deadline = a.deadline();
        a.update("same".into(), start + Duration::from_millis(90));
        assert_eq!(a.deadline(), deadline);
    }

    #[test]
    fn cancel_drops_pending() {
        let start = Instant::now();
        let mut a = StatusAnnouncer::new(DebounceConfig::new(Duration::from_millis(10))).unwrap();
        a.update("gone".into(), start);
        a.cancel();
        assert_eq!(a.poll(start + Duration::from_secs(1)), None);
        assert_eq!(a.announced(), "");
    }
}
