#![forbid(unsafe_code)]

//! ARIA attribute projection.
//!
//! Pure functions of the combobox state and the widget's base id. Hosts copy
//! the returned name/value pairs onto their elements; absent attributes are
//! omitted from the pairs rather than rendered empty.

use super::state::{AutocompleteState, Highlight};

/// Id of the assistive hint element for `base`.
#[must_use]
pub fn assistive_hint_id(base: &str) -> String {
    format!("{base}__assistiveHint")
}

/// Id of the listbox element for `base`.
#[must_use]
pub fn listbox_id(base: &str) -> String {
    format!("{base}__listbox")
}

/// Id of the option element at `index` for `base`.
#[must_use]
pub fn option_id(base: &str, index: usize) -> String {
    format!("{base}__option--{index}")
}

/// `aria-autocomplete` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutocompleteMode {
    /// Filtered list only.
    List,
    /// Filtered list plus inline completion.
    Both,
}

impl AutocompleteMode {
    /// Attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Both => "both",
        }
    }
}

/// Attributes for the text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AriaAttributes {
    /// `aria-expanded`.
    pub expanded: bool,
    /// `aria-activedescendant`, present while an option has focus.
    pub active_descendant: Option<String>,
    /// `aria-describedby`, present while the assistive hint is shown.
    pub described_by: Option<String>,
    /// `aria-owns`.
    pub owns: String,
    /// `aria-autocomplete`.
    pub autocomplete: AutocompleteMode,
}

impl AriaAttributes {
    /// Project `state` for the widget with base id `id`.
    #[must_use]
    pub fn project(state: &AutocompleteState, id: &str, can_autoselect: bool) -> Self {
        Self {
            expanded: state.menu_open,
            active_descendant: state.focused.index().map(|i| option_id(id, i)),
            described_by: state.aria_hint.then(|| assistive_hint_id(id)),
            owns: listbox_id(id),
            autocomplete: if can_autoselect {
                AutocompleteMode::Both
            } else {
                AutocompleteMode::List
            },
        }
    }

    /// Attribute name/value pairs, absent attributes omitted.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("aria-expanded", self.expanded.to_string())];
        if let Some(id) = &self.active_descendant {
            pairs.push(("aria-activedescendant", id.clone()));
        }
        if let Some(id) = &self.described_by {
            pairs.push(("aria-describedby", id.clone()));
        }
        pairs.push(("aria-owns", self.owns.clone()));
        pairs.push(("aria-autocomplete", self.autocomplete.as_str().to_string()));
        pairs
    }
}

/// Attributes for the listbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListboxAttributes {
    /// Element id.
    pub id: String,
    /// Always `listbox`.
    pub role: &'static str,
}

impl ListboxAttributes {
    /// Listbox attributes for base id `id`.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: listbox_id(id),
            role: "listbox",
        }
    }
}

/// Attributes and presentation flags for one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionAttributes {
    /// Element id.
    pub id: String,
    /// Always `option`.
    pub role: &'static str,
    /// `aria-selected`.
    pub selected: bool,
    /// `aria-posinset` (1-based).
    pub pos_in_set: usize,
    /// `aria-setsize`.
    pub set_size: usize,
    /// `tabindex`; options are focused programmatically.
    pub tab_index: i32,
    /// Keyboard focus is on this option.
    pub focused: bool,
    /// Pointer is over this option.
    pub hovered: bool,
}

impl OptionAttributes {
    /// Attributes for the result at `index`.
    ///
    /// Hover takes over the highlight: while some other option is hovered,
    /// this one is not rendered as focused.
    #[must_use]
    pub fn project(state: &AutocompleteState, id: &str, index: usize) -> Self {
        let hovered = state.hovered == Some(index);
        let focused =
            state.focused == Highlight::At(index) && state.hovered.is_none_or(|h| h == index);
        Self {
            id: option_id(id, index),
            role: "option",
            selected: state.selected == Highlight::At(index),
            pos_in_set: index + 1,
            set_size: state.results.len(),
            tab_index: -1,
            focused,
            hovered,
        }
    }

    /// Attribute name/value pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("role", self.role.to_string()),
            ("aria-selected", self.selected.to_string()),
            ("aria-posinset", self.pos_in_set.to_string()),
            ("aria-setsize", self.set_size.to_string()),
            ("tabindex", self.tab_index.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_state() -> AutocompleteState {
        AutocompleteState {
            query: "Ap".into(),
            results: vec![0, 1],
            menu_open: true,
            focused: Highlight::At(1),
            selected: Highlight::At(1),
            ..AutocompleteState::default()
        }
    }

    #[test]
    fn closed_state_projection() {
        let attrs = AriaAttributes::project(&AutocompleteState::new(), "ac", false);
        assert_eq!(
            attrs.to_pairs(),
            [
                ("aria-expanded", "false".to_string()),
                ("aria-owns", "ac__listbox".to_string()),
                ("aria-autocomplete", "list".to_string()),
            ]
        );
    }

    #[test]
    fn focused_option_is_active_descendant() {
        let attrs = AriaAttributes::project(&open_state(), "ac", true);
        assert!(attrs.expanded);
        assert_eq!(attrs.active_descendant.as_deref(), Some("ac__option--1"));
        assert_eq!(attrs.autocomplete, AutocompleteMode::Both);
    }

    #[test]
    fn cleared_focus_has_no_active_descendant() {
        let mut state = open_state();
        state.focused = Highlight::Cleared;
        let attrs = AriaAttributes::project(&state, "ac", false);
        assert_eq!(attrs.active_descendant, None);
    }

    #[test]
    fn hint_is_described_only_while_shown() {
        let mut state = AutocompleteState::new();
        state.aria_hint = true;
        let attrs = AriaAttributes::project(&state, "ac", false);
        assert_eq!(attrs.described_by.as_deref(), Some("ac__assistiveHint"));
    }

    #[test]
    fn option_projection() {
        let state = open_state();
        let first = OptionAttributes::project(&state, "ac", 0);
        let second = OptionAttributes::project(&state, "ac", 1);
        assert!(!first.selected && !first.focused);
        assert!(second.selected && second.focused);
        assert_eq!(second.pos_in_set, 2);
        assert_eq!(second.set_size, 2);
        assert_eq!(second.to_pairs()[0], ("id", "ac__option--1".to_string()));
        assert_eq!(second.to_pairs()[5], ("tabindex", "-1".to_string()));
    }

    #[test]
    fn hover_elsewhere_suppresses_focus_styling() {
        let mut state = open_state();
        state.hovered = Some(0);
        assert!(OptionAttributes::project(&state, "ac", 0).hovered);
        assert!(!OptionAttributes::project(&state, "ac", 1).focused);
    }

    #[test]
    fn listbox_attributes() {
        let attrs = ListboxAttributes::new("ac");
        assert_eq!(attrs.id, "ac__listbox");
        assert_eq!(attrs.role, "listbox");
    }
}
