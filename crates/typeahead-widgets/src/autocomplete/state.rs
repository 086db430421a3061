#![forbid(unsafe_code)]

//! Combobox interaction state and its reducer.
//!
//! [`reduce`] is a pure function from `(state, input)` to a new state plus the
//! effects the host should carry out. It needs no host: tests drive it with
//! plain [`Input`] values.
//!
//! # Highlight Sentinels
//!
//! Option highlights are three-valued:
//!
//! - [`Highlight::Unset`] - no interaction context yet (the component's `null`)
//! - [`Highlight::Cleared`] - menu in use, nothing highlighted (its `-1`)
//! - [`Highlight::At`] - a valid index into the current results
//!
//! Confirm handlers treat both sentinels as "nothing selected".
//!
//! # Invariants
//!
//! 1. A closed menu has no focused option and no hovered option.
//! 2. `focused`, `selected`, and `hovered` are sentinels or valid indices
//!    into `results`.
//! 3. `results` is recomputed by the filter, never edited in place.
//!
//! A settle step at the end of every transition enforces 1 and 2.

use typeahead_core::event::{FocusTarget, KeyCode, KeyEvent};
use typeahead_core::platform::PlatformCapabilities;
use typeahead_text::search::equals_ignore_case;

use super::config::AutocompleteConfig;
use super::filter::ResultFilter;
use super::record::{Labeler, Record};

/// An option highlight (focus or selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    /// No interaction context yet.
    #[default]
    Unset,
    /// Menu in use, nothing highlighted.
    Cleared,
    /// The result at this index.
    At(usize),
}

impl Highlight {
    /// The highlighted index, if any.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::At(i) => Some(i),
            _ => None,
        }
    }

    /// The component's numeric encoding: `None` for unset, `-1` for cleared.
    #[must_use]
    pub fn as_sentinel(self) -> Option<isize> {
        match self {
            Self::Unset => None,
            Self::Cleared => Some(-1),
            Self::At(i) => Some(isize::try_from(i).unwrap_or(isize::MAX)),
        }
    }
}

/// Tagged view of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuPhase {
    /// Menu collapsed.
    Closed,
    /// Menu open, no option selected.
    OpenNoSelection,
    /// Menu open with the option at this index selected.
    OpenSelection(usize),
}

/// Combobox state. One per controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteState {
    /// Current text of the input.
    pub query: String,
    /// Matching options, as indices into the candidate list.
    pub results: Vec<usize>,
    /// Option with keyboard focus.
    pub focused: Highlight,
    /// Option under the pointer.
    pub hovered: Option<usize>,
    /// Option that Enter (or confirm-on-blur) would confirm.
    pub selected: Highlight,
    /// Whether the menu is expanded.
    pub menu_open: bool,
    /// Whether the query equals some result's label.
    pub has_valid_option: bool,
    /// Whether the assistive hint is shown (query cleared).
    pub aria_hint: bool,
}

impl AutocompleteState {
    /// Initial, closed state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tagged view of the menu.
    #[must_use]
    pub fn phase(&self) -> MenuPhase {
        match (self.menu_open, self.selected) {
            (false, _) => MenuPhase::Closed,
            (true, Highlight::At(i)) => MenuPhase::OpenSelection(i),
            (true, _) => MenuPhase::OpenNoSelection,
        }
    }

    /// Check the documented invariants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let len = self.results.len();
        let in_range = |h: Highlight| h.index().is_none_or(|i| i < len);
        let closed_ok =
            self.menu_open || (self.focused.index().is_none() && self.hovered.is_none());
        in_range(self.focused)
            && in_range(self.selected)
            && self.hovered.is_none_or(|i| i < len)
            && closed_ok
    }

    fn settle(&mut self) {
        let len = self.results.len();
        let clamp = |h: Highlight| match h {
            Highlight::At(i) if i >= len => Highlight::Cleared,
            other => other,
        };
        self.focused = clamp(self.focused);
        self.selected = clamp(self.selected);
        if self.hovered.is_some_and(|i| i >= len) {
            self.hovered = None;
        }
        if !self.menu_open {
            if self.focused.index().is_some() {
                self.focused = Highlight::Cleared;
            }
            self.hovered = None;
        }
    }
}

/// Raw interaction fed to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// The text input's value changed.
    Change(String),
    /// The text input was clicked.
    InputClick,
    /// The text input gained focus.
    Focus,
    /// The text input lost focus to `related`.
    Blur {
        /// Element receiving focus.
        related: FocusTarget,
    },
    /// An option element gained focus.
    OptionFocus(usize),
    /// An option element lost focus to `related`.
    OptionBlur {
        /// Result index of the option losing focus.
        index: usize,
        /// Element receiving focus.
        related: FocusTarget,
    },
    /// The pointer entered an option.
    OptionHover(usize),
    /// The pointer left the listbox.
    MenuLeave,
    /// A pointer button went down on an option.
    OptionMouseDown,
    /// An option was clicked.
    OptionClick(usize),
    /// A key event on `target`.
    Key {
        /// The key event.
        event: KeyEvent,
        /// Element the event was dispatched to.
        target: FocusTarget,
    },
    /// The clear button was activated.
    Clear,
    /// Drop results and close the menu, keeping the query.
    ResetOptions,
}

impl Input {
    /// Key input dispatched to the text input.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::Key {
            event: KeyEvent::new(code),
            target: FocusTarget::TextInput,
        }
    }
}

/// Key-specific keydown notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySlot {
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Space bar.
    Space,
    /// Enter.
    Enter,
    /// Escape.
    Escape,
    /// A printable character.
    Printable(char),
}

/// Something the host must do or may observe after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The bound value changed: new query and current results.
    UpdateModelValue {
        /// New query text.
        query: String,
        /// Current results (candidate indices).
        results: Vec<usize>,
    },
    /// The user typed; carries the input value.
    Input(String),
    /// The widget gained focus.
    Focus,
    /// The widget lost focus.
    Blur,
    /// The input or an option was clicked (or activated by key).
    Click,
    /// The widget was cleared.
    Clear,
    /// A handled key went down.
    Keydown(KeySlot),
    /// The committed query changed.
    Change(String),
    /// Invoke the confirm callback with this candidate.
    Confirm(usize),
    /// Move focus to this element.
    RequestFocus(FocusTarget),
    /// Suppress the host's default action for the current event.
    PreventDefault,
}

/// Everything the reducer reads besides the state.
pub struct ReduceContext<'a, T> {
    /// Widget configuration.
    pub config: &'a AutocompleteConfig,
    /// Platform quirks.
    pub platform: PlatformCapabilities,
    /// Full candidate list.
    pub candidates: &'a [T],
    /// Label producer.
    pub labeler: Labeler<'a, T>,
    /// Result filter.
    pub filter: ResultFilter<'a, T>,
}

impl<T> std::fmt::Debug for ReduceContext<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReduceContext")
            .field("platform", &self.platform)
            .field("candidates", &self.candidates.len())
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl<T: Record> ReduceContext<'_, T> {
    /// Whether inline auto-select is active.
    #[must_use]
    pub fn can_autoselect(&self) -> bool {
        self.config.autoselect && self.platform.supports_inline_autoselect
    }

    /// Label of the result at `index`; empty when out of range.
    #[must_use]
    pub fn result_label(&self, state: &AutocompleteState, index: usize) -> String {
        let option = state
            .results
            .get(index)
            .and_then(|&candidate| self.candidates.get(candidate));
        self.labeler.label(option)
    }
}

/// Result of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the input.
    pub state: AutocompleteState,
    /// Effects, in the order they occurred.
    pub effects: Vec<Effect>,
}

/// Apply `input` to `state`.
#[must_use]
pub fn reduce<T: Record>(
    state: &AutocompleteState,
    input: &Input,
    ctx: &ReduceContext<'_, T>,
) -> Transition {
    let mut reducer = Reducer {
        state: state.clone(),
        effects: Vec::new(),
        ctx,
    };
    reducer.apply(input);
    reducer.state.settle();
    debug_assert!(
        reducer.state.is_consistent(),
        "inconsistent state after {input:?}: {:?}",
        reducer.state
    );
    typeahead_core::trace!(
        ?input,
        phase = ?reducer.state.phase(),
        results = reducer.state.results.len(),
        effects = reducer.effects.len(),
        "autocomplete transition"
    );
    Transition {
        state: reducer.state,
        effects: reducer.effects,
    }
}

struct Reducer<'c, 'a, T> {
    state: AutocompleteState,
    effects: Vec<Effect>,
    ctx: &'c ReduceContext<'a, T>,
}

impl<T: Record> Reducer<'_, '_, T> {
    fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn apply(&mut self, input: &Input) {
        match input {
            Input::Change(value) => self.on_change(value),
            Input::InputClick => {
                self.refilter();
                self.emit(Effect::Click);
            }
            Input::Focus => self.on_focus(),
            Input::Blur { related } => self.on_blur(*related),
            Input::OptionFocus(index) => self.focus_option(*index),
            Input::OptionBlur { index, related } => self.on_option_blur(*index, *related),
            Input::OptionHover(index) => {
                if self.ctx.platform.supports_hover_selection && *index < self.state.results.len()
                {
                    self.state.hovered = Some(*index);
                }
            }
            Input::MenuLeave => self.state.hovered = None,
            Input::OptionMouseDown => self.emit(Effect::PreventDefault),
            Input::OptionClick(index) => {
                if self.confirm(*index) {
                    self.emit(Effect::Click);
                }
            }
            Input::Key { event, target } => {
                if event.is_press() {
                    self.on_key(event, *target);
                }
            }
            Input::Clear => {
                self.state = AutocompleteState::default();
                self.emit(Effect::Clear);
            }
            Input::ResetOptions => {
                self.state.focused = Highlight::Unset;
                self.state.hovered = None;
                self.state.menu_open = false;
                self.state.results.clear();
                self.state.selected = Highlight::Unset;
            }
        }
    }

    fn on_change(&mut self, value: &str) {
        if value == self.state.query {
            return;
        }
        self.state.query = value.to_string();
        self.state.aria_hint = value.is_empty();
        self.refilter();
        self.emit_model_value();
        self.emit(Effect::Input(value.to_string()));
    }

    /// Re-run the filter for the current query.
    fn refilter(&mut self) {
        let filter = &self.ctx.filter;
        if !filter.accepts(&self.state.query) {
            self.state.menu_open = false;
            self.state.results.clear();
            return;
        }

        let results = filter.filter(&self.state.query, self.ctx.candidates, &self.state.results);
        if !self.state.menu_open && !results.is_empty() {
            self.state.menu_open = true;
        } else if self.state.menu_open && results.is_empty() {
            self.state.menu_open = false;
        }
        self.state.selected = if self.ctx.can_autoselect() && !results.is_empty() {
            Highlight::At(0)
        } else {
            Highlight::Cleared
        };
        if self.state.focused.index().is_some() {
            self.state.focused = Highlight::Cleared;
        }
        self.state.hovered = None;
        self.state.has_valid_option = false;
        self.state.results = results;
    }

    fn on_focus(&mut self) {
        let reopen = !self.state.has_valid_option
            && self.ctx.filter.accepts(&self.state.query)
            && !self.state.results.is_empty();
        self.state.focused = Highlight::Cleared;
        if reopen {
            self.state.menu_open = true;
            self.state.selected = Highlight::Cleared;
        }
        self.emit(Effect::Focus);
    }

    fn on_blur(&mut self, related: FocusTarget) {
        if !related.is_internal() {
            let candidate_query = match self.state.selected.index() {
                Some(i) if !self.ctx.platform.restores_query_on_blur => {
                    self.ctx.result_label(&self.state, i)
                }
                _ => self.state.query.clone(),
            };
            let keep_open = self.state.menu_open && self.ctx.platform.keeps_menu_open_on_blur;
            self.commit_blur(candidate_query, keep_open);
        }
        self.emit(Effect::Blur);
    }

    fn on_option_blur(&mut self, index: usize, related: FocusTarget) {
        if related.is_internal() {
            return;
        }
        let label_index = match self.state.selected {
            Highlight::At(i) => Some(i),
            Highlight::Unset => Some(index),
            Highlight::Cleared => None,
        };
        let candidate_query = match label_index {
            Some(i) => self.ctx.result_label(&self.state, i),
            None => self.state.query.clone(),
        };
        let keep_open = self.state.menu_open && self.ctx.platform.keeps_menu_open_on_blur;
        self.commit_blur(candidate_query, keep_open);
        self.emit(Effect::Blur);
    }

    /// Leave the widget: confirm on blur if configured, then reset indices.
    fn commit_blur(&mut self, candidate_query: String, keep_open: bool) {
        let confirmed = if self.ctx.config.confirm_on_blur {
            self.state
                .selected
                .index()
                .and_then(|i| self.state.results.get(i).copied())
        } else {
            None
        };

        let new_query = match confirmed {
            Some(candidate) => {
                self.emit(Effect::Confirm(candidate));
                candidate_query
            }
            None => self.state.query.clone(),
        };

        self.state.has_valid_option = self.query_matches_option(&new_query);
        self.state.focused = Highlight::Unset;
        self.state.selected = Highlight::Unset;
        self.state.menu_open = keep_open;
        self.set_query(new_query);
    }

    fn query_matches_option(&self, query: &str) -> bool {
        self.state.results.iter().any(|&candidate| {
            let label = self.ctx.labeler.label(self.ctx.candidates.get(candidate));
            equals_ignore_case(&label, query)
        })
    }

    fn focus_option(&mut self, index: usize) {
        if index >= self.state.results.len() {
            return;
        }
        self.state.focused = Highlight::At(index);
        self.state.hovered = None;
        self.state.selected = Highlight::At(index);
        self.emit(Effect::RequestFocus(FocusTarget::OptionAt(index)));
    }

    /// Confirm the result at `index`. Returns `false` when out of range.
    fn confirm(&mut self, index: usize) -> bool {
        let Some(&candidate) = self.state.results.get(index) else {
            return false;
        };
        let label = self.ctx.labeler.label(self.ctx.candidates.get(candidate));
        self.emit(Effect::Confirm(candidate));

        self.state.focused = Highlight::Cleared;
        self.state.hovered = None;
        self.state.menu_open = false;
        self.state.selected = Highlight::Cleared;
        self.state.has_valid_option = true;
        // Confirming always reports the value, even when the text is unchanged.
        self.replace_query(label);
        true
    }

    fn set_query(&mut self, query: String) {
        if query != self.state.query {
            self.replace_query(query);
        }
    }

    fn replace_query(&mut self, query: String) {
        self.state.query = query;
        self.state.aria_hint = self.state.query.is_empty();
        self.emit_model_value();
        self.emit(Effect::Change(self.state.query.clone()));
    }

    fn emit_model_value(&mut self) {
        self.emit(Effect::UpdateModelValue {
            query: self.state.query.clone(),
            results: self.state.results.clone(),
        });
    }

    fn on_key(&mut self, event: &KeyEvent, target: FocusTarget) {
        match event.code {
            KeyCode::Enter => self.on_enter(),
            KeyCode::Escape => {
                let query = self.state.query.clone();
                self.commit_blur(query, false);
                self.emit(Effect::Keydown(KeySlot::Escape));
            }
            KeyCode::Char(' ') => self.on_space(),
            KeyCode::Up => self.on_arrow_up(),
            KeyCode::Down => self.on_arrow_down(),
            _ => {
                if let Some(c) = event.printable_char() {
                    if target != FocusTarget::TextInput {
                        self.emit(Effect::RequestFocus(FocusTarget::TextInput));
                    }
                    self.emit(Effect::Keydown(KeySlot::Printable(c)));
                }
            }
        }
    }

    fn on_enter(&mut self) {
        if !self.state.menu_open {
            return;
        }
        match self.state.selected {
            Highlight::Unset => return,
            Highlight::Cleared => {}
            Highlight::At(index) => {
                if self.confirm(index) {
                    self.emit(Effect::Click);
                }
            }
        }
        self.emit(Effect::Keydown(KeySlot::Enter));
    }

    fn on_space(&mut self) {
        if !self.state.menu_open && self.state.query.is_empty() {
            self.state.menu_open = true;
        }
        if let Highlight::At(index) = self.state.focused {
            self.emit(Effect::PreventDefault);
            if self.confirm(index) {
                self.emit(Effect::Click);
            }
        }
        self.emit(Effect::Keydown(KeySlot::Space));
    }

    fn on_arrow_up(&mut self) {
        if self.state.menu_open {
            match self.state.selected {
                Highlight::At(0) => {
                    self.state.focused = Highlight::Cleared;
                    self.state.selected = Highlight::Cleared;
                    self.state.hovered = None;
                    self.emit(Effect::RequestFocus(FocusTarget::TextInput));
                }
                Highlight::At(index) => self.focus_option(index - 1),
                Highlight::Unset | Highlight::Cleared => {}
            }
        }
        self.emit(Effect::Keydown(KeySlot::ArrowUp));
    }

    fn on_arrow_down(&mut self) {
        let len = self.state.results.len();
        if !self.state.menu_open {
            self.state.menu_open = true;
            self.state.hovered = None;
            if len == 0 {
                self.state.focused = Highlight::Cleared;
                self.state.selected = Highlight::Cleared;
            } else {
                self.focus_option(0);
            }
        } else if len > 0 {
            let next = match self.state.selected {
                Highlight::Unset | Highlight::Cleared => Some(0),
                Highlight::At(i) if i + 1 < len => Some(i + 1),
                Highlight::At(_) => None,
            };
            if let Some(next) = next {
                self.focus_option(next);
            }
        }
        self.emit(Effect::Keydown(KeySlot::ArrowDown));
    }
}
