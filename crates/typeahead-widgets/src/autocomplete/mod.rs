#![forbid(unsafe_code)]

//! Autocomplete combobox controller.
//!
//! A headless combobox: the host forwards raw focus, pointer, and key input
//! as [`Input`] values and applies the returned [`Effect`]s (moving focus,
//! suppressing default actions, re-emitting events). Rendering is left to the
//! host, which reads the query, result labels, and ARIA attributes back from
//! the controller.
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//! use typeahead_core::event::KeyCode;
//! use typeahead_widgets::autocomplete::{Autocomplete, AutocompleteConfig, Input};
//!
//! let fruits: Vec<HashMap<String, String>> = ["Apple", "Apricot", "Banana"]
//!     .iter()
//!     .map(|name| HashMap::from([("name".to_string(), name.to_string())]))
//!     .collect();
//!
//! let mut ac = Autocomplete::new(AutocompleteConfig::new("name"), fruits).unwrap();
//! ac.handle_event(&Input::Change("Ap".into()));
//! assert_eq!(ac.options(), ["Apple", "Apricot"]);
//!
//! ac.handle_event(&Input::key(KeyCode::Down));
//! ac.handle_event(&Input::key(KeyCode::Enter));
//! assert_eq!(ac.query(), "Apple");
//! ```
//!
//! # Submodules
//!
//! - [`state`]: the pure reducer and its state
//! - [`filter`]: result filtering
//! - [`record`]: option records and labels
//! - [`aria`]: ARIA attribute projection
//! - [`status`]: screen-reader announcements
//! - [`config`]: configuration

pub mod aria;
pub mod config;
pub mod filter;
pub mod record;
pub mod state;
pub mod status;

pub use aria::{AriaAttributes, AutocompleteMode, ListboxAttributes, OptionAttributes};
pub use config::{AutocompleteConfig, ConfigError, DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_LENGTH};
pub use filter::{ResultFilter, SearchFn};
pub use record::{FieldValue, LabelFn, Labeler, MISSING_FIELD_LABEL, Record};
pub use state::{
    AutocompleteState, Effect, Highlight, Input, KeySlot, MenuPhase, ReduceContext, Transition,
    reduce,
};
pub use status::{StatusAnnouncer, StatusSnapshot, StatusTemplates};

use std::fmt;
use std::time::Instant;

use typeahead_core::event::FocusTarget;
use typeahead_core::id::use_id;
use typeahead_core::platform::PlatformCapabilities;
use typeahead_text::normalize::query_length;
use unicode_segmentation::UnicodeSegmentation;

/// Caller-supplied confirm handler.
pub type ConfirmFn<T> = dyn FnMut(&T);

/// Headless autocomplete controller.
pub struct Autocomplete<T> {
    config: AutocompleteConfig,
    platform: PlatformCapabilities,
    candidates: Vec<T>,
    /// Base id for ARIA wiring.
    id: String,
    state: AutocompleteState,
    format_label: Option<Box<LabelFn<T>>>,
    search: Option<Box<SearchFn<T>>>,
    on_confirm: Option<Box<ConfirmFn<T>>>,
    templates: StatusTemplates,
    announcer: StatusAnnouncer,
    /// Leading-edge announcement waiting for the next poll.
    ready_status: Option<String>,
    in_focus: bool,
    mounted: bool,
}

impl<T> fmt::Debug for Autocomplete<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autocomplete")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("platform", &self.platform)
            .field("candidates", &self.candidates.len())
            .field("state", &self.state)
            .field("in_focus", &self.in_focus)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl<T: Record> Autocomplete<T> {
    /// Create a controller over `candidates`.
    ///
    /// Fails when the configuration is invalid.
    pub fn new(config: AutocompleteConfig, candidates: Vec<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        let announcer = StatusAnnouncer::new(config.status_debounce())?;
        let id = use_id(config.id.as_deref());
        typeahead_core::debug!(
            id = %id,
            candidates = candidates.len(),
            option_key = %config.option_key,
            "autocomplete created"
        );
        Ok(Self {
            config,
            platform: PlatformCapabilities::default(),
            candidates,
            id,
            state: AutocompleteState::new(),
            format_label: None,
            search: None,
            on_confirm: None,
            templates: StatusTemplates::default(),
            announcer,
            ready_status: None,
            in_focus: false,
            mounted: true,
        })
    }

    /// Set the platform capabilities (builder).
    #[must_use]
    pub fn with_platform(mut self, platform: PlatformCapabilities) -> Self {
        self.platform = platform;
        self
    }

    /// Produce labels with `format_label` instead of the option key (builder).
    #[must_use]
    pub fn with_format_label(mut self, format_label: impl Fn(&T) -> String + 'static) -> Self {
        self.format_label = Some(Box::new(format_label));
        self
    }

    /// Filter with a custom search (builder).
    ///
    /// Only consulted when no `data_keys` are configured.
    #[must_use]
    pub fn with_search(
        mut self,
        search: impl Fn(&str, &[&T]) -> Vec<usize> + 'static,
    ) -> Self {
        self.search = Some(Box::new(search));
        self
    }

    /// Call `on_confirm` with each confirmed option (builder).
    #[must_use]
    pub fn on_confirm(mut self, on_confirm: impl FnMut(&T) + 'static) -> Self {
        self.on_confirm = Some(Box::new(on_confirm));
        self
    }

    /// Replace the status message templates (builder).
    #[must_use]
    pub fn with_status_templates(mut self, templates: StatusTemplates) -> Self {
        self.templates = templates;
        self
    }

    // --- Accessors ---

    /// Base id for ARIA wiring.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    /// The platform capabilities.
    #[must_use]
    pub fn platform(&self) -> PlatformCapabilities {
        self.platform
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AutocompleteState {
        &self.state
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.state.query
    }

    /// The candidate list.
    #[must_use]
    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    /// Current results, as indices into [`candidates`](Self::candidates).
    #[must_use]
    pub fn results(&self) -> &[usize] {
        &self.state.results
    }

    /// Current results as options.
    pub fn result_options(&self) -> impl Iterator<Item = &T> {
        self.state
            .results
            .iter()
            .filter_map(|&i| self.candidates.get(i))
    }

    /// Labels of the current results, in display order.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        self.result_options()
            .map(|option| self.format_option(Some(option)))
            .collect()
    }

    /// Tagged view of the menu.
    #[must_use]
    pub fn menu_phase(&self) -> MenuPhase {
        self.state.phase()
    }

    /// Whether the widget currently has focus.
    #[must_use]
    pub fn in_focus(&self) -> bool {
        self.in_focus
    }

    /// Whether the controller still accepts input.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Label for `option`; empty for `None`.
    #[must_use]
    pub fn format_option(&self, option: Option<&T>) -> String {
        self.labeler().label(option)
    }

    /// Whether inline auto-select is active.
    #[must_use]
    pub fn can_autoselect(&self) -> bool {
        self.config.autoselect && self.platform.supports_inline_autoselect
    }

    // --- Candidates ---

    /// Replace the candidate list.
    ///
    /// The previous results are dropped and the menu closes, so the next
    /// query filters the new list from scratch.
    pub fn set_candidates(&mut self, candidates: Vec<T>) {
        self.candidates = candidates;
        self.handle_event(&Input::ResetOptions);
    }

    // --- Event Handling ---

    /// Handle an input event, timing announcements against the system clock.
    pub fn handle_event(&mut self, input: &Input) -> Vec<Effect> {
        self.handle_event_at(input, Instant::now())
    }

    /// Handle an input event at `now`.
    ///
    /// Returns the effects for the host, in order. Confirm effects have
    /// already been delivered to the confirm callback. After
    /// [`unmount`](Self::unmount) this does nothing.
    pub fn handle_event_at(&mut self, input: &Input, now: Instant) -> Vec<Effect> {
        if !self.mounted {
            return Vec::new();
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("autocomplete.handle_event", id = %self.id).entered();

        let Transition { state, effects } = {
            let ctx = self.context();
            reduce(&self.state, input, &ctx)
        };
        self.state = state;
        self.track_focus(input);

        for effect in &effects {
            if let Effect::Confirm(candidate) = effect
                && let (Some(on_confirm), Some(option)) =
                    (self.on_confirm.as_mut(), self.candidates.get(*candidate))
            {
                typeahead_core::debug!(candidate, "option confirmed");
                on_confirm(option);
            }
        }

        let message = self.status_message();
        if let Some(released) = self.announcer.update(message, now) {
            self.ready_status = Some(released);
        }

        effects
    }

    fn track_focus(&mut self, input: &Input) {
        match input {
            Input::Focus | Input::OptionFocus(_) => self.in_focus = true,
            Input::Blur { related } | Input::OptionBlur { related, .. } => {
                self.in_focus = related.is_internal();
            }
            Input::Key { target, .. } if *target != FocusTarget::Outside => {
                self.in_focus = true;
            }
            _ => {}
        }
    }

    fn labeler(&self) -> Labeler<'_, T> {
        Labeler::new(&self.config.option_key, self.format_label.as_deref())
    }

    fn context(&self) -> ReduceContext<'_, T> {
        ReduceContext {
            config: &self.config,
            platform: self.platform,
            candidates: &self.candidates,
            labeler: self.labeler(),
            filter: ResultFilter::new(&self.config, self.search.as_deref()),
        }
    }

    // --- Accessibility ---

    /// Attributes for the text input.
    #[must_use]
    pub fn aria_attributes(&self) -> AriaAttributes {
        AriaAttributes::project(&self.state, &self.id, self.can_autoselect())
    }

    /// Attributes for the listbox.
    #[must_use]
    pub fn listbox_attributes(&self) -> ListboxAttributes {
        ListboxAttributes::new(&self.id)
    }

    /// Attributes for the result at `index`, if it exists.
    #[must_use]
    pub fn option_attributes(&self, index: usize) -> Option<OptionAttributes> {
        (index < self.state.results.len())
            .then(|| OptionAttributes::project(&self.state, &self.id, index))
    }

    /// Inline completion shown behind the input.
    ///
    /// Non-empty only while auto-select is active and the query names an
    /// option: the query followed by the rest of the selected option's label.
    #[must_use]
    pub fn hint_value(&self) -> String {
        let index = match self.state.selected {
            Highlight::Unset => 0,
            Highlight::At(i) => i,
            Highlight::Cleared => return String::new(),
        };
        let Some(option) = self
            .state
            .results
            .get(index)
            .and_then(|&candidate| self.candidates.get(candidate))
        else {
            return String::new();
        };
        let has_label = option
            .field(&self.config.option_key)
            .is_some_and(|value| !matches!(value, FieldValue::Null | FieldValue::Str("")));
        if !has_label || !self.state.has_valid_option || !self.can_autoselect() {
            return String::new();
        }

        let label = self.format_option(Some(option));
        let skip = self.state.query.graphemes(true).count();
        let rest: String = label.graphemes(true).skip(skip).collect();
        format!("{}{rest}", self.state.query)
    }

    /// Whether to render the "no results" row.
    #[must_use]
    pub fn should_show_no_options_found(&self) -> bool {
        self.config.show_no_options_found
            && self.in_focus
            && self.state.results.is_empty()
            && !self.state.query.is_empty()
            && query_length(&self.state.query) >= self.config.min_length
    }

    // --- Status ---

    /// Status message for the current state, before debouncing.
    #[must_use]
    pub fn status_message(&self) -> String {
        let selected_index = self.state.selected.index();
        let selected_option = selected_index.map(|i| {
            let option = self
                .state
                .results
                .get(i)
                .and_then(|&candidate| self.candidates.get(candidate));
            self.format_option(option)
        });
        self.templates.message(&StatusSnapshot {
            in_focus: self.in_focus,
            has_valid_option: self.state.has_valid_option,
            query_length: query_length(&self.state.query),
            min_length: self.config.min_length,
            length: self.state.results.len(),
            selected_option: selected_option.as_deref(),
            selected_index,
        })
    }

    /// Release the debounced status message once it is due.
    pub fn poll_status(&mut self, now: Instant) -> Option<String> {
        self.ready_status
            .take()
            .or_else(|| self.announcer.poll(now))
    }

    /// When the pending status message is due, if one is waiting.
    #[must_use]
    pub fn status_deadline(&self) -> Option<Instant> {
        self.announcer.deadline()
    }

    /// The last status message released to the host.
    #[must_use]
    pub fn announced_status(&self) -> &str {
        self.announcer.announced()
    }

    // --- Lifecycle ---

    /// Tear down: cancel the pending announcement and drop callbacks.
    ///
    /// Later input is ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        typeahead_core::debug!(id = %self.id, "autocomplete unmounted");
        self.announcer.cancel();
        self.ready_status = None;
        self.on_confirm = None;
        self.format_label = None;
        self.search = None;
        self.in_focus = false;
        self.mounted = false;
    }
}
