#![forbid(unsafe_code)]

//! Cancellable debounce timer over injected time.
//!
//! A [`Debouncer`] delays a value until a quiet period has elapsed since the
//! last [`push`](Debouncer::push). A new push inside the window cancels the
//! pending one and restarts the window (latest wins). Nothing here sleeps or
//! spawns: the caller passes `now` and drains expired values with
//! [`poll`](Debouncer::poll), typically from its tick or animation-frame
//! callback.
//!
//! # Options
//!
//! - `leading`: fire the first push of a window immediately
//! - `trailing`: fire the latest value when the window closes (default)
//! - `max_wait`: upper bound on how long a continuous burst can postpone
//!   the trailing fire
//!
//! # Invariants
//!
//! 1. A pending deadline is never later than `window_start + max_wait`.
//! 2. [`cancel`](Debouncer::cancel) leaves no pending value and no deadline.
//! 3. Identical push/poll sequences yield identical outputs.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use typeahead_core::debounce::{DebounceConfig, Debouncer};
//!
//! let mut debouncer = Debouncer::new(DebounceConfig::new(Duration::from_millis(100))).unwrap();
//! let t0 = Instant::now();
//!
//! assert_eq!(debouncer.push("a", t0), None);
//! assert_eq!(debouncer.push("ab", t0 + Duration::from_millis(50)), None);
//! assert_eq!(debouncer.poll(t0 + Duration::from_millis(120)), None);
//! assert_eq!(debouncer.poll(t0 + Duration::from_millis(150)), Some("ab"));
//! ```

use std::fmt;
use std::time::{Duration, Instant};

/// Delay used when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Configuration for a [`Debouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiet period required before the trailing fire.
    pub delay: Duration,
    /// Fire the first push of a window immediately.
    pub leading: bool,
    /// Fire the latest value when the window closes.
    pub trailing: bool,
    /// Longest a burst may postpone the trailing fire. `None` = unbounded.
    pub max_wait: Option<Duration>,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl DebounceConfig {
    /// Trailing-only debounce with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            leading: false,
            trailing: true,
            max_wait: None,
        }
    }

    /// Set leading-edge firing (builder).
    #[must_use]
    pub const fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    /// Set trailing-edge firing (builder).
    #[must_use]
    pub const fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// Bound the total postponement of a burst (builder).
    #[must_use]
    pub const fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Check that the options are consistent.
    pub fn validate(&self) -> Result<(), DebounceError> {
        match self.max_wait {
            Some(max_wait) if max_wait < self.delay => Err(DebounceError::MaxWaitBelowDelay {
                max_wait,
                delay: self.delay,
            }),
            _ => Ok(()),
        }
    }
}

/// Invalid debounce configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceError {
    /// `max_wait` is shorter than `delay`.
    MaxWaitBelowDelay {
        /// Configured maximum wait.
        max_wait: Duration,
        /// Configured delay.
        delay: Duration,
    },
}

impl fmt::Display for DebounceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxWaitBelowDelay { max_wait, delay } => write!(
                f,
                "max_wait ({max_wait:?}) cannot be lower than delay ({delay:?})"
            ),
        }
    }
}

impl std::error::Error for DebounceError {}

/// Debounces values of type `T`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    config: DebounceConfig,
    /// Start of the current burst window.
    window_start: Option<Instant>,
    /// When the pending timer fires.
    deadline: Option<Instant>,
    /// Latest value waiting for the trailing fire.
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer, validating the configuration.
    pub fn new(config: DebounceConfig) -> Result<Self, DebounceError> {
        config.validate()?;
        Ok(Self {
            config,
            window_start: None,
            deadline: None,
            pending: None,
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Submit a value.
    ///
    /// Returns `Some(value)` when it fires on the leading edge, `None` when it
    /// was scheduled. A window whose deadline already passed without a
    /// [`poll`](Self::poll) is closed first; its pending value is superseded.
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            self.reset_window();
        }

        if self.config.leading && self.window_start.is_none() {
            self.window_start = Some(now);
            self.deadline = Some(now + self.config.delay);
            self.pending = None;
            return Some(value);
        }

        let mut wait = self.config.delay;
        if let (Some(max_wait), Some(start)) = (self.config.max_wait, self.window_start) {
            let remaining = max_wait.saturating_sub(now.saturating_duration_since(start));
            wait = wait.min(remaining);
        }

        self.window_start.get_or_insert(now);
        self.deadline = Some(now + wait);
        self.pending = Some(value);
        None
    }

    /// Release the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                let value = self.pending.take();
                self.reset_window();
                if self.config.trailing { value } else { None }
            }
            _ => None,
        }
    }

    /// Drop any pending value and close the window.
    pub fn cancel(&mut self) {
        self.reset_window();
    }

    /// When the pending timer fires, if one is armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a value is waiting for the trailing fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn reset_window(&mut self) {
        self.window_start = None;
        self.deadline = None;
        self.pending = None;
    }
}
