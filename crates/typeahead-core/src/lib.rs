#![forbid(unsafe_code)]

//! Core: input events, platform capabilities, debounce timing, and ids.

pub mod debounce;
pub mod event;
pub mod id;
pub mod logging;
pub mod platform;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
