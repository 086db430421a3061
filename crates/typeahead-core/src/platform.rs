#![forbid(unsafe_code)]

//! Platform capability model.
//!
//! Some interaction details depend on the host platform rather than on the
//! widget: touch browsers (iOS Safari in particular) synthesize hover on tap,
//! keep native selection UI around after blur, and cannot render inline
//! completion highlights. Controllers never sniff the platform themselves;
//! the host injects a [`PlatformCapabilities`] value at construction.
//!
//! # Predefined Profiles
//!
//! - [`PlatformCapabilities::desktop`] - pointer + keyboard, everything supported
//! - [`PlatformCapabilities::touch`] - iOS-style touch browser
//!
//! Use [`CapabilityProfileBuilder`] for anything in between.

use std::fmt;
use std::str::FromStr;

/// Known platform profile identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlatformProfile {
    /// Desktop browser or native toolkit with a pointer.
    #[default]
    Desktop,
    /// Touch browser with native selection quirks (iOS Safari).
    Touch,
    /// Built by hand.
    Custom,
}

impl PlatformProfile {
    /// Get the profile name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Touch => "touch",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for PlatformProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" | "pointer" => Ok(Self::Desktop),
            "touch" | "ios" | "mobile" => Ok(Self::Touch),
            "custom" => Ok(Self::Custom),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}

impl fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised profile name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProfile(pub String);

impl fmt::Display for UnknownProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform profile: {:?}", self.0)
    }
}

impl std::error::Error for UnknownProfile {}

/// Platform-dependent interaction capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilities {
    profile: PlatformProfile,

    /// Hovering an option highlights it. Disabled on touch platforms where a
    /// synthetic hover swallows the following tap.
    pub supports_hover_selection: bool,

    /// The open menu survives a blur (native selection UI stays up).
    pub keeps_menu_open_on_blur: bool,

    /// On blur, keep the typed query instead of adopting the selected
    /// option's label.
    pub restores_query_on_blur: bool,

    /// Inline completion (auto-select of the first result with highlighted
    /// suffix) can be rendered.
    pub supports_inline_autoselect: bool,
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self::desktop()
    }
}

impl PlatformCapabilities {
    /// Desktop profile: every capability enabled, no blur quirks.
    #[must_use]
    pub const fn desktop() -> Self {
        Self {
            profile: PlatformProfile::Desktop,
            supports_hover_selection: true,
            keeps_menu_open_on_blur: false,
            restores_query_on_blur: false,
            supports_inline_autoselect: true,
        }
    }

    /// Touch profile modelled on iOS Safari.
    #[must_use]
    pub const fn touch() -> Self {
        Self {
            profile: PlatformProfile::Touch,
            supports_hover_selection: false,
            keeps_menu_open_on_blur: true,
            restores_query_on_blur: true,
            supports_inline_autoselect: false,
        }
    }

    /// Create capabilities from a profile identifier.
    #[must_use]
    pub const fn from_profile(profile: PlatformProfile) -> Self {
        match profile {
            PlatformProfile::Desktop => Self::desktop(),
            PlatformProfile::Touch => Self::touch(),
            PlatformProfile::Custom => CapabilityProfileBuilder::new().build(),
        }
    }

    /// Get the profile identifier for this capability set.
    #[must_use]
    pub const fn profile(&self) -> PlatformProfile {
        self.profile
    }

    /// Start a builder with every capability disabled.
    #[must_use]
    pub const fn builder() -> CapabilityProfileBuilder {
        CapabilityProfileBuilder::new()
    }
}

/// Builder for custom capability sets.
///
/// ```
/// use typeahead_core::platform::{CapabilityProfileBuilder, PlatformProfile};
///
/// let caps = CapabilityProfileBuilder::from_profile(PlatformProfile::Touch)
///     .supports_hover_selection(true)
///     .build();
///
/// assert!(caps.supports_hover_selection);
/// assert!(caps.keeps_menu_open_on_blur);
/// ```
#[derive(Debug, Clone)]
pub struct CapabilityProfileBuilder {
    caps: PlatformCapabilities,
}

impl Default for CapabilityProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityProfileBuilder {
    /// Create a new builder with all capabilities disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            caps: PlatformCapabilities {
                profile: PlatformProfile::Custom,
                supports_hover_selection: false,
                keeps_menu_open_on_blur: false,
                restores_query_on_blur: false,
                supports_inline_autoselect: false,
            },
        }
    }

    /// Start from an existing profile.
    #[must_use]
    pub const fn from_profile(profile: PlatformProfile) -> Self {
        let mut caps = PlatformCapabilities::from_profile(profile);
        caps.profile = PlatformProfile::Custom;
        Self { caps }
    }

    /// Build the final capability set.
    #[must_use]
    pub const fn build(self) -> PlatformCapabilities {
        self.caps
    }

    /// Set hover highlighting support.
    #[must_use]
    pub const fn supports_hover_selection(mut self, enabled: bool) -> Self {
        self.caps.supports_hover_selection = enabled;
        self
    }

    /// Set whether the menu stays open across blur.
    #[must_use]
    pub const fn keeps_menu_open_on_blur(mut self, enabled: bool) -> Self {
        self.caps.keeps_menu_open_on_blur = enabled;
        self
    }

    /// Set whether blur keeps the typed query.
    #[must_use]
    pub const fn restores_query_on_blur(mut self, enabled: bool) -> Self {
        self.caps.restores_query_on_blur = enabled;
        self
    }

    /// Set inline auto-select support.
    #[must_use]
    pub const fn supports_inline_autoselect(mut self, enabled: bool) -> Self {
        self.caps.supports_inline_autoselect = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_is_default() {
        let caps = PlatformCapabilities::default();
        assert_eq!(caps.profile(), PlatformProfile::Desktop);
        assert!(caps.supports_hover_selection);
        assert!(caps.supports_inline_autoselect);
        assert!(!caps.keeps_menu_open_on_blur);
    }

    #[test]
    fn touch_disables_hover_and_autoselect() {
        let caps = PlatformCapabilities::touch();
        assert!(!caps.supports_hover_selection);
        assert!(!caps.supports_inline_autoselect);
        assert!(caps.keeps_menu_open_on_blur);
        assert!(caps.restores_query_on_blur);
    }

    #[test]
    fn builder_marks_profile_custom() {
        let caps = CapabilityProfileBuilder::from_profile(PlatformProfile::Desktop)
            .supports_hover_selection(false)
            .build();
        assert_eq!(caps.profile(), PlatformProfile::Custom);
        assert!(!caps.supports_hover_selection);
        assert!(caps.supports_inline_autoselect);
    }

    #[test]
    fn profile_names_round_trip() {
        for profile in [PlatformProfile::Desktop, PlatformProfile::Touch, PlatformProfile::Custom] {
            assert_eq!(profile.to_string().parse::<PlatformProfile>(), Ok(profile));
        }
        assert_eq!("iOS".parse::<PlatformProfile>(), Ok(PlatformProfile::Touch));
        assert!("toaster".parse::<PlatformProfile>().is_err());
    }
}
