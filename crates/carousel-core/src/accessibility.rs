//! Accessibility attributes for the carousel region, its slides, the
//! pagination dots and the previous/next controls.
//!
//! The controller computes these and hands them to a
//! [`Presenter`](crate::presenter::Presenter); nothing here touches a host.

use crate::locale::Labels;
use serde::{Deserialize, Serialize};

/// Class toggled on the active slide.
pub const ACTIVE_SLIDE_CLASS: &str = "slide--active";

/// Class toggled on the active pagination dot.
pub const ACTIVE_DOT_CLASS: &str = "dot--active";

/// Accessible role of a carousel part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// The carousel viewport
    Region,
    /// One slide
    Group,
    /// A control or pagination dot
    Button,
}

impl AccessibleRole {
    /// ARIA role name.
    #[must_use]
    pub const fn as_aria(self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Group => "group",
            Self::Button => "button",
        }
    }
}

/// Politeness of a live region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LiveRegion {
    /// Not announced
    Off,
    /// Announced when the reader is idle
    #[default]
    Polite,
    /// Announced immediately
    Assertive,
}

impl LiveRegion {
    /// `aria-live` value.
    #[must_use]
    pub const fn as_aria(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Attributes of the carousel region and its status element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionAttributes {
    /// Always [`AccessibleRole::Region`]
    pub role: AccessibleRole,
    /// Accessible name
    pub label: String,
    /// The region itself takes keyboard focus.
    pub tab_index: i32,
    /// Politeness of the status element
    pub live: LiveRegion,
    /// Language the labels were rendered in
    pub lang: String,
}

impl RegionAttributes {
    /// Region attributes for the given labels.
    #[must_use]
    pub fn new(labels: &dyn Labels, lang: &str) -> Self {
        Self {
            role: AccessibleRole::Region,
            label: labels.region_label(),
            tab_index: 0,
            live: LiveRegion::Polite,
            lang: lang.to_string(),
        }
    }
}

/// Inline width applied to a slide in uniform-width mode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum WidthStyle {
    /// The carousel does not manage this slide's width.
    #[default]
    Unmanaged,
    /// Fixed width, animated over `transition_ms`.
    Fixed {
        /// Width in pixels
        width: f64,
        /// Transition duration
        transition_ms: f64,
    },
    /// Clear any inline width, animated over `transition_ms`.
    Reset {
        /// Transition duration
        transition_ms: f64,
    },
}

/// Presentation of one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideAttributes {
    /// Slide index
    pub index: usize,
    /// Always [`AccessibleRole::Group`]
    pub role: AccessibleRole,
    /// Accessible name, e.g. "Slide 2 of 5"
    pub label: String,
    /// Whether this is the current slide (`aria-current`, active class).
    pub current: bool,
    /// `0` for the active slide, `-1` otherwise.
    pub tab_index: i32,
    /// Inline width
    pub width: WidthStyle,
}

impl SlideAttributes {
    /// Whether the active class should be present.
    #[must_use]
    pub const fn has_active_class(&self) -> bool {
        self.current
    }
}

/// Presentation of one pagination dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotAttributes {
    /// Dot position
    pub dot: usize,
    /// Slide the dot navigates to
    pub slide_index: usize,
    /// Always [`AccessibleRole::Button`]
    pub role: AccessibleRole,
    /// Accessible name, e.g. "Go to slide 3"
    pub label: String,
    /// Whether the dot's slide is current.
    pub selected: bool,
}

/// Presentation of a previous or next control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlAttributes {
    /// Always [`AccessibleRole::Button`]
    pub role: AccessibleRole,
    /// Accessible name
    pub label: String,
    /// No further slide in this direction.
    pub disabled: bool,
}

impl ControlAttributes {
    /// Previous-control attributes.
    #[must_use]
    pub fn previous(labels: &dyn Labels, disabled: bool) -> Self {
        Self {
            role: AccessibleRole::Button,
            label: labels.previous_label(),
            disabled,
        }
    }

    /// Next-control attributes.
    #[must_use]
    pub fn next(labels: &dyn Labels, disabled: bool) -> Self {
        Self {
            role: AccessibleRole::Button,
            label: labels.next_label(),
            disabled,
        }
    }
}

/// 1-based position of `index` among the visible slides, and the visible
/// count. Hidden slides report their would-be position.
#[must_use]
pub fn visible_position(visibility: &[bool], index: usize) -> (usize, usize) {
    let total = visibility.iter().filter(|v| **v).count();
    let before = visibility.iter().take(index).filter(|v| **v).count();
    (before + 1, total.max(1))
}
