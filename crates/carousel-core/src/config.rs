//! Per-instance carousel configuration.
//!
//! Keys use the camelCase option names hosts already pass to the slider, so
//! the same object can be loaded from YAML, JSON or a `data-` attribute.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Recognized carousel options. Immutable once a controller is mounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Wrap navigation at the ends.
    #[serde(rename = "loop", alias = "isLoop")]
    pub looping: bool,
    /// Scroll follows the finger continuously instead of snapping.
    pub free_mode: bool,
    /// Drag distance in pixels that triggers a snap transition.
    pub swipe_threshold: f64,
    /// Duration of the eased scroll in milliseconds.
    #[serde(alias = "slideSpeed")]
    pub slide_duration_ms: f64,
    /// Recompute the active slide from scroll position.
    #[serde(alias = "autoActive")]
    pub auto_active_tracking: bool,
    /// Tapping a slide navigates to it.
    #[serde(alias = "clickToSlide")]
    pub click_to_select: bool,
    /// Uniform-width layout options.
    #[serde(alias = "changeWidth")]
    pub uniform_width_mode: UniformWidth,
    /// Language tag for labels, or `"auto"` to follow the host document.
    pub lang: String,
    /// Window after a drag ends during which taps are ignored.
    pub tap_suppress_ms: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            looping: false,
            free_mode: false,
            swipe_threshold: 50.0,
            slide_duration_ms: 300.0,
            auto_active_tracking: false,
            click_to_select: true,
            uniform_width_mode: UniformWidth::default(),
            lang: "auto".to_string(),
            tap_suppress_ms: 50.0,
        }
    }
}

/// Uniform-width mode: every slide is forced to one width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UniformWidth {
    /// Whether uniform-width mode is on.
    pub enabled: bool,
    /// Width applied to the active slide, in pixels.
    #[serde(alias = "activeSlideWidth")]
    pub active_width: Option<f64>,
    /// Width transition duration in milliseconds.
    #[serde(alias = "widthTransitionDuration")]
    pub width_transition_ms: f64,
}

impl Default for UniformWidth {
    fn default() -> Self {
        Self {
            enabled: false,
            active_width: None,
            width_transition_ms: 300.0,
        }
    }
}

impl CarouselConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric options for values the controller cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("swipeThreshold", self.swipe_threshold)?;
        non_negative("slideDurationMs", self.slide_duration_ms)?;
        non_negative("tapSuppressMs", self.tap_suppress_ms)?;
        non_negative(
            "uniformWidthMode.widthTransitionMs",
            self.uniform_width_mode.width_transition_ms,
        )?;
        if let Some(width) = self.uniform_width_mode.active_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "uniformWidthMode.activeWidth",
                    message: format!("must be a positive width, got {width}"),
                });
            }
        }
        Ok(())
    }

    /// Set looping.
    #[must_use]
    pub const fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set free mode.
    #[must_use]
    pub const fn with_free_mode(mut self, free_mode: bool) -> Self {
        self.free_mode = free_mode;
        self
    }

    /// Set the swipe threshold.
    #[must_use]
    pub const fn with_swipe_threshold(mut self, threshold: f64) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Set the eased scroll duration.
    #[must_use]
    pub const fn with_slide_duration_ms(mut self, duration_ms: f64) -> Self {
        self.slide_duration_ms = duration_ms;
        self
    }

    /// Set automatic active tracking.
    #[must_use]
    pub const fn with_auto_active_tracking(mut self, enabled: bool) -> Self {
        self.auto_active_tracking = enabled;
        self
    }

    /// Set click-to-select.
    #[must_use]
    pub const fn with_click_to_select(mut self, enabled: bool) -> Self {
        self.click_to_select = enabled;
        self
    }

    /// Set uniform-width options.
    #[must_use]
    pub fn with_uniform_width(mut self, uniform: UniformWidth) -> Self {
        self.uniform_width_mode = uniform;
        self
    }

    /// Set the label language.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the post-drag tap suppression window.
    #[must_use]
    pub const fn with_tap_suppress_ms(mut self, window_ms: f64) -> Self {
        self.tap_suppress_ms = window_ms;
        self
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            message: format!("must be a finite non-negative number, got {value}"),
        })
    }
}
