//! DOM vocabulary: selectors, attribute names and CSS values.
//!
//! Converts the engine's presentation structs into attribute lists so the
//! DOM presenter stays a thin loop of `setAttribute` calls.

use carousel_core::{
    CarouselConfig, ConfigError, ControlAttributes, DotAttributes, RegionAttributes,
    SlideAttributes, WidthStyle,
};

/// Scrollable slide list inside the slider root.
pub const LIST_SELECTOR: &str = ".slider__list";
/// Previous control.
pub const PREVIOUS_SELECTOR: &str = ".slider--prev";
/// Next control.
pub const NEXT_SELECTOR: &str = ".slider--next";
/// Container for pagination dots.
pub const PAGINATION_SELECTOR: &str = ".slider__pagination";
/// Id of the live status element.
pub const STATUS_ID: &str = "sr-slide-status";
/// Class on every pagination dot.
pub const DOT_CLASS: &str = "slider__dot";
/// Attribute holding a dot's position.
pub const DOT_INDEX_ATTR: &str = "data-dot";
/// Attribute on the slider root holding JSON options.
pub const OPTIONS_ATTR: &str = "data-slider-options";

/// Attribute name/value pairs.
pub type Attributes = Vec<(&'static str, String)>;

const fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Attributes for the slide list.
#[must_use]
pub fn region_attributes(region: &RegionAttributes) -> Attributes {
    vec![
        ("role", region.role.as_aria().to_string()),
        ("aria-label", region.label.clone()),
        ("tabindex", region.tab_index.to_string()),
    ]
}

/// Attributes for the live status element.
#[must_use]
pub fn status_attributes(region: &RegionAttributes) -> Attributes {
    vec![
        ("id", STATUS_ID.to_string()),
        ("aria-live", region.live.as_aria().to_string()),
        ("visually-hidden", String::new()),
        ("lang", region.lang.clone()),
    ]
}

/// Attributes for one slide.
#[must_use]
pub fn slide_attributes(slide: &SlideAttributes) -> Attributes {
    vec![
        ("role", slide.role.as_aria().to_string()),
        ("aria-label", slide.label.clone()),
        ("aria-current", bool_str(slide.current).to_string()),
        ("tabindex", slide.tab_index.to_string()),
    ]
}

/// Attributes for one pagination dot.
#[must_use]
pub fn dot_attributes(dot: &DotAttributes) -> Attributes {
    vec![
        ("type", "button".to_string()),
        ("role", dot.role.as_aria().to_string()),
        ("aria-label", dot.label.clone()),
        ("aria-selected", bool_str(dot.selected).to_string()),
        (DOT_INDEX_ATTR, dot.dot.to_string()),
    ]
}

/// Attributes for a previous/next control.
#[must_use]
pub fn control_attributes(control: &ControlAttributes) -> Attributes {
    vec![
        ("aria-label", control.label.clone()),
        ("aria-disabled", bool_str(control.disabled).to_string()),
    ]
}

/// Inline `transition` and `width` for a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthCss {
    /// `transition` value
    pub transition: String,
    /// `width` value; empty clears the inline width
    pub width: String,
}

/// CSS for a width style, or `None` when the width is not managed.
#[must_use]
pub fn width_css(style: &WidthStyle) -> Option<WidthCss> {
    match *style {
        WidthStyle::Unmanaged => None,
        WidthStyle::Fixed {
            width,
            transition_ms,
        } => Some(WidthCss {
            transition: format!("width {transition_ms}ms"),
            width: format!("{width}px"),
        }),
        WidthStyle::Reset { transition_ms } => Some(WidthCss {
            transition: format!("width {transition_ms}ms"),
            width: String::new(),
        }),
    }
}

/// Parse a computed CSS length such as `"12px"` or `"12.5px"`.
/// Keywords like `normal` read as zero.
#[must_use]
pub fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse slider options. Absent or blank options give the defaults.
pub fn parse_options(json: Option<&str>) -> Result<CarouselConfig, ConfigError> {
    match json.map(str::trim) {
        None | Some("") => Ok(CarouselConfig::default()),
        Some(source) => CarouselConfig::from_json(source),
    }
}
