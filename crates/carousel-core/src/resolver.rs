//! Geometry resolver: slide index to scroll offset, and scroll offset back
//! to the active slide.
//!
//! Stateless apart from the width captured for uniform-width mode. Callers
//! clamp indices before asking; the resolver does not.

use crate::config::UniformWidth;
use crate::geometry::Rect;
use crate::viewport::Viewport;

/// Scroll offsets are compared with this slack, since hosts round
/// `scrollLeft` to device pixels.
const SUBPIXEL_TOLERANCE: f64 = 0.5;

/// How slide offsets are derived.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LayoutMode {
    /// Live layout queries; slides may differ in width and reflow.
    #[default]
    NaturalFlow,
    /// Every slide is `slide_width` wide, separated by `gap`.
    Uniform {
        /// Width captured at setup
        slide_width: f64,
        /// Inter-item gap captured at setup
        gap: f64,
    },
}

/// Converts slide indices to target scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryResolver {
    mode: LayoutMode,
}

impl GeometryResolver {
    /// Resolver using live natural-flow layout.
    #[must_use]
    pub const fn natural() -> Self {
        Self {
            mode: LayoutMode::NaturalFlow,
        }
    }

    /// Resolver using fixed-width arithmetic.
    #[must_use]
    pub const fn uniform(slide_width: f64, gap: f64) -> Self {
        Self {
            mode: LayoutMode::Uniform { slide_width, gap },
        }
    }

    /// Pick the mode for a configuration, capturing the uniform width once.
    ///
    /// The width comes from the configured active width when present,
    /// otherwise from the first slide's rendered width.
    pub fn capture<V: Viewport>(uniform: &UniformWidth, viewport: &V) -> Self {
        if !uniform.enabled {
            return Self::natural();
        }
        let slide_width = uniform
            .active_width
            .or_else(|| {
                (0..viewport.slide_count())
                    .find_map(|i| viewport.slide_bounds(i))
                    .map(|r| r.width)
            })
            .unwrap_or(0.0);
        Self::uniform(slide_width, viewport.gap())
    }

    /// Active layout mode.
    #[must_use]
    pub const fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Scroll offset that aligns the slide's left edge with the viewport's
    /// content-box left edge.
    ///
    /// Returns `None` in natural-flow mode when the slide has no layout
    /// (hidden or missing).
    pub fn target_offset<V: Viewport>(&self, viewport: &V, index: usize) -> Option<f64> {
        match self.mode {
            LayoutMode::NaturalFlow => {
                let slide = viewport.slide_bounds(index)?;
                let frame = viewport.bounds();
                let delta = slide.left() - frame.left();
                Some(viewport.scroll_offset() + delta - viewport.padding_left())
            }
            LayoutMode::Uniform { slide_width, gap } => {
                Some(index as f64 * (slide_width + gap))
            }
        }
    }
}

/// Active slide in sticky mode: the lowest visible index whose start offset
/// has not been scrolled past, else the last visible slide.
///
/// `offsets` yields `(index, offset_left)` for visible slides in index order.
pub fn sticky_active_index(
    offsets: impl IntoIterator<Item = (usize, f64)>,
    scroll_offset: f64,
) -> Option<usize> {
    let mut last = None;
    for (index, offset) in offsets {
        if offset + SUBPIXEL_TOLERANCE >= scroll_offset {
            return Some(index);
        }
        last = Some(index);
    }
    last
}

/// Active slide in free mode: the visible slide with the largest horizontal
/// overlap with the viewport. Ties go to the lower index.
///
/// `slides` yields `(index, bounds)` for visible slides in index order.
pub fn free_active_index(
    frame: &Rect,
    slides: impl IntoIterator<Item = (usize, Rect)>,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, bounds) in slides {
        let overlap = frame.horizontal_overlap(&bounds);
        match best {
            Some((_, best_overlap)) if overlap <= best_overlap => {}
            _ => best = Some((index, overlap)),
        }
    }
    best.map(|(index, _)| index)
}

/// Sticky-mode active index computed from live viewport queries.
pub fn sticky_active_from<V: Viewport>(viewport: &V) -> Option<usize> {
    let offsets = (0..viewport.slide_count())
        .filter(|&i| viewport.is_slide_visible(i))
        .filter_map(|i| viewport.slide_offset_left(i).map(|o| (i, o)));
    sticky_active_index(offsets, viewport.scroll_offset())
}

/// Free-mode active index computed from live viewport queries.
pub fn free_active_from<V: Viewport>(viewport: &V) -> Option<usize> {
    let slides = (0..viewport.slide_count())
        .filter(|&i| viewport.is_slide_visible(i))
        .filter_map(|i| viewport.slide_bounds(i).map(|r| (i, r)));
    free_active_index(&viewport.bounds(), slides)
}

/// Index of the visible slide under client x, if any.
pub fn slide_at<V: Viewport>(viewport: &V, x: f64) -> Option<usize> {
    (0..viewport.slide_count())
        .filter(|&i| viewport.is_slide_visible(i))
        .find(|&i| viewport.slide_bounds(i).is_some_and(|r| r.contains_x(x)))
}
