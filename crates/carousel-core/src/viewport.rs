//! The scrollable viewport and its slides, as seen by the controller.
//!
//! The controller never caches layout: every query goes back to the
//! [`Viewport`] so that reflow and externally toggled visibility are
//! observed on the next interaction.

use crate::geometry::Rect;
use std::fmt;

/// Geometry and visibility queries against the slide container.
///
/// Implemented by the DOM adapter in the browser and by [`MemoryViewport`]
/// for tests.
pub trait Viewport {
    /// Opaque slide handle passed to change listeners.
    type Slide: Clone + fmt::Debug;

    /// Current horizontal scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Write the horizontal scroll offset.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Bounding rectangle of the viewport in client coordinates.
    fn bounds(&self) -> Rect;

    /// Computed left padding of the viewport.
    fn padding_left(&self) -> f64;

    /// Computed gap between adjacent slides.
    fn gap(&self) -> f64;

    /// Number of slides, visible or not. Fixed for the controller's lifetime.
    fn slide_count(&self) -> usize;

    /// Handle for the slide at `index`.
    fn slide(&self, index: usize) -> Option<Self::Slide>;

    /// Bounding rectangle of a slide in client coordinates.
    fn slide_bounds(&self, index: usize) -> Option<Rect>;

    /// Natural-flow start offset of a slide (its `offsetLeft`).
    fn slide_offset_left(&self, index: usize) -> Option<f64>;

    /// Whether the slide is currently rendered.
    fn is_slide_visible(&self, index: usize) -> bool;

    /// Live visibility of every slide, in index order.
    fn visibility(&self) -> Vec<bool> {
        (0..self.slide_count())
            .map(|i| self.is_slide_visible(i))
            .collect()
    }
}

/// A slide in a [`MemoryViewport`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySlide {
    /// Stable identifier, reported to change listeners.
    pub id: u32,
    /// Rendered width.
    pub width: f64,
    /// Whether the slide takes part in layout.
    pub visible: bool,
}

/// In-memory viewport with natural-flow layout, for tests and headless hosts.
///
/// Visible slides are laid out left to right after the left padding,
/// separated by `gap`. Hidden slides take no space, like `display: none`.
#[derive(Debug, Clone)]
pub struct MemoryViewport {
    origin_x: f64,
    width: f64,
    padding_left: f64,
    gap: f64,
    scroll_offset: f64,
    slides: Vec<MemorySlide>,
    writes: usize,
}

impl MemoryViewport {
    /// Create an empty viewport of the given width at client x = 0.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            origin_x: 0.0,
            width,
            padding_left: 0.0,
            gap: 0.0,
            scroll_offset: 0.0,
            slides: Vec::new(),
            writes: 0,
        }
    }

    /// Create a viewport holding `count` visible slides of equal width.
    #[must_use]
    pub fn uniform(width: f64, count: usize, slide_width: f64) -> Self {
        let mut viewport = Self::new(width);
        for _ in 0..count {
            viewport.push_slide(slide_width);
        }
        viewport
    }

    /// Set the client x of the viewport's left border edge.
    #[must_use]
    pub const fn with_origin(mut self, origin_x: f64) -> Self {
        self.origin_x = origin_x;
        self
    }

    /// Set the left padding.
    #[must_use]
    pub const fn with_padding_left(mut self, padding: f64) -> Self {
        self.padding_left = padding;
        self
    }

    /// Set the inter-slide gap.
    #[must_use]
    pub const fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Append a visible slide.
    pub fn push_slide(&mut self, width: f64) -> usize {
        let index = self.slides.len();
        self.slides.push(MemorySlide {
            id: index as u32,
            width,
            visible: true,
        });
        index
    }

    /// Show or hide a slide.
    pub fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.visible = visible;
        }
    }

    /// Change a slide's rendered width.
    pub fn set_slide_width(&mut self, index: usize, width: f64) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.width = width;
        }
    }

    /// Number of scroll offset writes so far.
    #[must_use]
    pub const fn scroll_writes(&self) -> usize {
        self.writes
    }

    /// Content-space left edge of a visible slide (relative to the padding box).
    fn content_left(&self, index: usize) -> Option<f64> {
        let slide = self.slides.get(index)?;
        if !slide.visible {
            return None;
        }
        let preceding: f64 = self.slides[..index]
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.width + self.gap)
            .sum();
        Some(self.padding_left + preceding)
    }
}

impl Viewport for MemoryViewport {
    type Slide = MemorySlide;

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
        self.writes += 1;
    }

    fn bounds(&self) -> Rect {
        Rect::span(self.origin_x, self.width)
    }

    fn padding_left(&self) -> f64 {
        self.padding_left
    }

    fn gap(&self) -> f64 {
        self.gap
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn slide(&self, index: usize) -> Option<MemorySlide> {
        self.slides.get(index).cloned()
    }

    fn slide_bounds(&self, index: usize) -> Option<Rect> {
        let left = self.content_left(index)?;
        let width = self.slides[index].width;
        Some(Rect::span(self.origin_x + left - self.scroll_offset, width))
    }

    fn slide_offset_left(&self, index: usize) -> Option<f64> {
        self.content_left(index)
    }

    fn is_slide_visible(&self, index: usize) -> bool {
        self.slides.get(index).is_some_and(|s| s.visible)
    }
}
