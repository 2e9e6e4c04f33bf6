//! Pagination dots: one per visible slide, mapped back to slide indices.
//!
//! Dots are rebuilt from scratch whenever pagination is (re)initialized,
//! never diffed.

use crate::accessibility::{AccessibleRole, DotAttributes};
use crate::locale::Labels;

/// Dot strip for the visible slides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    slides: Vec<usize>,
    active: Option<usize>,
}

impl Pagination {
    /// Build one dot per visible slide, in slide order.
    #[must_use]
    pub fn build(visibility: &[bool]) -> Self {
        let slides = visibility
            .iter()
            .enumerate()
            .filter_map(|(index, visible)| visible.then_some(index))
            .collect();
        Self {
            slides,
            active: None,
        }
    }

    /// Number of dots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether there are no dots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide index of each dot.
    #[must_use]
    pub fn slides(&self) -> &[usize] {
        &self.slides
    }

    /// Slide a dot navigates to.
    #[must_use]
    pub fn slide_for_dot(&self, dot: usize) -> Option<usize> {
        self.slides.get(dot).copied()
    }

    /// Dot showing `slide`, if the slide has one.
    #[must_use]
    pub fn dot_for_slide(&self, slide: usize) -> Option<usize> {
        self.slides.iter().position(|s| *s == slide)
    }

    /// Highlighted dot.
    #[must_use]
    pub const fn active_dot(&self) -> Option<usize> {
        self.active
    }

    /// Highlight the dot for `slide`. A slide without a dot (hidden since
    /// the last rebuild) clears the highlight.
    pub fn set_active_slide(&mut self, slide: usize) -> Option<usize> {
        self.active = self.dot_for_slide(slide);
        self.active
    }

    /// Attributes for every dot.
    #[must_use]
    pub fn attributes(&self, labels: &dyn Labels) -> Vec<DotAttributes> {
        self.slides
            .iter()
            .enumerate()
            .map(|(dot, slide)| DotAttributes {
                dot,
                slide_index: *slide,
                role: AccessibleRole::Button,
                label: labels.dot_label(dot + 1),
                selected: self.active == Some(dot),
            })
            .collect()
    }
}
