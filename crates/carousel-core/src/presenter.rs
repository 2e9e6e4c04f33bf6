//! Presenter: the output side of the carousel.
//!
//! The controller never touches a host directly. It computes attributes and
//! hands them to a [`Presenter`], which applies them to the DOM (or records
//! them, in tests).

use crate::accessibility::{ControlAttributes, DotAttributes, RegionAttributes, SlideAttributes};
use std::collections::BTreeMap;

/// Applies carousel presentation to a host.
pub trait Presenter {
    /// Whether a pagination container exists. Without one, dots are skipped.
    fn has_pagination_host(&self) -> bool {
        true
    }

    /// Whether previous/next controls exist.
    fn has_controls(&self) -> bool {
        true
    }

    /// Language of the host document, used when labels are `"auto"`.
    fn document_lang(&self) -> Option<String> {
        None
    }

    /// Apply region attributes and create the status element.
    fn init_region(&mut self, region: &RegionAttributes);

    /// Apply one slide's attributes.
    fn update_slide(&mut self, slide: &SlideAttributes);

    /// Replace all pagination dots.
    fn render_pagination(&mut self, dots: &[DotAttributes]);

    /// Highlight one dot and clear the rest.
    fn select_dot(&mut self, dot: Option<usize>);

    /// Apply previous/next control state.
    fn update_controls(&mut self, previous: &ControlAttributes, next: &ControlAttributes);

    /// Set the live-region status text.
    fn announce(&mut self, text: &str);

    /// Move keyboard focus to a slide without scrolling it into view.
    fn focus_slide(&mut self, index: usize);

    /// Remove pagination dots.
    fn clear_pagination(&mut self) {
        self.render_pagination(&[]);
    }
}

/// A presenter call, as recorded by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    /// `init_region`
    InitRegion,
    /// `update_slide` for an index
    UpdateSlide(usize),
    /// `render_pagination` with a dot count
    RenderPagination(usize),
    /// `select_dot`
    SelectDot(Option<usize>),
    /// `update_controls`
    UpdateControls,
    /// `announce` with the status text
    Announce(String),
    /// `focus_slide`
    Focus(usize),
}

/// Presenter that keeps the latest state plus a call log.
#[derive(Debug, Clone)]
pub struct RecordingPresenter {
    pagination_host: bool,
    controls: bool,
    document_lang: Option<String>,
    region: Option<RegionAttributes>,
    slides: BTreeMap<usize, SlideAttributes>,
    dots: Vec<DotAttributes>,
    active_dot: Option<usize>,
    previous: Option<ControlAttributes>,
    next: Option<ControlAttributes>,
    status: String,
    focused: Option<usize>,
    calls: Vec<PresenterCall>,
}

impl Default for RecordingPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPresenter {
    /// Presenter with a pagination host and controls.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pagination_host: true,
            controls: true,
            document_lang: None,
            region: None,
            slides: BTreeMap::new(),
            dots: Vec::new(),
            active_dot: None,
            previous: None,
            next: None,
            status: String::new(),
            focused: None,
            calls: Vec::new(),
        }
    }

    /// Drop the pagination host.
    #[must_use]
    pub const fn without_pagination_host(mut self) -> Self {
        self.pagination_host = false;
        self
    }

    /// Drop the previous/next controls.
    #[must_use]
    pub const fn without_controls(mut self) -> Self {
        self.controls = false;
        self
    }

    /// Report a document language.
    #[must_use]
    pub fn with_document_lang(mut self, lang: impl Into<String>) -> Self {
        self.document_lang = Some(lang.into());
        self
    }

    /// Region attributes, once initialized.
    #[must_use]
    pub const fn region(&self) -> Option<&RegionAttributes> {
        self.region.as_ref()
    }

    /// Latest attributes for a slide.
    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&SlideAttributes> {
        self.slides.get(&index)
    }

    /// Slide indices currently marked active.
    #[must_use]
    pub fn active_slides(&self) -> Vec<usize> {
        self.slides
            .values()
            .filter(|s| s.has_active_class())
            .map(|s| s.index)
            .collect()
    }

    /// Rendered dots, with the latest selection applied.
    #[must_use]
    pub fn dots(&self) -> Vec<DotAttributes> {
        self.dots
            .iter()
            .cloned()
            .map(|mut d| {
                d.selected = self.active_dot == Some(d.dot);
                d
            })
            .collect()
    }

    /// Highlighted dot.
    #[must_use]
    pub const fn active_dot(&self) -> Option<usize> {
        self.active_dot
    }

    /// Latest previous control state.
    #[must_use]
    pub const fn previous_control(&self) -> Option<&ControlAttributes> {
        self.previous.as_ref()
    }

    /// Latest next control state.
    #[must_use]
    pub const fn next_control(&self) -> Option<&ControlAttributes> {
        self.next.as_ref()
    }

    /// Live-region status text.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Focused slide.
    #[must_use]
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Every call so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    /// Forget the call log, keeping state.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn has_pagination_host(&self) -> bool {
        self.pagination_host
    }

    fn has_controls(&self) -> bool {
        self.controls
    }

    fn document_lang(&self) -> Option<String> {
        self.document_lang.clone()
    }

    fn init_region(&mut self, region: &RegionAttributes) {
        self.region = Some(region.clone());
        self.calls.push(PresenterCall::InitRegion);
    }

    fn update_slide(&mut self, slide: &SlideAttributes) {
        self.slides.insert(slide.index, slide.clone());
        self.calls.push(PresenterCall::UpdateSlide(slide.index));
    }

    fn render_pagination(&mut self, dots: &[DotAttributes]) {
        self.dots = dots.to_vec();
        self.active_dot = dots.iter().find(|d| d.selected).map(|d| d.dot);
        self.calls.push(PresenterCall::RenderPagination(dots.len()));
    }

    fn select_dot(&mut self, dot: Option<usize>) {
        self.active_dot = dot;
        self.calls.push(PresenterCall::SelectDot(dot));
    }

    fn update_controls(&mut self, previous: &ControlAttributes, next: &ControlAttributes) {
        self.previous = Some(previous.clone());
        self.next = Some(next.clone());
        self.calls.push(PresenterCall::UpdateControls);
    }

    fn announce(&mut self, text: &str) {
        self.status = text.to_string();
        self.calls.push(PresenterCall::Announce(text.to_string()));
    }

    fn focus_slide(&mut self, index: usize) {
        self.focused = Some(index);
        self.calls.push(PresenterCall::Focus(index));
    }
}
