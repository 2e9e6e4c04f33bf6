//! Carousel controller: runs navigation transitions against the viewport,
//! the scroll animator and the presenter.
//!
//! The controller is a single-threaded state machine. Hosts deliver input
//! through [`Carousel::handle`] (or the individual `on_*` entry points) and
//! deliver animation frames back through [`Carousel::on_frame`].

use crate::accessibility::{
    visible_position, AccessibleRole, ControlAttributes, RegionAttributes, SlideAttributes,
    WidthStyle,
};
use crate::animation::{AnimationState, FrameOutcome, ScrollAnimator};
use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::event::{Input, Key};
use crate::gesture::Gesture;
use crate::locale::{Labels, Locale};
use crate::navigation::{Effect, NavContext, NavPolicy, NavigationState};
use crate::pagination::Pagination;
use crate::presenter::Presenter;
use crate::resolver::{free_active_from, slide_at, sticky_active_from, GeometryResolver};
use crate::scheduler::{FrameToken, Scheduler};
use crate::viewport::Viewport;
use tracing::{debug, trace};

/// Payload delivered to change listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideChanged<T> {
    /// New active index
    pub index: usize,
    /// Host handle of the new active slide
    pub slide: T,
}

type ChangeListener<T> = Box<dyn FnMut(&SlideChanged<T>)>;

/// A mounted carousel.
pub struct Carousel<V: Viewport, S: Scheduler, P: Presenter> {
    viewport: V,
    animator: ScrollAnimator<S>,
    presenter: P,
    config: CarouselConfig,
    policy: NavPolicy,
    resolver: GeometryResolver,
    locale: Locale,
    labels: Box<dyn Labels>,
    state: NavigationState,
    pagination: Option<Pagination>,
    listeners: Vec<ChangeListener<V::Slide>>,
    attached: bool,
}

impl<V: Viewport, S: Scheduler, P: Presenter> std::fmt::Debug for Carousel<V, S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("current_index", &self.state.current_index())
            .field("animation", &self.animator.state())
            .field("locale", &self.locale)
            .field("listeners", &self.listeners.len())
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl<V: Viewport, S: Scheduler, P: Presenter> Carousel<V, S, P> {
    /// Mount a carousel on a resolved viewport.
    ///
    /// # Errors
    ///
    /// [`CarouselError::ViewportUnresolved`] when the host could not find
    /// the viewport element, or [`CarouselError::Config`] when the
    /// configuration fails validation.
    pub fn mount(
        viewport: Option<V>,
        scheduler: S,
        presenter: P,
        config: CarouselConfig,
    ) -> Result<Self, CarouselError> {
        let viewport = viewport.ok_or(CarouselError::ViewportUnresolved)?;
        config.validate()?;

        let locale = Locale::resolve(&config.lang, presenter.document_lang().as_deref());
        let resolver = GeometryResolver::capture(&config.uniform_width_mode, &viewport);
        let state = NavigationState::new(&viewport.visibility());

        let mut carousel = Self {
            policy: NavPolicy::from(&config),
            viewport,
            animator: ScrollAnimator::new(scheduler),
            presenter,
            config,
            resolver,
            locale,
            labels: Box::new(locale),
            state,
            pagination: None,
            listeners: Vec::new(),
            attached: true,
        };
        carousel.render_all();
        debug!(
            slides = carousel.viewport.slide_count(),
            mode = ?carousel.resolver.mode(),
            locale = carousel.locale.tag(),
            "carousel mounted"
        );
        Ok(carousel)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current slide index.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.state.current_index()
    }

    /// Current index, or the first visible slide if it has been hidden.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.state.resolved_index(&self.viewport.visibility())
    }

    /// Whether a drag is in progress or just ended.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging(self.animator.scheduler().now_ms())
    }

    /// Scroll animation state.
    #[must_use]
    pub const fn animation_state(&self) -> AnimationState {
        self.animator.state()
    }

    /// Configuration the carousel was mounted with.
    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Resolved label language.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Geometry resolver in use.
    #[must_use]
    pub const fn resolver(&self) -> &GeometryResolver {
        &self.resolver
    }

    /// Pagination, when a pagination host exists.
    #[must_use]
    pub const fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Whether [`destroy`](Self::destroy) has not been called.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// The viewport.
    #[must_use]
    pub const fn viewport(&self) -> &V {
        &self.viewport
    }

    /// The viewport, mutably. Layout changes take effect on the next query.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// The presenter.
    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The frame scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &S {
        self.animator.scheduler()
    }

    /// The frame scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        self.animator.scheduler_mut()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Register a listener called whenever the active slide changes.
    pub fn on_change(&mut self, listener: impl FnMut(&SlideChanged<V::Slide>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the label source and re-render every label.
    pub fn set_labels(&mut self, labels: Box<dyn Labels>) {
        self.labels = labels;
        if self.attached {
            self.render_all();
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Animate to slide `index` and make it active.
    pub fn move_to_slide(&mut self, index: usize) {
        self.transition(|state, ctx| state.move_to(index, ctx));
    }

    /// Go to the next slide.
    pub fn next(&mut self) {
        self.transition(NavigationState::next);
    }

    /// Go to the previous slide.
    pub fn previous(&mut self) {
        self.transition(NavigationState::previous);
    }

    /// Keyboard navigation.
    pub fn on_key(&mut self, key: Key) {
        self.transition(|state, ctx| state.key(key, ctx));
    }

    /// Previous control activated.
    pub fn on_previous_control(&mut self) {
        if self.presenter.has_controls() {
            self.previous();
        }
    }

    /// Next control activated.
    pub fn on_next_control(&mut self) {
        if self.presenter.has_controls() {
            self.next();
        }
    }

    /// Pagination dot activated.
    pub fn on_dot(&mut self, dot: usize) {
        let Some(slide) = self.pagination.as_ref().and_then(|p| p.slide_for_dot(dot)) else {
            trace!(dot, "unknown pagination dot");
            return;
        };
        self.move_to_slide(slide);
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Pan began at client `x`.
    pub fn on_pan_start(&mut self, x: f64) {
        let scroll = self.viewport.scroll_offset();
        self.transition(|state, _| state.pan_start(x, scroll));
    }

    /// Pan continued.
    pub fn on_pan_move(&mut self, delta_x: f64, center_x: f64) {
        self.transition(|state, ctx| state.pan_move(delta_x, center_x, ctx));
    }

    /// Pan ended.
    pub fn on_pan_end(&mut self, delta_x: f64) {
        self.transition(|state, ctx| state.pan_end(delta_x, ctx));
    }

    /// A slide was tapped.
    pub fn on_tap(&mut self, index: usize) {
        self.transition(|state, ctx| state.tap(index, ctx));
    }

    /// A tap landed at client `x`; hit-test it against the visible slides.
    pub fn on_tap_at(&mut self, x: f64) {
        if let Some(index) = slide_at(&self.viewport, x) {
            self.on_tap(index);
        }
    }

    /// Dispatch a recognized gesture.
    pub fn handle_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::PanStart { x } => self.on_pan_start(x),
            Gesture::PanMove { delta_x, center_x } => self.on_pan_move(delta_x, center_x),
            Gesture::PanEnd { delta_x } => self.on_pan_end(delta_x),
            Gesture::Tap { x, .. } => self.on_tap_at(x),
        }
    }

    // =========================================================================
    // Scroll and frames
    // =========================================================================

    /// Viewport scroll offset changed.
    ///
    /// Skipped while an eased scroll runs; the settle frame recomputes.
    pub fn on_scroll(&mut self) {
        if !self.attached || !self.policy.auto_active_tracking {
            return;
        }
        if self.animator.state() == AnimationState::Easing {
            trace!("scroll during easing, recompute deferred");
            return;
        }
        self.recompute_active_from_scroll();
    }

    /// Deliver an animation frame.
    pub fn on_frame(&mut self, token: FrameToken) -> FrameOutcome {
        if !self.attached {
            return FrameOutcome::Ignored;
        }
        let outcome = self.animator.on_frame(token, &mut self.viewport);
        if outcome == FrameOutcome::Settled {
            trace!(scroll = self.viewport.scroll_offset(), "animation settled");
            self.recompute_active_from_scroll();
        }
        outcome
    }

    /// Derive the active slide from the scroll offset without scrolling.
    /// Does nothing unless active tracking is enabled.
    pub fn recompute_active_from_scroll(&mut self) {
        if !self.attached || !self.policy.auto_active_tracking {
            return;
        }
        let index = if self.policy.free_mode {
            free_active_from(&self.viewport)
        } else {
            sticky_active_from(&self.viewport)
        };
        if let Some(index) = index {
            self.transition(|state, ctx| state.sync_active(index, ctx));
        }
    }

    /// Dispatch any input.
    pub fn handle(&mut self, input: Input) {
        match input {
            Input::Gesture(gesture) => self.handle_gesture(gesture),
            Input::Key(key) => self.on_key(key),
            Input::Previous => self.on_previous_control(),
            Input::Next => self.on_next_control(),
            Input::Dot(dot) => self.on_dot(dot),
            Input::Scroll => self.on_scroll(),
            Input::Frame(token) => {
                self.on_frame(token);
            }
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Rebuild pagination dots from the current visible slides.
    pub fn rebuild_pagination(&mut self) {
        if !self.presenter.has_pagination_host() {
            self.pagination = None;
            return;
        }
        let visibility = self.viewport.visibility();
        let mut pagination = Pagination::build(&visibility);
        if let Some(active) = self.state.resolved_index(&visibility) {
            pagination.set_active_slide(active);
        }
        self.presenter
            .render_pagination(&pagination.attributes(self.labels.as_ref()));
        debug!(dots = pagination.len(), "pagination rebuilt");
        self.pagination = Some(pagination);
    }

    /// Remove pagination dots.
    pub fn detach_pagination(&mut self) {
        if self.pagination.take().is_some() {
            self.presenter.clear_pagination();
        }
    }

    /// Cancel animations, drop listeners and ignore all further input.
    pub fn destroy(&mut self) {
        if !self.attached {
            return;
        }
        self.animator.cancel();
        self.listeners.clear();
        self.attached = false;
        debug!("carousel destroyed");
    }

    // =========================================================================
    // Effects
    // =========================================================================

    fn transition(
        &mut self,
        step: impl FnOnce(&mut NavigationState, &NavContext<'_>) -> Vec<Effect>,
    ) {
        if !self.attached {
            return;
        }
        let visibility = self.viewport.visibility();
        let ctx = NavContext::new(self.policy, &visibility, self.animator.scheduler().now_ms());
        let effects = step(&mut self.state, &ctx);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            trace!(?effect, "apply");
            match effect {
                Effect::CancelAnimation => self.animator.cancel(),
                Effect::MarkActive(index) => self.present_slides(index),
                Effect::AnimateTo(index) => {
                    if let Some(target) = self.resolver.target_offset(&self.viewport, index) {
                        self.animator
                            .animate_to(&self.viewport, target, self.config.slide_duration_ms);
                    }
                }
                Effect::SetScrollOffset(offset) => self.viewport.set_scroll_offset(offset),
                Effect::StartMomentum(velocity) => {
                    self.animator.start_momentum(velocity);
                }
                Effect::SyncIndicators(index) => self.sync_indicators(index),
                Effect::Announce(index) => self.announce(index),
                Effect::RecomputeActive => self.recompute_active_from_scroll(),
            }
        }
    }

    fn render_all(&mut self) {
        let region = RegionAttributes::new(self.labels.as_ref(), self.locale.tag());
        self.presenter.init_region(&region);
        let active = self.state.current_index();
        self.present_slides(active);
        self.rebuild_pagination();
        self.update_controls(active);
    }

    fn present_slides(&mut self, active: usize) {
        let visibility = self.viewport.visibility();
        for index in 0..visibility.len() {
            let (position, total) = visible_position(&visibility, index);
            let current = index == active;
            let slide = SlideAttributes {
                index,
                role: AccessibleRole::Group,
                label: self.labels.slide_label(position, total),
                current,
                tab_index: if current { 0 } else { -1 },
                width: self.width_style(current),
            };
            self.presenter.update_slide(&slide);
        }
    }

    fn width_style(&self, current: bool) -> WidthStyle {
        let uniform = &self.config.uniform_width_mode;
        match uniform.active_width {
            Some(width) if uniform.enabled && current => WidthStyle::Fixed {
                width,
                transition_ms: uniform.width_transition_ms,
            },
            Some(_) if uniform.enabled => WidthStyle::Reset {
                transition_ms: uniform.width_transition_ms,
            },
            _ => WidthStyle::Unmanaged,
        }
    }

    fn sync_indicators(&mut self, index: usize) {
        if let Some(pagination) = self.pagination.as_mut() {
            let dot = pagination.set_active_slide(index);
            self.presenter.select_dot(dot);
        }
        self.update_controls(index);
    }

    fn update_controls(&mut self, index: usize) {
        if !self.presenter.has_controls() {
            return;
        }
        let visibility = self.viewport.visibility();
        let looping = self.policy.looping;
        let first = visibility.iter().position(|v| *v);
        let last = visibility.iter().rposition(|v| *v);
        let at_start = !looping && first.map_or(true, |first| index <= first);
        let at_end = !looping && last.map_or(true, |last| index >= last);
        let previous = ControlAttributes::previous(self.labels.as_ref(), at_start);
        let next = ControlAttributes::next(self.labels.as_ref(), at_end);
        self.presenter.update_controls(&previous, &next);
    }

    fn announce(&mut self, index: usize) {
        let visibility = self.viewport.visibility();
        let (position, total) = visible_position(&visibility, index);
        self.presenter
            .announce(&self.labels.slide_label(position, total));
        self.presenter.focus_slide(index);
        if let Some(slide) = self.viewport.slide(index) {
            let event = SlideChanged { index, slide };
            for listener in &mut self.listeners {
                listener(&event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UniformWidth;
    use crate::presenter::{PresenterCall, RecordingPresenter};
    use crate::scheduler::ManualScheduler;
    use crate::viewport::{MemorySlide, MemoryViewport};
    use std::cell::RefCell;
    use std::rc::Rc;

    type TestCarousel = Carousel<MemoryViewport, ManualScheduler, RecordingPresenter>;

    fn mount(viewport: MemoryViewport, config: CarouselConfig) -> TestCarousel {
        Carousel::mount(
            Some(viewport),
            ManualScheduler::new(),
            RecordingPresenter::new(),
            config,
        )
        .unwrap()
    }

    /// Five 100px slides in a 300px viewport.
    fn five() -> MemoryViewport {
        MemoryViewport::uniform(300.0, 5, 100.0)
    }

    /// Deliver 16ms frames until nothing is pending.
    fn settle(carousel: &mut TestCarousel) -> usize {
        let mut frames = 0;
        loop {
            let tokens = carousel.scheduler_mut().take_frames();
            if tokens.is_empty() {
                return frames;
            }
            carousel.scheduler_mut().advance(16.0);
            for token in tokens {
                carousel.on_frame(token);
                frames += 1;
            }
        }
    }

    #[test]
    fn test_mount_requires_viewport() {
        let result: Result<TestCarousel, _> = Carousel::mount(
            None,
            ManualScheduler::new(),
            RecordingPresenter::new(),
            CarouselConfig::default(),
        );
        assert!(matches!(result, Err(CarouselError::ViewportUnresolved)));
    }

    #[test]
    fn test_mount_rejects_invalid_config() {
        let result: Result<TestCarousel, _> = Carousel::mount(
            Some(five()),
            ManualScheduler::new(),
            RecordingPresenter::new(),
            CarouselConfig::default().with_swipe_threshold(-1.0),
        );
        assert!(matches!(result, Err(CarouselError::Config(_))));
    }

    #[test]
    fn test_mount_presents_initial_state() {
        let c = mount(five(), CarouselConfig::default());
        let p = c.presenter();
        let region = p.region().unwrap();
        assert_eq!(region.label, "Image carousel");
        assert_eq!(region.tab_index, 0);
        assert_eq!(p.active_slides(), vec![0]);
        assert_eq!(p.slide(0).unwrap().tab_index, 0);
        assert_eq!(p.slide(1).unwrap().tab_index, -1);
        assert_eq!(p.slide(1).unwrap().label, "Slide 2 of 5");
        assert_eq!(p.dots().len(), 5);
        assert_eq!(p.active_dot(), Some(0));
        assert!(p.previous_control().unwrap().disabled);
        assert!(!p.next_control().unwrap().disabled);
        assert_eq!(c.viewport().scroll_writes(), 0);
        assert!(p.status().is_empty());
    }

    #[test]
    fn test_mount_starts_at_first_visible() {
        let mut viewport = five();
        viewport.set_visible(0, false);
        let c = mount(viewport, CarouselConfig::default());
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.presenter().dots().len(), 4);
    }

    #[test]
    fn test_mount_uses_document_language() {
        let c: TestCarousel = Carousel::mount(
            Some(five()),
            ManualScheduler::new(),
            RecordingPresenter::new().with_document_lang("de-DE"),
            CarouselConfig::default(),
        )
        .unwrap();
        assert_eq!(c.locale(), Locale::De);
        assert_eq!(c.presenter().region().unwrap().label, "Bildkarussell");
        assert_eq!(c.presenter().slide(0).unwrap().label, "Folie 1 von 5");
    }

    #[test]
    fn test_move_to_slide_presents_then_animates() {
        let mut c = mount(five(), CarouselConfig::default());
        c.presenter_mut().clear_calls();
        c.move_to_slide(2);

        let calls = c.presenter().calls();
        let last_slide = calls
            .iter()
            .rposition(|call| matches!(call, PresenterCall::UpdateSlide(_)))
            .unwrap();
        let select = calls
            .iter()
            .position(|call| *call == PresenterCall::SelectDot(Some(2)))
            .unwrap();
        let announce = calls
            .iter()
            .position(|call| *call == PresenterCall::Announce("Slide 3 of 5".to_string()))
            .unwrap();
        let focus = calls
            .iter()
            .position(|call| *call == PresenterCall::Focus(2))
            .unwrap();
        assert!(last_slide < select);
        assert!(select < announce);
        assert!(announce < focus);

        assert_eq!(c.current_index(), 2);
        assert_eq!(c.presenter().active_slides(), vec![2]);
        assert_eq!(c.animation_state(), AnimationState::Easing);
        assert_eq!(c.viewport().scroll_offset(), 0.0);

        let frames = settle(&mut c);
        assert_eq!(frames, 19);
        assert!((c.viewport().scroll_offset() - 200.0).abs() < 1e-9);
        assert_eq!(c.animation_state(), AnimationState::Idle);
    }

    #[test]
    fn test_move_to_slide_clamps_to_last() {
        let mut c = mount(five(), CarouselConfig::default());
        c.move_to_slide(42);
        assert_eq!(c.current_index(), 4);
        assert!(c.presenter().next_control().unwrap().disabled);
    }

    #[test]
    fn test_move_to_hidden_slide_falls_back() {
        let mut c = mount(five(), CarouselConfig::default());
        c.viewport_mut().set_visible(3, false);
        c.move_to_slide(3);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_move_with_nothing_visible_is_noop() {
        let mut viewport = MemoryViewport::uniform(300.0, 2, 100.0);
        viewport.set_visible(0, false);
        viewport.set_visible(1, false);
        let mut c = mount(viewport, CarouselConfig::default());
        c.presenter_mut().clear_calls();
        c.move_to_slide(1);
        c.next();
        assert!(c.presenter().calls().is_empty());
        assert_eq!(c.animation_state(), AnimationState::Idle);
    }

    #[test]
    fn test_interrupting_animation_restarts_from_current_offset() {
        let mut c = mount(five(), CarouselConfig::default());
        c.move_to_slide(4);
        for _ in 0..5 {
            let tokens = c.scheduler_mut().take_frames();
            c.scheduler_mut().advance(16.0);
            for t in tokens {
                c.on_frame(t);
            }
        }
        let mid = c.viewport().scroll_offset();
        assert!(mid > 0.0 && mid < 400.0);
        c.move_to_slide(1);
        settle(&mut c);
        assert!((c.viewport().scroll_offset() - 100.0).abs() < 1e-9);
        assert_eq!(c.scheduler().cancelled(), 1);
    }

    #[test]
    fn test_next_previous_without_loop() {
        let mut c = mount(five(), CarouselConfig::default());
        c.previous();
        assert_eq!(c.current_index(), 0);
        c.move_to_slide(4);
        c.next();
        assert_eq!(c.current_index(), 4);
    }

    #[test]
    fn test_next_previous_with_loop() {
        let mut c = mount(five(), CarouselConfig::default().with_loop(true));
        assert!(!c.presenter().previous_control().unwrap().disabled);
        c.previous();
        assert_eq!(c.current_index(), 4);
        c.next();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_keys() {
        let mut c = mount(five(), CarouselConfig::default().with_loop(true));
        c.on_key(Key::Left);
        assert_eq!(c.current_index(), 0);
        c.on_key(Key::Right);
        c.on_key(Key::Right);
        assert_eq!(c.current_index(), 2);
        c.on_key(Key::Other);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_controls_and_dots() {
        let mut c = mount(five(), CarouselConfig::default());
        c.on_next_control();
        assert_eq!(c.current_index(), 1);
        c.on_previous_control();
        assert_eq!(c.current_index(), 0);
        c.on_dot(3);
        assert_eq!(c.current_index(), 3);
        assert_eq!(c.presenter().active_dot(), Some(3));
        c.on_dot(99);
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn test_controls_absent() {
        let mut c: TestCarousel = Carousel::mount(
            Some(five()),
            ManualScheduler::new(),
            RecordingPresenter::new().without_controls(),
            CarouselConfig::default(),
        )
        .unwrap();
        c.on_next_control();
        assert_eq!(c.current_index(), 0);
        assert!(c.presenter().next_control().is_none());
        assert!(!c
            .presenter()
            .calls()
            .contains(&PresenterCall::UpdateControls));
    }

    #[test]
    fn test_sticky_swipe_past_threshold() {
        let mut c = mount(five(), CarouselConfig::default());
        c.move_to_slide(2);
        settle(&mut c);

        c.on_pan_start(200.0);
        assert_eq!(c.animation_state(), AnimationState::Idle);
        c.on_pan_move(-40.0, 160.0);
        assert!((c.viewport().scroll_offset() - 200.0).abs() < 1e-9);
        c.on_pan_end(-60.0);
        assert_eq!(c.current_index(), 3);

        c.on_pan_start(200.0);
        c.on_pan_end(60.0);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_sticky_short_swipe_snaps_back() {
        let mut c = mount(five(), CarouselConfig::default());
        c.move_to_slide(2);
        settle(&mut c);
        c.on_pan_start(200.0);
        c.on_pan_end(-30.0);
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.animation_state(), AnimationState::Easing);
        settle(&mut c);
        assert!((c.viewport().scroll_offset() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_free_drag_follows_finger_then_momentum() {
        let mut c = mount(five(), CarouselConfig::default().with_free_mode(true));
        c.on_pan_start(250.0);
        c.on_pan_move(-50.0, 200.0);
        assert_eq!(c.viewport().scroll_offset(), 50.0);
        c.on_pan_move(-60.0, 190.0);
        assert_eq!(c.viewport().scroll_offset(), 60.0);
        c.on_pan_end(-60.0);
        assert_eq!(c.animation_state(), AnimationState::Momentum);
        assert_eq!(c.current_index(), 0);

        settle(&mut c);
        assert_eq!(c.animation_state(), AnimationState::Idle);
        assert!(c.viewport().scroll_offset() > 60.0 + 10.0);
    }

    #[test]
    fn test_free_slow_release_has_no_momentum() {
        let mut c = mount(five(), CarouselConfig::default().with_free_mode(true));
        c.on_pan_start(250.0);
        c.on_pan_move(-50.0, 200.0);
        c.on_pan_move(-50.2, 199.8);
        c.on_pan_end(-50.2);
        assert_eq!(c.animation_state(), AnimationState::Idle);
    }

    #[test]
    fn test_new_pan_cancels_momentum() {
        let mut c = mount(five(), CarouselConfig::default().with_free_mode(true));
        c.on_pan_start(250.0);
        c.on_pan_move(-20.0, 230.0);
        c.on_pan_end(-20.0);
        assert_eq!(c.animation_state(), AnimationState::Momentum);
        c.on_pan_start(230.0);
        assert_eq!(c.animation_state(), AnimationState::Idle);
        assert!(c.scheduler().pending().is_empty());
    }

    #[test]
    fn test_tap_selects_slide() {
        let mut c = mount(five(), CarouselConfig::default());
        c.on_tap_at(150.0);
        assert_eq!(c.current_index(), 1);
        c.on_tap(3);
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn test_tap_suppressed_right_after_drag() {
        let mut c = mount(five(), CarouselConfig::default());
        c.on_pan_start(100.0);
        c.on_pan_end(5.0);
        assert!(c.is_dragging());
        c.on_tap(2);
        assert_eq!(c.current_index(), 0);

        c.scheduler_mut().advance(60.0);
        assert!(!c.is_dragging());
        c.on_tap(2);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_tap_disabled() {
        let mut c = mount(five(), CarouselConfig::default().with_click_to_select(false));
        c.on_tap(2);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_handle_gesture_tap_hit_tests() {
        let mut c = mount(five(), CarouselConfig::default());
        c.handle(Input::Gesture(Gesture::Tap { x: 250.0, y: 10.0 }));
        assert_eq!(c.current_index(), 2);
        c.handle(Input::Gesture(Gesture::Tap { x: 900.0, y: 10.0 }));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_scroll_without_tracking_does_nothing() {
        let mut c = mount(five(), CarouselConfig::default());
        c.viewport_mut().set_scroll_offset(300.0);
        c.on_scroll();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_sticky_recompute_from_scroll() {
        let mut c = mount(five(), CarouselConfig::default().with_auto_active_tracking(true));
        c.viewport_mut().set_scroll_offset(150.0);
        let writes = c.viewport().scroll_writes();
        c.presenter_mut().clear_calls();
        c.on_scroll();
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.viewport().scroll_writes(), writes);
        assert_eq!(c.animation_state(), AnimationState::Idle);
        assert_eq!(c.presenter().status(), "Slide 3 of 5");
        assert_eq!(c.presenter().active_dot(), Some(2));
    }

    #[test]
    fn test_sticky_recompute_defaults_to_last() {
        let mut c = mount(five(), CarouselConfig::default().with_auto_active_tracking(true));
        c.viewport_mut().set_scroll_offset(450.0);
        c.on_scroll();
        assert_eq!(c.current_index(), 4);
    }

    #[test]
    fn test_free_recompute_uses_overlap() {
        let config = CarouselConfig::default()
            .with_free_mode(true)
            .with_auto_active_tracking(true);
        let mut c = mount(five(), config);
        c.viewport_mut().set_scroll_offset(140.0);
        c.on_scroll();
        // Slides 2 and 3 are both fully inside the frame; the lower index wins.
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_scroll_during_easing_is_deferred() {
        let mut c = mount(five(), CarouselConfig::default().with_auto_active_tracking(true));
        c.move_to_slide(3);
        let tokens = c.scheduler_mut().take_frames();
        c.scheduler_mut().advance(100.0);
        for t in tokens {
            c.on_frame(t);
        }
        c.on_scroll();
        assert_eq!(c.current_index(), 3);
        settle(&mut c);
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn test_momentum_settle_recomputes() {
        let config = CarouselConfig::default()
            .with_free_mode(true)
            .with_auto_active_tracking(true);
        let mut c = mount(five(), config);
        c.on_pan_start(250.0);
        c.on_pan_move(-100.0, 150.0);
        c.on_pan_move(-110.0, 140.0);
        c.on_pan_end(-110.0);
        settle(&mut c);
        assert_ne!(c.current_index(), 0);
        let expected = free_active_from(c.viewport()).unwrap();
        assert_eq!(c.current_index(), expected);
    }

    #[test]
    fn test_change_listener() {
        let mut c = mount(five(), CarouselConfig::default());
        let seen: Rc<RefCell<Vec<(usize, u32)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        c.on_change(move |event: &SlideChanged<MemorySlide>| {
            sink.borrow_mut().push((event.index, event.slide.id));
        });
        c.move_to_slide(2);
        c.next();
        assert_eq!(*seen.borrow(), vec![(2, 2), (3, 3)]);
    }

    #[test]
    fn test_destroy_makes_everything_noop() {
        let mut c = mount(five(), CarouselConfig::default());
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        c.on_change(move |_| *sink.borrow_mut() += 1);
        c.move_to_slide(2);
        let pending = c.scheduler().pending().to_vec();
        c.destroy();
        assert!(!c.is_attached());
        assert_eq!(c.animation_state(), AnimationState::Idle);

        let offset = c.viewport().scroll_offset();
        c.presenter_mut().clear_calls();
        for token in pending {
            assert_eq!(c.on_frame(token), FrameOutcome::Ignored);
        }
        c.next();
        c.on_pan_start(10.0);
        c.on_pan_end(-100.0);
        c.on_tap(4);
        c.on_scroll();
        c.destroy();
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.viewport().scroll_offset(), offset);
        assert!(c.presenter().calls().is_empty());
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn test_rebuild_pagination_after_visibility_change() {
        let mut c = mount(five(), CarouselConfig::default());
        c.move_to_slide(3);
        c.viewport_mut().set_visible(1, false);
        c.rebuild_pagination();
        let dots = c.presenter().dots();
        assert_eq!(dots.len(), 4);
        assert_eq!(dots[2].slide_index, 3);
        assert_eq!(c.presenter().active_dot(), Some(2));
        c.on_dot(1);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_without_pagination_host() {
        let mut c: TestCarousel = Carousel::mount(
            Some(five()),
            ManualScheduler::new(),
            RecordingPresenter::new().without_pagination_host(),
            CarouselConfig::default(),
        )
        .unwrap();
        assert!(c.pagination().is_none());
        c.move_to_slide(1);
        assert!(!c
            .presenter()
            .calls()
            .iter()
            .any(|call| matches!(call, PresenterCall::RenderPagination(_) | PresenterCall::SelectDot(_))));
    }

    #[test]
    fn test_detach_pagination() {
        let mut c = mount(five(), CarouselConfig::default());
        c.detach_pagination();
        assert!(c.pagination().is_none());
        assert!(c.presenter().dots().is_empty());
        c.move_to_slide(2);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_uniform_width_mode() {
        let uniform = UniformWidth {
            enabled: true,
            active_width: Some(150.0),
            width_transition_ms: 200.0,
        };
        let viewport = MemoryViewport::uniform(300.0, 5, 100.0).with_gap(10.0);
        let mut c = mount(viewport, CarouselConfig::default().with_uniform_width(uniform));
        c.move_to_slide(3);
        settle(&mut c);
        assert!((c.viewport().scroll_offset() - 480.0).abs() < 1e-9);
        assert_eq!(
            c.presenter().slide(3).unwrap().width,
            WidthStyle::Fixed {
                width: 150.0,
                transition_ms: 200.0
            }
        );
        assert_eq!(
            c.presenter().slide(0).unwrap().width,
            WidthStyle::Reset {
                transition_ms: 200.0
            }
        );
    }

    #[test]
    fn test_set_labels_rerenders() {
        let mut c = mount(five(), CarouselConfig::default());
        c.set_labels(Box::new(Locale::De));
        assert_eq!(c.presenter().region().unwrap().label, "Bildkarussell");
        assert_eq!(c.presenter().dots()[0].label, "Gehe zu Folie 1");
    }
}
