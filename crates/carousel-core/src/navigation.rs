//! Navigation state machine.
//!
//! Transitions are pure: `State + Input -> (State, Vec<Effect>)`. The
//! controller runs the returned effects in order against the viewport,
//! animator and presenter. Nothing here reads a clock or a layout; the
//! caller passes both in a [`NavContext`].

use crate::config::CarouselConfig;
use crate::event::Key;
use tracing::debug;

/// Side effects requested by a transition, run in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Stop any running animation.
    CancelAnimation,
    /// Present this slide as active and every other slide as inactive.
    MarkActive(usize),
    /// Start an eased scroll toward this slide's target offset.
    AnimateTo(usize),
    /// Write this scroll offset directly.
    SetScrollOffset(f64),
    /// Start momentum with this velocity (pixels per frame).
    StartMomentum(f64),
    /// Highlight this slide's pagination dot and update the controls.
    SyncIndicators(usize),
    /// Announce this slide, focus it and notify change listeners.
    Announce(usize),
    /// Derive the active slide from the current scroll offset.
    RecomputeActive,
}

/// Pointer drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    /// No drag
    #[default]
    Idle,
    /// Pointer is down and panning
    Dragging,
    /// Drag ended; taps are suppressed until `until_ms`.
    Releasing {
        /// End of the suppression window
        until_ms: f64,
    },
}

/// The configuration values transitions depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPolicy {
    /// Wrap at the ends
    pub looping: bool,
    /// Continuous drag with momentum instead of snapping
    pub free_mode: bool,
    /// Drag distance that triggers a snap transition
    pub swipe_threshold: f64,
    /// Taps select slides
    pub click_to_select: bool,
    /// Derive the active slide from scroll
    pub auto_active_tracking: bool,
    /// Tap suppression window after a drag
    pub tap_suppress_ms: f64,
}

impl From<&CarouselConfig> for NavPolicy {
    fn from(config: &CarouselConfig) -> Self {
        Self {
            looping: config.looping,
            free_mode: config.free_mode,
            swipe_threshold: config.swipe_threshold,
            click_to_select: config.click_to_select,
            auto_active_tracking: config.auto_active_tracking,
            tap_suppress_ms: config.tap_suppress_ms,
        }
    }
}

impl Default for NavPolicy {
    fn default() -> Self {
        Self::from(&CarouselConfig::default())
    }
}

/// Inputs a transition may consult.
#[derive(Debug, Clone, Copy)]
pub struct NavContext<'a> {
    /// Configuration
    pub policy: NavPolicy,
    /// Live visibility of every slide, in order.
    pub visibility: &'a [bool],
    /// Current clock time
    pub now_ms: f64,
}

impl<'a> NavContext<'a> {
    /// Bundle a transition context.
    #[must_use]
    pub const fn new(policy: NavPolicy, visibility: &'a [bool], now_ms: f64) -> Self {
        Self {
            policy,
            visibility,
            now_ms,
        }
    }

    fn is_visible(&self, index: usize) -> bool {
        self.visibility.get(index).copied().unwrap_or(false)
    }

    fn first_visible(&self) -> Option<usize> {
        self.visibility.iter().position(|v| *v)
    }

    fn last_visible(&self) -> Option<usize> {
        self.visibility.iter().rposition(|v| *v)
    }

    fn visible_after(&self, index: usize) -> Option<usize> {
        (index + 1..self.visibility.len()).find(|&i| self.visibility[i])
    }

    fn visible_before(&self, index: usize) -> Option<usize> {
        (0..index.min(self.visibility.len())).rev().find(|&i| self.visibility[i])
    }
}

/// Carousel navigation state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationState {
    current_index: usize,
    drag: DragPhase,
    drag_start_offset: f64,
    last_x: f64,
    velocity: f64,
}

impl NavigationState {
    /// Start at the first visible slide, or 0 when none is visible.
    #[must_use]
    pub fn new(visibility: &[bool]) -> Self {
        Self {
            current_index: visibility.iter().position(|v| *v).unwrap_or(0),
            ..Self::default()
        }
    }

    /// Current slide index. May point at a slide hidden since it was chosen.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// Drag phase, not accounting for expiry of the suppression window.
    #[must_use]
    pub const fn drag_phase(&self) -> DragPhase {
        self.drag
    }

    /// Whether a drag is in progress or ended within the suppression window.
    #[must_use]
    pub fn is_dragging(&self, now_ms: f64) -> bool {
        match self.drag {
            DragPhase::Idle => false,
            DragPhase::Dragging => true,
            DragPhase::Releasing { until_ms } => now_ms < until_ms,
        }
    }

    /// Scroll offset captured at pan start.
    #[must_use]
    pub const fn drag_start_offset(&self) -> f64 {
        self.drag_start_offset
    }

    /// Last observed pointer velocity (pixels per move event).
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// The current index if its slide is visible, otherwise the first
    /// visible slide.
    #[must_use]
    pub fn resolved_index(&self, visibility: &[bool]) -> Option<usize> {
        if visibility.get(self.current_index).copied().unwrap_or(false) {
            Some(self.current_index)
        } else {
            visibility.iter().position(|v| *v)
        }
    }

    /// Navigate to `index`, clamped to the slide range. A hidden target
    /// falls back to the first visible slide; with none visible this is a
    /// no-op.
    pub fn move_to(&mut self, index: usize, ctx: &NavContext<'_>) -> Vec<Effect> {
        let Some(last) = ctx.visibility.len().checked_sub(1) else {
            return Vec::new();
        };
        let clamped = index.min(last);
        let target = if ctx.is_visible(clamped) {
            clamped
        } else if let Some(first) = ctx.first_visible() {
            first
        } else {
            debug!(index, "no visible slide to move to");
            return Vec::new();
        };
        debug!(from = self.current_index, to = target, "move to slide");
        self.current_index = target;
        vec![
            Effect::CancelAnimation,
            Effect::MarkActive(target),
            Effect::AnimateTo(target),
            Effect::SyncIndicators(target),
            Effect::Announce(target),
        ]
    }

    /// Step forward to the next visible slide, wrapping to the first
    /// visible slide when looping.
    pub fn next(&mut self, ctx: &NavContext<'_>) -> Vec<Effect> {
        self.step(true, ctx.policy.looping, ctx)
    }

    /// Step back to the previous visible slide, wrapping to the last
    /// visible slide when looping.
    pub fn previous(&mut self, ctx: &NavContext<'_>) -> Vec<Effect> {
        self.step(false, ctx.policy.looping, ctx)
    }

    /// Arrow keys step like `next`/`previous` but never wrap.
    pub fn key(&mut self, key: Key, ctx: &NavContext<'_>) -> Vec<Effect> {
        match key {
            Key::Right => self.step(true, false, ctx),
            Key::Left => self.step(false, false, ctx),
            Key::Other => Vec::new(),
        }
    }

    /// Move one visible slide in `forward` direction. Past the visible end
    /// this wraps when `wrap` is set and otherwise re-settles on the end.
    fn step(&mut self, forward: bool, wrap: bool, ctx: &NavContext<'_>) -> Vec<Effect> {
        let (Some(first), Some(last)) = (ctx.first_visible(), ctx.last_visible()) else {
            return Vec::new();
        };
        let current = self.current_index;
        let neighbour = if forward {
            ctx.visible_after(current)
        } else {
            ctx.visible_before(current)
        };
        let target = match neighbour {
            Some(index) => index,
            None if wrap => {
                if forward {
                    first
                } else {
                    last
                }
            }
            None if forward => last,
            None => first,
        };
        self.move_to(target, ctx)
    }

    /// Pointer pan began at client `x` with the viewport at `scroll_offset`.
    pub fn pan_start(&mut self, x: f64, scroll_offset: f64) -> Vec<Effect> {
        self.drag = DragPhase::Dragging;
        self.drag_start_offset = scroll_offset;
        self.last_x = x;
        self.velocity = 0.0;
        vec![Effect::CancelAnimation]
    }

    /// Pan continued. Free mode follows the finger; sticky mode waits for
    /// the release.
    pub fn pan_move(&mut self, delta_x: f64, center_x: f64, ctx: &NavContext<'_>) -> Vec<Effect> {
        if self.drag != DragPhase::Dragging {
            return Vec::new();
        }
        self.velocity = center_x - self.last_x;
        self.last_x = center_x;
        if ctx.policy.free_mode {
            vec![Effect::SetScrollOffset(self.drag_start_offset - delta_x)]
        } else {
            Vec::new()
        }
    }

    /// Pan ended after `delta_x` of horizontal travel.
    pub fn pan_end(&mut self, delta_x: f64, ctx: &NavContext<'_>) -> Vec<Effect> {
        if self.drag != DragPhase::Dragging {
            return Vec::new();
        }
        self.drag = DragPhase::Releasing {
            until_ms: ctx.now_ms + ctx.policy.tap_suppress_ms,
        };
        if ctx.policy.free_mode {
            return if self.velocity.abs() >= crate::animation::MOMENTUM_MIN_VELOCITY {
                vec![Effect::StartMomentum(self.velocity)]
            } else if ctx.policy.auto_active_tracking {
                vec![Effect::RecomputeActive]
            } else {
                Vec::new()
            };
        }
        let threshold = ctx.policy.swipe_threshold;
        if delta_x > threshold {
            self.previous(ctx)
        } else if delta_x < -threshold {
            self.next(ctx)
        } else {
            self.move_to(self.current_index, ctx)
        }
    }

    /// A slide was tapped. Ignored while dragging or when tap selection is
    /// off.
    pub fn tap(&mut self, index: usize, ctx: &NavContext<'_>) -> Vec<Effect> {
        if !ctx.policy.click_to_select || self.is_dragging(ctx.now_ms) {
            debug!(index, "tap ignored");
            return Vec::new();
        }
        self.move_to(index, ctx)
    }

    /// Adopt `index` as active after a scroll, without animating.
    pub fn sync_active(&mut self, index: usize, ctx: &NavContext<'_>) -> Vec<Effect> {
        if index == self.current_index || !ctx.is_visible(index) {
            return Vec::new();
        }
        debug!(from = self.current_index, to = index, "active slide follows scroll");
        self.current_index = index;
        vec![
            Effect::MarkActive(index),
            Effect::SyncIndicators(index),
            Effect::Announce(index),
        ]
    }
}
