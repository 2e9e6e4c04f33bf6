//! Scroll animator: eased scrolling and momentum decay.
//!
//! At most one animation is live at a time. Starting either kind cancels
//! whatever was running, and `cancel` never raises a settle notification.
//! Each step runs in a frame requested from the [`Scheduler`].

use crate::scheduler::{FrameToken, Scheduler};
use crate::viewport::Viewport;

/// Per-frame velocity multiplier applied during momentum.
pub const MOMENTUM_DECAY: f64 = 0.95;

/// Momentum starts only at or above this speed and stops once at or below it
/// (pixels per frame).
pub const MOMENTUM_MIN_VELOCITY: f64 = 0.5;

/// Symmetric quadratic ease-in-out on a normalized time value.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
    }
}

/// A time-parameterized scroll from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasedScroll {
    /// Offset when the animation started
    pub from: f64,
    /// Destination offset
    pub to: f64,
    /// Clock time when the animation started
    pub start_ms: f64,
    /// Total duration
    pub duration_ms: f64,
}

impl EasedScroll {
    /// Fraction of the duration elapsed at `now_ms`, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms > 0.0 {
            ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Eased offset at `now_ms`.
    #[must_use]
    pub fn value_at(&self, now_ms: f64) -> f64 {
        let eased = ease_in_out(self.progress(now_ms));
        (self.to - self.from).mul_add(eased, self.from)
    }
}

/// The single live animation, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnimationHandle {
    /// Nothing running
    #[default]
    None,
    /// Eased scroll toward a target offset
    Easing(EasedScroll),
    /// Decaying post-release scroll; velocity in pixels per frame
    Momentum {
        /// Current velocity
        velocity: f64,
    },
}

/// Observable animator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    /// No animation
    #[default]
    Idle,
    /// Eased scroll in progress
    Easing,
    /// Momentum decay in progress
    Momentum,
}

/// Result of delivering a frame to the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame was not ours (stale or cancelled); nothing changed.
    Ignored,
    /// Animation advanced and requested another frame.
    Running,
    /// Animation reached its end and is now idle.
    Settled,
}

/// Owns the live animation and the frame it is waiting on.
#[derive(Debug)]
pub struct ScrollAnimator<S> {
    scheduler: S,
    handle: AnimationHandle,
    frame: Option<FrameToken>,
}

impl<S: Scheduler> ScrollAnimator<S> {
    /// Create an idle animator.
    pub const fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            handle: AnimationHandle::None,
            frame: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AnimationState {
        match self.handle {
            AnimationHandle::None => AnimationState::Idle,
            AnimationHandle::Easing(_) => AnimationState::Easing,
            AnimationHandle::Momentum { .. } => AnimationState::Momentum,
        }
    }

    /// The live animation.
    #[must_use]
    pub const fn handle(&self) -> &AnimationHandle {
        &self.handle
    }

    /// Whether nothing is running.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.handle, AnimationHandle::None)
    }

    /// Frame the animator is waiting on.
    #[must_use]
    pub const fn pending_frame(&self) -> Option<FrameToken> {
        self.frame
    }

    /// The underlying scheduler.
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The underlying scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Start an eased scroll from the current offset to `target`.
    pub fn animate_to<V: Viewport>(&mut self, viewport: &V, target: f64, duration_ms: f64) {
        self.cancel();
        let scroll = EasedScroll {
            from: viewport.scroll_offset(),
            to: target,
            start_ms: self.scheduler.now_ms(),
            duration_ms: duration_ms.max(0.0),
        };
        tracing::trace!(from = scroll.from, to = target, duration_ms, "easing start");
        self.handle = AnimationHandle::Easing(scroll);
        self.frame = Some(self.scheduler.request_frame());
    }

    /// Start momentum with an initial velocity in pixels per frame.
    ///
    /// Returns `false` and leaves the animator untouched when the velocity
    /// is below [`MOMENTUM_MIN_VELOCITY`].
    pub fn start_momentum(&mut self, velocity: f64) -> bool {
        if !(velocity.abs() >= MOMENTUM_MIN_VELOCITY) {
            return false;
        }
        self.cancel();
        tracing::trace!(velocity, "momentum start");
        self.handle = AnimationHandle::Momentum { velocity };
        self.frame = Some(self.scheduler.request_frame());
        true
    }

    /// Stop immediately, leaving the scroll offset where it is. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(token) = self.frame.take() {
            self.scheduler.cancel_frame(token);
        }
        self.handle = AnimationHandle::None;
    }

    /// Advance the live animation by one step.
    pub fn on_frame<V: Viewport>(&mut self, token: FrameToken, viewport: &mut V) -> FrameOutcome {
        if self.frame != Some(token) {
            tracing::trace!(?token, "stale frame ignored");
            return FrameOutcome::Ignored;
        }
        self.frame = None;

        match self.handle {
            AnimationHandle::None => FrameOutcome::Ignored,
            AnimationHandle::Easing(scroll) => {
                let now = self.scheduler.now_ms();
                viewport.set_scroll_offset(scroll.value_at(now));
                if scroll.progress(now) >= 1.0 {
                    self.handle = AnimationHandle::None;
                    FrameOutcome::Settled
                } else {
                    self.frame = Some(self.scheduler.request_frame());
                    FrameOutcome::Running
                }
            }
            AnimationHandle::Momentum { velocity } => {
                viewport.set_scroll_offset(viewport.scroll_offset() - velocity);
                let velocity = velocity * MOMENTUM_DECAY;
                if velocity.abs() > MOMENTUM_MIN_VELOCITY {
                    self.handle = AnimationHandle::Momentum { velocity };
                    self.frame = Some(self.scheduler.request_frame());
                    FrameOutcome::Running
                } else {
                    self.handle = AnimationHandle::None;
                    FrameOutcome::Settled
                }
            }
        }
    }
}
