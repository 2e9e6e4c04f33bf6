//! Frame scheduling abstraction.
//!
//! Animations advance one discrete step per frame. The host decides when
//! frames happen (`requestAnimationFrame` in the browser, a manual clock in
//! tests) and calls back into the controller with the token it was given.

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameToken(pub u64);

impl FrameToken {
    /// Create a new frame token.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Schedules per-frame callbacks and reports the current time.
pub trait Scheduler {
    /// Current time in milliseconds on a monotonic clock.
    fn now_ms(&self) -> f64;

    /// Request one future frame.
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a previously requested frame. Unknown tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Scheduler with a manually advanced clock, for tests and headless hosts.
///
/// Requested frames queue up until the caller drains them with
/// [`ManualScheduler::take_frames`].
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now_ms: f64,
    next_id: u64,
    pending: Vec<FrameToken>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    /// Create a scheduler with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&mut self, delta_ms: f64) {
        self.now_ms += delta_ms;
    }

    /// Set the clock to an absolute time.
    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    /// Remove and return every pending frame, oldest first.
    pub fn take_frames(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
    }

    /// Frames requested and not yet taken or cancelled.
    #[must_use]
    pub fn pending(&self) -> &[FrameToken] {
        &self.pending
    }

    /// Total frames requested.
    #[must_use]
    pub const fn requested(&self) -> usize {
        self.requested
    }

    /// Total frames cancelled while still pending.
    #[must_use]
    pub const fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken::new(self.next_id);
        self.next_id += 1;
        self.pending.push(token);
        self.requested += 1;
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let before = self.pending.len();
        self.pending.retain(|t| *t != token);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}
