//! Host input delivered to the carousel.

use crate::gesture::Gesture;
use crate::scheduler::FrameToken;

/// Keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Anything else
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            _ => Self::Other,
        }
    }
}

/// One input event for [`Carousel::handle`](crate::controller::Carousel::handle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Recognized pointer gesture
    Gesture(Gesture),
    /// Key pressed while the region has focus
    Key(Key),
    /// Previous control activated
    Previous,
    /// Next control activated
    Next,
    /// Pagination dot activated
    Dot(usize),
    /// Viewport scroll offset changed
    Scroll,
    /// Animation frame fired
    Frame(FrameToken),
}

impl From<Gesture> for Input {
    fn from(gesture: Gesture) -> Self {
        Self::Gesture(gesture)
    }
}

impl From<Key> for Input {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}
