//! Pan and tap recognition from raw pointer samples.
//!
//! Only the first pointer down is tracked; others are ignored until it lifts.
//! A pan starts once horizontal travel exceeds the pan threshold and
//! dominates vertical travel, so vertical page scrolling is left alone.

/// Pointer identifier, as reported by the host.
pub type PointerId = u32;

/// Recognition thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Horizontal travel a pan must exceed (pixels).
    pub pan_threshold: f64,
    /// A tap must be shorter than this (milliseconds).
    pub tap_timeout_ms: f64,
    /// A tap must travel less than this (pixels).
    pub tap_slop: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pan_threshold: 10.0,
            tap_timeout_ms: 300.0,
            tap_slop: 10.0,
        }
    }
}

/// A raw pointer event with a timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSample {
    /// Pointer pressed
    Down {
        /// Pointer
        id: PointerId,
        /// Client x
        x: f64,
        /// Client y
        y: f64,
        /// Timestamp
        time_ms: f64,
    },
    /// Pointer moved
    Move {
        /// Pointer
        id: PointerId,
        /// Client x
        x: f64,
        /// Client y
        y: f64,
        /// Timestamp
        time_ms: f64,
    },
    /// Pointer released
    Up {
        /// Pointer
        id: PointerId,
        /// Client x
        x: f64,
        /// Client y
        y: f64,
        /// Timestamp
        time_ms: f64,
    },
    /// Pointer cancelled by the host
    Cancel {
        /// Pointer
        id: PointerId,
    },
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Horizontal drag began at client x.
    PanStart {
        /// Pointer x when the pan was recognized
        x: f64,
    },
    /// Drag continued.
    PanMove {
        /// Horizontal travel since pointer down
        delta_x: f64,
        /// Current pointer x
        center_x: f64,
    },
    /// Drag ended.
    PanEnd {
        /// Horizontal travel since pointer down
        delta_x: f64,
    },
    /// Short press without travel.
    Tap {
        /// Client x
        x: f64,
        /// Client y
        y: f64,
    },
}

#[derive(Debug, Clone, Copy)]
struct TrackedPointer {
    id: PointerId,
    start_x: f64,
    start_y: f64,
    x: f64,
    y: f64,
    start_ms: f64,
    beyond_slop: bool,
    panning: bool,
}

impl TrackedPointer {
    fn delta_x(&self) -> f64 {
        self.x - self.start_x
    }

    fn delta_y(&self) -> f64 {
        self.y - self.start_y
    }

    fn distance(&self) -> f64 {
        self.delta_x().hypot(self.delta_y())
    }
}

/// Turns pointer samples into pan and tap gestures.
#[derive(Debug, Clone, Default)]
pub struct PanRecognizer {
    config: GestureConfig,
    pointer: Option<TrackedPointer>,
}

impl PanRecognizer {
    /// Recognizer with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognizer with custom thresholds.
    #[must_use]
    pub const fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            pointer: None,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether a pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pointer.is_some_and(|p| p.panning)
    }

    /// Feed one sample.
    pub fn process(&mut self, sample: PointerSample) -> Option<Gesture> {
        match sample {
            PointerSample::Down { id, x, y, time_ms } => {
                if self.pointer.is_none() {
                    self.pointer = Some(TrackedPointer {
                        id,
                        start_x: x,
                        start_y: y,
                        x,
                        y,
                        start_ms: time_ms,
                        beyond_slop: false,
                        panning: false,
                    });
                }
                None
            }
            PointerSample::Move { id, x, y, .. } => {
                let config = self.config;
                let pointer = self.pointer.as_mut().filter(|p| p.id == id)?;
                pointer.x = x;
                pointer.y = y;
                if pointer.distance() >= config.tap_slop {
                    pointer.beyond_slop = true;
                }
                if pointer.panning {
                    return Some(Gesture::PanMove {
                        delta_x: pointer.delta_x(),
                        center_x: x,
                    });
                }
                let dx = pointer.delta_x().abs();
                if dx > config.pan_threshold && dx >= pointer.delta_y().abs() {
                    pointer.panning = true;
                    return Some(Gesture::PanStart { x });
                }
                None
            }
            PointerSample::Up { id, x, y, time_ms } => {
                let mut pointer = self.take(id)?;
                pointer.x = x;
                pointer.y = y;
                if pointer.panning {
                    return Some(Gesture::PanEnd {
                        delta_x: pointer.delta_x(),
                    });
                }
                let quick = time_ms - pointer.start_ms < self.config.tap_timeout_ms;
                let still = !pointer.beyond_slop && pointer.distance() < self.config.tap_slop;
                (quick && still).then_some(Gesture::Tap { x, y })
            }
            PointerSample::Cancel { id } => {
                let pointer = self.take(id)?;
                pointer.panning.then(|| Gesture::PanEnd {
                    delta_x: pointer.delta_x(),
                })
            }
        }
    }

    /// Forget the tracked pointer without emitting anything.
    pub fn reset(&mut self) {
        self.pointer = None;
    }

    fn take(&mut self, id: PointerId) -> Option<TrackedPointer> {
        if self.pointer.is_some_and(|p| p.id == id) {
            self.pointer.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, t: f64) -> PointerSample {
        PointerSample::Down {
            id: 1,
            x,
            y: 50.0,
            time_ms: t,
        }
    }

    fn mv(x: f64, y: f64, t: f64) -> PointerSample {
        PointerSample::Move { id: 1, x, y, time_ms: t }
    }

    fn up(x: f64, t: f64) -> PointerSample {
        PointerSample::Up {
            id: 1,
            x,
            y: 50.0,
            time_ms: t,
        }
    }

    #[test]
    fn test_config_default() {
        let config = GestureConfig::default();
        assert_eq!(config.pan_threshold, 10.0);
        assert_eq!(config.tap_timeout_ms, 300.0);
        assert_eq!(config.tap_slop, 10.0);
    }

    #[test]
    fn test_tap() {
        let mut r = PanRecognizer::new();
        assert_eq!(r.process(down(100.0, 0.0)), None);
        assert_eq!(r.process(mv(102.0, 50.0, 20.0)), None);
        assert_eq!(
            r.process(up(102.0, 80.0)),
            Some(Gesture::Tap { x: 102.0, y: 50.0 })
        );
    }

    #[test]
    fn test_long_press_is_not_tap() {
        let mut r = PanRecognizer::new();
        r.process(down(100.0, 0.0));
        assert_eq!(r.process(up(100.0, 500.0)), None);
    }

    #[test]
    fn test_pan_sequence() {
        let mut r = PanRecognizer::new();
        r.process(down(200.0, 0.0));
        assert_eq!(r.process(mv(195.0, 50.0, 10.0)), None);
        assert_eq!(
            r.process(mv(185.0, 50.0, 20.0)),
            Some(Gesture::PanStart { x: 185.0 })
        );
        assert!(r.is_panning());
        assert_eq!(
            r.process(mv(150.0, 52.0, 30.0)),
            Some(Gesture::PanMove {
                delta_x: -50.0,
                center_x: 150.0
            })
        );
        assert_eq!(
            r.process(up(140.0, 40.0)),
            Some(Gesture::PanEnd { delta_x: -60.0 })
        );
        assert!(!r.is_panning());
    }

    #[test]
    fn test_vertical_drag_is_ignored() {
        let mut r = PanRecognizer::new();
        r.process(down(100.0, 0.0));
        assert_eq!(r.process(mv(112.0, 90.0, 10.0)), None);
        assert_eq!(r.process(up(112.0, 40.0)), None);
    }

    #[test]
    fn test_second_pointer_ignored() {
        let mut r = PanRecognizer::new();
        r.process(down(100.0, 0.0));
        r.process(PointerSample::Down {
            id: 2,
            x: 300.0,
            y: 0.0,
            time_ms: 5.0,
        });
        assert_eq!(
            r.process(PointerSample::Move {
                id: 2,
                x: 200.0,
                y: 0.0,
                time_ms: 10.0
            }),
            None
        );
        assert_eq!(
            r.process(PointerSample::Up {
                id: 2,
                x: 200.0,
                y: 0.0,
                time_ms: 12.0
            }),
            None
        );
        assert_eq!(
            r.process(up(100.0, 50.0)),
            Some(Gesture::Tap { x: 100.0, y: 50.0 })
        );
    }

    #[test]
    fn test_cancel_ends_pan() {
        let mut r = PanRecognizer::new();
        r.process(down(100.0, 0.0));
        r.process(mv(130.0, 50.0, 10.0));
        assert_eq!(
            r.process(PointerSample::Cancel { id: 1 }),
            Some(Gesture::PanEnd { delta_x: 30.0 })
        );
        assert_eq!(r.process(PointerSample::Cancel { id: 1 }), None);
    }

    #[test]
    fn test_reset() {
        let mut r = PanRecognizer::new();
        r.process(down(100.0, 0.0));
        r.process(mv(130.0, 50.0, 10.0));
        r.reset();
        assert!(!r.is_panning());
        assert_eq!(r.process(up(130.0, 20.0)), None);
    }
}
