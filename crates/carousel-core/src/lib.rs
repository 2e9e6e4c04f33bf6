//! Core navigation engine for horizontal slide carousels.
//!
//! This crate holds everything that does not need a browser:
//! - Layout queries: [`Viewport`], [`Rect`], [`GeometryResolver`]
//! - Navigation: [`NavigationState`], [`Effect`], [`Carousel`]
//! - Scrolling: [`ScrollAnimator`] driven by a [`Scheduler`]
//! - Input: [`PanRecognizer`], [`Input`], [`Key`]
//! - Output: [`Presenter`], [`Pagination`], localized [`Labels`]
//!
//! In-memory collaborators ([`MemoryViewport`], [`ManualScheduler`],
//! [`RecordingPresenter`]) run the full engine headless.
//!
//! # Examples
//!
//! ```
//! use carousel_core::{
//!     Carousel, CarouselConfig, ManualScheduler, MemoryViewport, RecordingPresenter,
//! };
//!
//! let viewport = MemoryViewport::uniform(300.0, 4, 100.0);
//! let mut carousel = Carousel::mount(
//!     Some(viewport),
//!     ManualScheduler::new(),
//!     RecordingPresenter::new(),
//!     CarouselConfig::default(),
//! )
//! .unwrap();
//!
//! carousel.next();
//! assert_eq!(carousel.current_index(), 1);
//! assert_eq!(carousel.presenter().status(), "Slide 2 of 4");
//! ```

pub mod accessibility;
pub mod animation;
mod config;
pub mod controller;
mod error;
pub mod event;
mod geometry;
pub mod gesture;
mod locale;
pub mod navigation;
mod pagination;
pub mod presenter;
pub mod resolver;
mod scheduler;
pub mod viewport;

pub use accessibility::{
    AccessibleRole, ControlAttributes, DotAttributes, LiveRegion, RegionAttributes,
    SlideAttributes, WidthStyle,
};
pub use animation::{AnimationState, FrameOutcome, ScrollAnimator};
pub use config::{CarouselConfig, UniformWidth};
pub use controller::{Carousel, SlideChanged};
pub use error::{CarouselError, ConfigError};
pub use event::{Input, Key};
pub use geometry::Rect;
pub use gesture::{Gesture, GestureConfig, PanRecognizer, PointerId, PointerSample};
pub use locale::{Labels, Locale};
pub use navigation::{DragPhase, Effect, NavContext, NavPolicy, NavigationState};
pub use pagination::Pagination;
pub use presenter::{Presenter, PresenterCall, RecordingPresenter};
pub use resolver::{GeometryResolver, LayoutMode};
pub use scheduler::{FrameToken, ManualScheduler, Scheduler};
pub use viewport::{MemorySlide, MemoryViewport, Viewport};
