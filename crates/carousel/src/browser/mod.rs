//! Browser runtime for the carousel.
//!
//! Binds the headless engine to a DOM subtree: layout queries, frame
//! scheduling, attribute output and event listeners.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod raf;
#[cfg(target_arch = "wasm32")]
pub mod slider;

// Cross-platform modules
pub mod input;
pub mod markup;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomPresenter, DomViewport};
pub use input::{parse_dot_index, pointer_sample};
pub use markup::{parse_options, parse_px, Attributes, WidthCss};
#[cfg(target_arch = "wasm32")]
pub use raf::{FrameSink, RafScheduler};
#[cfg(target_arch = "wasm32")]
pub use slider::Slider;
