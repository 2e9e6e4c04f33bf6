//! Carousel: WASM-first horizontal slide carousel.
//!
//! Re-exports the headless engine from `carousel-core` and adds the browser
//! adapter that binds it to a DOM subtree.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { Slider } from './carousel.js';
//!
//! async function main() {
//!     await init();
//!     const root = document.querySelector('.slider');
//!     const slider = new Slider(root, '{"loop": true, "freeMode": false}');
//!     slider.on_change((index, slide) => console.log('active', index, slide, slider.current_index()));
//! }
//! ```
//!
//! Expected markup:
//!
//! ```html
//! <div class="slider">
//!   <ul class="slider__list">
//!     <li>...</li>
//!   </ul>
//!   <button class="slider--prev"></button>
//!   <button class="slider--next"></button>
//!   <div class="slider__pagination"></div>
//! </div>
//! ```

#![allow(clippy::doc_markdown, clippy::module_name_repetitions)]

pub use carousel_core::*;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::Slider;
