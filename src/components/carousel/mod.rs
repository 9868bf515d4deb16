//! Slide carousel component.
//!
//! Pages horizontally over a fixed list of slides, two visible at a time,
//! with:
//! - Prev/next arrows, indicator dots and arrow-key navigation
//! - Modular index arithmetic that wraps in both directions
//! - Autoplay that pauses under the pointer and while the page is hidden

mod autoplay;
mod component;
mod state;
mod types;

pub use autoplay::{Autoplay, IntervalHost, WindowIntervals};
pub use component::Carousel;
pub use state::{CarouselCommand, CarouselConfig, CarouselState, command_for_key};
pub use types::Slide;
