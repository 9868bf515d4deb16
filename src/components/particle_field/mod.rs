//! Animated particle network backdrop.
//!
//! Renders drifting particles on a fullscreen canvas with:
//! - Constant-velocity motion, recycled at the viewport edges
//! - Lines between nearby particles, fading out with distance
//! - A density cap so small screens are not overcrowded
//! - Pause on hidden pages without a catch-up jump on return
//!
//! # Example
//!
//! ```ignore
//! use constellation::components::particle_field::{FieldConfig, ParticleBackdrop};
//!
//! view! { <ParticleBackdrop config=FieldConfig::default() /> }
//! ```

mod component;
pub mod config;
mod particles;
mod render;
mod surface;

pub use component::ParticleBackdrop;
pub use config::{Color, FieldConfig};
pub use particles::{NextFrame, Particle, ParticleField};
pub use render::connection_alpha;
pub use surface::{Surface, canvas_surface};
