//! Page components.

pub mod carousel;
pub mod chrome;
pub mod particle_field;
