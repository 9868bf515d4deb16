//! Tunables for the particle backdrop.
//!
//! Every field has a default matching the shipped look, so a configuration
//! island only needs to name the values it overrides.

use serde::Deserialize;

use crate::error::SetupError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `0.0..=1.0`; opaque when omitted.
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with opacity replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba()` string with alpha rounded to three decimals.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
	}
}

/// Particle simulation and rendering parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Upper bound on live particles, before the density cap.
	pub particle_count: usize,
	/// Reference speed in units per tick; spawn speed is 0.4x to 1.4x of this.
	pub max_velocity: f64,
	/// Pairs closer than this are connected by a line.
	pub line_distance: f64,
	/// Line alpha at zero distance, before attenuation.
	pub base_alpha: f64,
	/// Fixed dimming applied to every connection line.
	pub line_attenuation: f64,
	/// Viewport area granted per particle by the density cap.
	pub area_per_particle: f64,
	/// Converts elapsed milliseconds to simulation ticks.
	pub time_scale: f64,
	/// Distance past the viewport edge before a particle is recycled.
	pub edge_margin: f64,
	/// Connection stroke width.
	pub line_width: f64,
	/// Particle fill.
	pub particle_color: Color,
	/// Line color; alpha is replaced per pair.
	pub line_color: Color,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle_count: 80,
			max_velocity: 0.4,
			line_distance: 150.0,
			base_alpha: 0.8,
			line_attenuation: 0.6,
			area_per_particle: 15_000.0,
			time_scale: 0.06,
			edge_margin: 50.0,
			line_width: 0.7,
			particle_color: Color::rgba(230, 243, 255, 0.9),
			line_color: Color::rgb(233, 244, 255),
		}
	}
}

impl FieldConfig {
	/// Rejects values that would make the density cap or the alpha ramp
	/// meaningless.
	pub fn validate(&self) -> Result<(), SetupError> {
		if !(self.area_per_particle > 0.0) {
			return Err(SetupError::InvalidConfig(format!(
				"area_per_particle must be positive, got {}",
				self.area_per_particle
			)));
		}
		if !(self.line_distance > 0.0) {
			return Err(SetupError::InvalidConfig(format!(
				"line_distance must be positive, got {}",
				self.line_distance
			)));
		}
		if !self.time_scale.is_finite() || self.time_scale < 0.0 {
			return Err(SetupError::InvalidConfig(format!(
				"time_scale must be finite and non-negative, got {}",
				self.time_scale
			)));
		}
		if !self.max_velocity.is_finite() || self.max_velocity < 0.0 {
			return Err(SetupError::InvalidConfig(format!(
				"max_velocity must be finite and non-negative, got {}",
				self.max_velocity
			)));
		}
		if !self.edge_margin.is_finite() || self.edge_margin < 0.0 {
			return Err(SetupError::InvalidConfig(format!(
				"edge_margin must be finite and non-negative, got {}",
				self.edge_margin
			)));
		}
		Ok(())
	}
}
