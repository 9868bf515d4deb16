//! Frame rendering for the particle field.
//!
//! Two passes per frame:
//! 1. Particles as filled circles
//! 2. Connection lines between every pair closer than the line distance

use super::config::FieldConfig;
use super::particles::Particle;
use super::surface::Surface;

/// Clears the surface and draws the complete frame.
pub fn render<S: Surface>(
	particles: &[Particle],
	width: f64,
	height: f64,
	config: &FieldConfig,
	surface: &mut S,
) {
	surface.clear(width, height);
	draw_particles(particles, config, surface);
	draw_connections(particles, config, surface);
}

fn draw_particles<S: Surface>(particles: &[Particle], config: &FieldConfig, surface: &mut S) {
	for p in particles {
		surface.fill_circle(p.x, p.y, p.radius, config.particle_color);
	}
}

/// Line opacity for a pair at squared distance `dist_sq`, or `None` when the
/// pair is too far apart to be connected.
pub fn connection_alpha(dist_sq: f64, config: &FieldConfig) -> Option<f64> {
	let max_dist_sq = config.line_distance * config.line_distance;
	if dist_sq >= max_dist_sq {
		return None;
	}
	let dist = dist_sq.sqrt();
	Some(config.base_alpha * (1.0 - dist / config.line_distance) * config.line_attenuation)
}

// O(n^2) over at most `particle_count` particles; no spatial index needed.
fn draw_connections<S: Surface>(particles: &[Particle], config: &FieldConfig, surface: &mut S) {
	for (i, p1) in particles.iter().enumerate() {
		for p2 in &particles[i + 1..] {
			let (dx, dy) = (p1.x - p2.x, p1.y - p2.y);
			let Some(alpha) = connection_alpha(dx * dx + dy * dy, config) else {
				continue;
			};
			surface.stroke_line(
				(p1.x, p1.y),
				(p2.x, p2.y),
				config.line_color.with_alpha(alpha),
				config.line_width,
			);
		}
	}
}
