//! Drifting particles and the field that owns them.

use std::f64::consts::TAU;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::FieldConfig;
use super::render;
use super::surface::Surface;

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in surface coordinates.
	pub x: f64,
	/// Vertical position in surface coordinates.
	pub y: f64,
	/// Horizontal velocity in units per tick.
	pub vx: f64,
	/// Vertical velocity in units per tick.
	pub vy: f64,
	/// Drawn radius, fixed until the next reset.
	pub radius: f64,
}

/// Where a (re)spawned particle is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Spawn {
	/// Anywhere inside the viewport.
	Scattered,
	/// On the left or right edge, so recycling reads as particles drifting in.
	Edge,
}

impl Particle {
	fn spawn(rng: &mut SmallRng, max_velocity: f64, width: f64, height: f64) -> Self {
		let mut p = Self {
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
			radius: 0.0,
		};
		p.reset(rng, max_velocity, width, height, Spawn::Scattered);
		p
	}

	/// Re-roll position, velocity and radius in place.
	fn reset(
		&mut self,
		rng: &mut SmallRng,
		max_velocity: f64,
		width: f64,
		height: f64,
		spawn: Spawn,
	) {
		self.x = match spawn {
			Spawn::Scattered => rng.random::<f64>() * width,
			Spawn::Edge if rng.random_bool(0.5) => 0.0,
			Spawn::Edge => width,
		};
		self.y = rng.random::<f64>() * height;
		let speed = max_velocity * (0.4 + rng.random::<f64>());
		let direction = rng.random::<f64>() * TAU;
		self.vx = direction.cos() * speed;
		self.vy = direction.sin() * speed;
		self.radius = 1.0 + rng.random::<f64>() * 1.4;
	}

	fn advance(&mut self, delta: f64) {
		self.x += self.vx * delta;
		self.y += self.vy * delta;
	}

	/// True once the particle sits more than `margin` beyond any viewport edge.
	pub fn is_outside(&self, width: f64, height: f64, margin: f64) -> bool {
		self.x < -margin || self.x > width + margin || self.y < -margin || self.y > height + margin
	}

	/// Velocity magnitude in units per tick.
	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}
}

/// Whether the host should schedule another tick after this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextFrame {
	/// Still running; schedule the successor frame.
	Request,
	/// Paused; let the frame chain end here.
	Skip,
}

/// Owns the particle collection and advances it once per host frame.
///
/// The field never schedules itself: `tick` reports whether a successor
/// frame is wanted and the host decides whether to request one. Pausing
/// simply stops that request.
pub struct ParticleField {
	config: FieldConfig,
	particles: Vec<Particle>,
	width: f64,
	height: f64,
	last_timestamp: f64,
	running: bool,
	rng: SmallRng,
}

impl ParticleField {
	/// Build a field for the given viewport. `now` is the timestamp baseline
	/// for the first tick.
	pub fn new(config: FieldConfig, width: f64, height: f64, now: f64, seed: u64) -> Self {
		let mut field = Self {
			config,
			particles: Vec::new(),
			width: width.max(0.0),
			height: height.max(0.0),
			last_timestamp: now,
			running: true,
			rng: SmallRng::seed_from_u64(seed),
		};
		field.populate();
		field
	}

	/// Particle count allowed for a viewport: the configured maximum, capped
	/// by viewport area.
	pub fn target_count(config: &FieldConfig, width: f64, height: f64) -> usize {
		let by_area = (width.max(0.0) * height.max(0.0)) / config.area_per_particle;
		if !by_area.is_finite() {
			return 0;
		}
		(config.particle_count as f64).min(by_area).floor() as usize
	}

	fn populate(&mut self) {
		let count = Self::target_count(&self.config, self.width, self.height);
		let (max_velocity, width, height) = (self.config.max_velocity, self.width, self.height);
		let rng = &mut self.rng;
		self.particles = (0..count)
			.map(|_| Particle::spawn(rng, max_velocity, width, height))
			.collect();
	}

	/// Adopt new viewport dimensions and rebuild every particle.
	pub fn resize<S: Surface>(&mut self, width: f64, height: f64, surface: &mut S) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		surface.set_size(self.width, self.height);
		self.populate();
		debug!(
			"particle field resized to {}x{}, {} particles",
			self.width,
			self.height,
			self.particles.len()
		);
	}

	/// Advance physics to `timestamp` without drawing. Returns the applied delta.
	pub fn step(&mut self, timestamp: f64) -> f64 {
		let delta = ((timestamp - self.last_timestamp) * self.config.time_scale).max(0.0);
		self.last_timestamp = timestamp;

		let (width, height) = (self.width, self.height);
		let (margin, max_velocity) = (self.config.edge_margin, self.config.max_velocity);
		for p in &mut self.particles {
			p.advance(delta);
			if p.is_outside(width, height, margin) {
				p.reset(&mut self.rng, max_velocity, width, height, Spawn::Edge);
			}
		}
		delta
	}

	/// One host frame: move, then redraw particles and their connections.
	pub fn tick<S: Surface>(&mut self, timestamp: f64, surface: &mut S) -> NextFrame {
		if !self.running {
			return NextFrame::Skip;
		}
		self.step(timestamp);
		render::render(&self.particles, self.width, self.height, &self.config, surface);
		NextFrame::Request
	}

	/// Stop asking for frames. State is left untouched.
	pub fn pause(&mut self) {
		if self.running {
			debug!("particle field paused");
		}
		self.running = false;
	}

	/// Rebaseline the clock to `now` and resume. Returns true when the field
	/// was paused, meaning the host must start a new frame chain.
	pub fn resume(&mut self, now: f64) -> bool {
		self.last_timestamp = now;
		if self.running {
			return false;
		}
		self.running = true;
		debug!("particle field resumed at {now}");
		true
	}

	/// Live particles in draw order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}
}

#[cfg(test)]
mod tests {
	use super::super::surface::recording::{DrawOp, RecordingSurface};
	use super::*;

	fn field(width: f64, height: f64) -> ParticleField {
		ParticleField::new(FieldConfig::default(), width, height, 0.0, 7)
	}

	#[test]
	fn density_cap_floors_small_viewports_to_zero() {
		let config = FieldConfig::default();
		assert_eq!(ParticleField::target_count(&config, 100.0, 100.0), 0);
		assert_eq!(ParticleField::target_count(&config, 1920.0, 1080.0), 80);
		assert_eq!(ParticleField::target_count(&config, 600.0, 500.0), 20);
	}

	#[test]
	fn zero_area_viewport_ticks_without_particles() {
		let mut f = field(0.0, 0.0);
		let mut surface = RecordingSurface::default();
		assert!(f.particles().is_empty());
		assert_eq!(f.tick(16.0, &mut surface), NextFrame::Request);
		assert_eq!(surface.circles(), 0);
		assert!(surface.lines().is_empty());
	}

	#[test]
	fn spawned_particles_respect_velocity_and_radius_bounds() {
		let f = field(1920.0, 1080.0);
		let max_velocity = FieldConfig::default().max_velocity;
		for p in f.particles() {
			assert!(p.speed() >= 0.4 * max_velocity - 1e-9);
			assert!(p.speed() <= 1.4 * max_velocity + 1e-9);
			assert!((1.0..=2.4).contains(&p.radius));
			assert!((0.0..=1920.0).contains(&p.x));
			assert!((0.0..=1080.0).contains(&p.y));
		}
	}

	#[test]
	fn particle_past_margin_is_recycled_to_an_edge() {
		let mut f = field(1920.0, 1080.0);
		f.particles.truncate(1);
		f.particles[0] = Particle {
			x: 1920.0 + 51.0,
			y: 500.0,
			vx: 0.0,
			vy: 0.0,
			radius: 1.0,
		};
		f.step(16.0);
		let p = &f.particles[0];
		assert!(p.x == 0.0 || p.x == 1920.0);
		assert!(p.speed() > 0.0);
	}

	#[test]
	fn particle_past_margin_is_recycled_on_every_side() {
		let (width, height) = (1920.0, 1080.0);
		let outside = [(-51.0, 500.0), (900.0, -51.0), (900.0, height + 51.0)];
		for (x, y) in outside {
			let mut f = field(width, height);
			f.particles.truncate(1);
			f.particles[0] = Particle {
				x,
				y,
				vx: 0.0,
				vy: 0.0,
				radius: 1.0,
			};
			f.step(16.0);
			let p = &f.particles[0];
			assert!(p.x == 0.0 || p.x == width, "x={x} y={y} not recycled");
			assert!((0.0..=height).contains(&p.y));
		}
	}

	#[test]
	fn particle_just_inside_margin_is_kept_on_every_side() {
		let (width, height) = (1920.0, 1080.0);
		let inside = [(-49.0, 500.0), (900.0, -49.0), (900.0, height + 49.0)];
		for (x, y) in inside {
			let mut f = field(width, height);
			f.particles.truncate(1);
			f.particles[0] = Particle {
				x,
				y,
				vx: 0.0,
				vy: 0.0,
				radius: 1.0,
			};
			f.step(16.0);
			assert_eq!((f.particles[0].x, f.particles[0].y), (x, y));
		}
	}

	#[test]
	fn particle_inside_margin_only_translates() {
		let mut f = field(1920.0, 1080.0);
		f.particles.truncate(1);
		f.particles[0] = Particle {
			x: 1920.0 + 49.0,
			y: 500.0,
			vx: -0.1,
			vy: 0.2,
			radius: 1.5,
		};
		let delta = f.step(1000.0);
		assert!((delta - 60.0).abs() < 1e-9);
		let p = &f.particles[0];
		assert!((p.x - (1969.0 - 6.0)).abs() < 1e-9);
		assert!((p.y - 512.0).abs() < 1e-9);
		assert_eq!(p.radius, 1.5);
	}

	#[test]
	fn resize_rebuilds_inside_new_bounds() {
		let mut f = field(1920.0, 1080.0);
		let before = f.particles().to_vec();
		let mut surface = RecordingSurface::default();
		f.resize(800.0, 600.0, &mut surface);

		assert_eq!(surface.ops, vec![DrawOp::Resize(800.0, 600.0)]);
		assert_eq!(f.particles().len(), 32);
		for p in f.particles() {
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
		}
		assert!(f.particles().iter().all(|p| !before.contains(p)));
	}

	#[test]
	fn paused_field_skips_frames_and_keeps_state() {
		let mut f = field(1920.0, 1080.0);
		let mut surface = RecordingSurface::default();
		f.pause();
		let before = f.particles().to_vec();
		assert_eq!(f.tick(5000.0, &mut surface), NextFrame::Skip);
		assert!(surface.ops.is_empty());
		assert_eq!(f.particles(), before.as_slice());
	}

	#[test]
	fn resume_rebaselines_so_hidden_time_is_not_applied() {
		let mut f = field(1920.0, 1080.0);
		let mut surface = RecordingSurface::default();
		f.tick(1000.0, &mut surface);
		f.pause();

		// Ten seconds hidden.
		assert!(f.resume(11_000.0));
		let delta = f.step(11_016.0);
		assert!((delta - 16.0 * 0.06).abs() < 1e-9);
	}

	#[test]
	fn resume_while_running_does_not_start_a_second_chain() {
		let mut f = field(1920.0, 1080.0);
		assert!(!f.resume(100.0));
		f.pause();
		assert!(f.resume(200.0));
		assert!(!f.resume(300.0));
	}

	#[test]
	fn backwards_timestamp_yields_zero_delta() {
		let mut f = field(1920.0, 1080.0);
		f.step(500.0);
		assert_eq!(f.step(400.0), 0.0);
	}
}
