//! Carousel index state machine.
//!
//! The only state is the current slide index. Every navigation funnels
//! through [`CarouselState::go_to`], which wraps the target into `0..len` in
//! both directions.

use log::debug;
use serde::Deserialize;

use crate::error::SetupError;

/// Carousel layout and timing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
	/// Track offset per slide, in percent of the viewport. 50 shows two
	/// slides at a time.
	pub step_percent: f64,
	/// Autoplay period in milliseconds.
	pub autoplay_period_ms: u32,
}

impl Default for CarouselConfig {
	fn default() -> Self {
		Self {
			step_percent: 50.0,
			autoplay_period_ms: 2000,
		}
	}
}

impl CarouselConfig {
	/// Rejects layouts and periods the browser cannot honor.
	pub fn validate(&self) -> Result<(), SetupError> {
		if !(self.step_percent > 0.0) || !self.step_percent.is_finite() {
			return Err(SetupError::InvalidConfig(format!(
				"step_percent must be positive, got {}",
				self.step_percent
			)));
		}
		if self.autoplay_period_ms == 0 || i32::try_from(self.autoplay_period_ms).is_err() {
			return Err(SetupError::InvalidConfig(format!(
				"autoplay_period_ms must be in 1..={}, got {}",
				i32::MAX,
				self.autoplay_period_ms
			)));
		}
		Ok(())
	}
}

/// A user or timer intent that moves the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselCommand {
	/// One slide back, wrapping to the last.
	Prev,
	/// One slide forward, wrapping to the first.
	Next,
	/// Straight to a slide position, as from an indicator dot.
	GoTo(usize),
}

/// Map a keyboard key to a command. Only the horizontal arrows navigate.
pub fn command_for_key(key: &str) -> Option<CarouselCommand> {
	match key {
		"ArrowLeft" => Some(CarouselCommand::Prev),
		"ArrowRight" => Some(CarouselCommand::Next),
		_ => None,
	}
}

/// Current position within a fixed, non-empty slide sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselState {
	index: usize,
	len: usize,
	step_percent: f64,
}

impl CarouselState {
	/// Create a carousel over `len` slides. At least one slide is required.
	pub fn new(len: usize, step_percent: f64) -> Result<Self, SetupError> {
		if len == 0 {
			return Err(SetupError::EmptyCarousel);
		}
		Ok(Self {
			index: 0,
			len,
			step_percent,
		})
	}

	/// Jump to `target`, wrapping into range. `-1` lands on the last slide.
	pub fn go_to(&mut self, target: i64) {
		self.index = target.rem_euclid(self.len as i64) as usize;
		debug!("carousel moved to slide {} of {}", self.index, self.len);
	}

	/// Advance one slide.
	pub fn next(&mut self) {
		self.go_to(self.index as i64 + 1);
	}

	/// Step back one slide.
	pub fn prev(&mut self) {
		self.go_to(self.index as i64 - 1);
	}

	/// Execute a navigation command.
	pub fn apply(&mut self, command: CarouselCommand) {
		match command {
			CarouselCommand::Prev => self.prev(),
			CarouselCommand::Next => self.next(),
			CarouselCommand::GoTo(k) => self.go_to(k as i64),
		}
	}

	/// Current slide position, always in `0..len`.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Horizontal track offset in percent.
	pub fn offset_percent(&self) -> f64 {
		self.index as f64 * self.step_percent
	}

	/// Whether indicator `dot` marks the current slide.
	pub fn is_active_dot(&self, dot: usize) -> bool {
		dot == self.index
	}

	/// Active flag for each indicator dot, in slide order.
	pub fn dots(&self) -> Vec<bool> {
		(0..self.len).map(|k| self.is_active_dot(k)).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn carousel(len: usize) -> CarouselState {
		CarouselState::new(len, 50.0).unwrap()
	}

	#[test]
	fn empty_carousel_is_refused() {
		assert!(matches!(
			CarouselState::new(0, 50.0),
			Err(SetupError::EmptyCarousel)
		));
	}

	#[test]
	fn next_and_prev_wrap_around_five_slides() {
		let mut c = carousel(5);
		assert_eq!(c.index(), 0);
		c.next();
		assert_eq!(c.index(), 1);
		for _ in 0..4 {
			c.next();
		}
		assert_eq!(c.index(), 0);
		c.prev();
		assert_eq!(c.index(), 4);
	}

	#[test]
	fn go_to_always_lands_in_range_and_is_periodic() {
		for len in 1..=7usize {
			for k in -30i64..30 {
				let mut a = carousel(len);
				let mut b = carousel(len);
				a.go_to(k);
				b.go_to(k + len as i64);
				assert!(a.index() < len);
				assert_eq!(a, b);
			}
		}
	}

	#[test]
	fn minus_one_from_start_is_last_slide() {
		let mut c = carousel(3);
		c.go_to(-1);
		assert_eq!(c.index(), 2);
	}

	#[test]
	fn single_slide_stays_put() {
		let mut c = carousel(1);
		c.next();
		c.prev();
		assert_eq!(c.index(), 0);
		assert_eq!(c.dots(), vec![true]);
	}

	#[test]
	fn offset_and_dots_follow_index() {
		let mut c = carousel(4);
		c.apply(CarouselCommand::GoTo(3));
		assert_eq!(c.offset_percent(), 150.0);
		assert_eq!(c.dots(), vec![false, false, false, true]);
		c.apply(CarouselCommand::Next);
		assert_eq!(c.offset_percent(), 0.0);
		assert!(c.is_active_dot(0));
	}

	#[test]
	fn arrow_keys_map_to_navigation() {
		assert_eq!(command_for_key("ArrowLeft"), Some(CarouselCommand::Prev));
		assert_eq!(command_for_key("ArrowRight"), Some(CarouselCommand::Next));
		assert_eq!(command_for_key("ArrowUp"), None);
		assert_eq!(command_for_key("Enter"), None);
	}

	#[test]
	fn zero_period_is_rejected() {
		let config = CarouselConfig {
			autoplay_period_ms: 0,
			..CarouselConfig::default()
		};
		assert!(config.validate().is_err());
		assert!(CarouselConfig::default().validate().is_ok());
	}

	#[test]
	fn period_beyond_timer_range_is_rejected() {
		let too_long = CarouselConfig {
			autoplay_period_ms: 3_000_000_000,
			..CarouselConfig::default()
		};
		assert!(matches!(
			too_long.validate(),
			Err(SetupError::InvalidConfig(_))
		));

		let longest = CarouselConfig {
			autoplay_period_ms: i32::MAX as u32,
			..CarouselConfig::default()
		};
		assert!(longest.validate().is_ok());
	}
}
