//! Autoplay timer arbitration.
//!
//! Autoplay runs only while the pointer is outside the carousel and the page
//! is visible. Every input event re-evaluates that rule; starting a running
//! timer or stopping a stopped one does nothing, so at most one interval is
//! ever live.

use log::{debug, warn};
use wasm_bindgen::prelude::*;

/// Something that can run a repeating timer.
pub trait IntervalHost {
	/// Identifies a live timer for cancellation.
	type Handle;

	/// Start a repeating timer. `None` when the host refused.
	fn set_interval(&mut self, period_ms: u32) -> Option<Self::Handle>;
	/// Cancel a timer previously returned by `set_interval`.
	fn clear_interval(&mut self, handle: Self::Handle);
}

/// Owns the autoplay timer and the inputs that gate it.
pub struct Autoplay<H: IntervalHost> {
	host: H,
	period_ms: u32,
	handle: Option<H::Handle>,
	pointer_inside: bool,
	page_hidden: bool,
}

impl<H: IntervalHost> Autoplay<H> {
	/// Create a stopped autoplay. Call [`Autoplay::sync`] to start it.
	pub fn new(host: H, period_ms: u32) -> Self {
		Self {
			host,
			period_ms,
			handle: None,
			pointer_inside: false,
			page_hidden: false,
		}
	}

	/// Start the timer unless one is already live.
	pub fn start(&mut self) {
		if self.handle.is_some() {
			return;
		}
		self.handle = self.host.set_interval(self.period_ms);
		if self.handle.is_none() {
			warn!("constellation: autoplay timer could not be started");
		}
	}

	/// Cancel the live timer, if any.
	pub fn stop(&mut self) {
		if let Some(handle) = self.handle.take() {
			self.host.clear_interval(handle);
		}
	}

	/// Whether a timer is currently live.
	pub fn is_running(&self) -> bool {
		self.handle.is_some()
	}

	/// Start or stop to match the current pointer and visibility inputs.
	pub fn sync(&mut self) {
		if self.pointer_inside || self.page_hidden {
			self.stop();
		} else {
			self.start();
		}
	}

	/// Pointer moved over the carousel.
	pub fn pointer_entered(&mut self) {
		self.pointer_inside = true;
		self.sync();
	}

	/// Pointer left the carousel.
	pub fn pointer_left(&mut self) {
		self.pointer_inside = false;
		self.sync();
	}

	/// Page was hidden or shown.
	pub fn visibility_changed(&mut self, hidden: bool) {
		debug!("carousel autoplay sees page hidden={hidden}");
		self.page_hidden = hidden;
		self.sync();
	}

	#[cfg(test)]
	fn host(&self) -> &H {
		&self.host
	}
}

/// Browser `setInterval` host firing a fixed callback.
pub struct WindowIntervals {
	callback: Closure<dyn FnMut()>,
}

/// `setInterval` takes a signed 32-bit timeout; larger periods are refused
/// rather than wrapped negative.
fn timer_timeout(period_ms: u32) -> Option<i32> {
	i32::try_from(period_ms).ok().filter(|&ms| ms > 0)
}

impl WindowIntervals {
	/// Host whose timers all invoke `on_fire`.
	pub fn new(on_fire: impl FnMut() + 'static) -> Self {
		Self {
			callback: Closure::new(on_fire),
		}
	}
}

impl IntervalHost for WindowIntervals {
	type Handle = i32;

	fn set_interval(&mut self, period_ms: u32) -> Option<i32> {
		let timeout = timer_timeout(period_ms)?;
		let window = web_sys::window()?;
		window
			.set_interval_with_callback_and_timeout_and_arguments_0(
				self.callback.as_ref().unchecked_ref(),
				timeout,
			)
			.ok()
	}

	fn clear_interval(&mut self, handle: i32) {
		if let Some(window) = web_sys::window() {
			window.clear_interval_with_handle(handle);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::carousel::CarouselState;

	/// Virtual-clock timer host.
	#[derive(Default)]
	struct FakeIntervals {
		next_id: u32,
		active: Vec<(u32, u32)>,
		started: usize,
	}

	impl FakeIntervals {
		/// Total callbacks fired across live timers over `elapsed_ms`.
		fn fires_over(&self, elapsed_ms: u32) -> u32 {
			self.active.iter().map(|(_, period)| elapsed_ms / period).sum()
		}
	}

	impl IntervalHost for FakeIntervals {
		type Handle = u32;

		fn set_interval(&mut self, period_ms: u32) -> Option<u32> {
			self.next_id += 1;
			self.started += 1;
			self.active.push((self.next_id, period_ms));
			Some(self.next_id)
		}

		fn clear_interval(&mut self, handle: u32) {
			self.active.retain(|(id, _)| *id != handle);
		}
	}

	fn autoplay() -> Autoplay<FakeIntervals> {
		Autoplay::new(FakeIntervals::default(), 2000)
	}

	#[test]
	fn double_start_keeps_one_timer() {
		let mut a = autoplay();
		a.start();
		a.start();
		assert_eq!(a.host().active.len(), 1);

		let mut carousel = CarouselState::new(5, 50.0).unwrap();
		for _ in 0..a.host().fires_over(2000) {
			carousel.next();
		}
		assert_eq!(carousel.index(), 1);
	}

	#[test]
	fn timeout_outside_signed_range_is_refused() {
		assert_eq!(timer_timeout(2000), Some(2000));
		assert_eq!(timer_timeout(i32::MAX as u32), Some(i32::MAX));
		assert_eq!(timer_timeout(3_000_000_000), None);
		assert_eq!(timer_timeout(0), None);
	}

	#[test]
	fn double_stop_is_harmless() {
		let mut a = autoplay();
		a.start();
		a.stop();
		a.stop();
		assert!(!a.is_running());
		assert!(a.host().active.is_empty());
	}

	#[test]
	fn hover_pauses_and_leave_resumes() {
		let mut a = autoplay();
		a.sync();
		assert!(a.is_running());
		a.pointer_entered();
		assert!(!a.is_running());
		a.pointer_left();
		assert!(a.is_running());
		assert_eq!(a.host().active.len(), 1);
	}

	#[test]
	fn rapid_enter_leave_never_stacks_timers() {
		let mut a = autoplay();
		a.sync();
		for _ in 0..10 {
			a.pointer_left();
			a.pointer_entered();
			a.pointer_left();
		}
		assert_eq!(a.host().active.len(), 1);
		assert_eq!(a.host().fires_over(6000), 3);
	}

	#[test]
	fn hidden_page_stops_and_visible_starts_fresh_timer() {
		let mut a = autoplay();
		a.sync();
		a.visibility_changed(true);
		assert!(!a.is_running());
		a.visibility_changed(false);
		assert!(a.is_running());
		assert_eq!(a.host().started, 2);
		assert_eq!(a.host().active.len(), 1);
	}

	#[test]
	fn showing_page_under_pointer_stays_paused() {
		let mut a = autoplay();
		a.sync();
		a.pointer_entered();
		a.visibility_changed(true);
		a.visibility_changed(false);
		assert!(!a.is_running());
		a.pointer_left();
		assert!(a.is_running());
	}
}
