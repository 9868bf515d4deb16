//! Page chrome: reveal-on-scroll and in-page anchor scrolling.
//!
//! Elements marked `.reveal` gain `in-view` the first time they scroll into
//! view. Without `IntersectionObserver` every such element is revealed
//! immediately so the page never stays hidden.

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
	ScrollBehavior, ScrollToOptions,
};

use crate::error::SetupError;

const REVEAL_SELECTOR: &str = ".reveal";
const IN_VIEW_CLASS: &str = "in-view";
const REVEAL_THRESHOLD: f64 = 0.18;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -5% 0px";

/// Height of the fixed header that anchored sections scroll clear of.
pub const HEADER_OFFSET: f64 = 72.0;

/// How `.reveal` elements get their `in-view` class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStrategy {
	/// Observe each element and reveal it on first intersection.
	Observe,
	/// Reveal everything up front.
	RevealAll,
}

/// Observation needs both the browser API and something to observe.
pub fn reveal_strategy(observer_available: bool, element_count: usize) -> RevealStrategy {
	if observer_available && element_count > 0 {
		RevealStrategy::Observe
	} else {
		RevealStrategy::RevealAll
	}
}

fn mark_in_view(element: &Element) {
	let _ = element.class_list().add_1(IN_VIEW_CLASS);
}

/// Start revealing `.reveal` elements as they scroll into view.
pub fn watch_reveals() -> Result<(), SetupError> {
	let window = web_sys::window().ok_or(SetupError::MissingCapability("window"))?;
	let document = window
		.document()
		.ok_or(SetupError::MissingCapability("document"))?;
	let nodes = document
		.query_selector_all(REVEAL_SELECTOR)
		.map_err(|_| SetupError::MissingCapability("querySelectorAll"))?;
	let elements: Vec<Element> = (0..nodes.length())
		.filter_map(|i| nodes.get(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect();

	let observer_available =
		js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
	if reveal_strategy(observer_available, elements.len()) == RevealStrategy::Observe {
		match observe(&elements) {
			Ok(()) => return Ok(()),
			Err(e) => warn!("constellation: revealing all sections: {}", e),
		}
	}
	elements.iter().for_each(mark_in_view);
	Ok(())
}

fn observe(elements: &[Element]) -> Result<(), SetupError> {
	let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
		move |entries: js_sys::Array, observer: IntersectionObserver| {
			for entry in entries.iter() {
				let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
					continue;
				};
				if entry.is_intersecting() {
					let target = entry.target();
					mark_in_view(&target);
					observer.unobserve(&target);
				}
			}
		},
	);

	let options = IntersectionObserverInit::new();
	options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
	options.set_root_margin(REVEAL_ROOT_MARGIN);
	let observer =
		IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
			.map_err(|_| SetupError::MissingCapability("IntersectionObserver"))?;
	for element in elements {
		observer.observe(element);
	}
	// Lives as long as the page.
	callback.forget();
	Ok(())
}

/// The fragment selector of an in-page link, e.g. `#work`.
pub fn in_page_anchor(href: &str) -> Option<&str> {
	(href.starts_with('#') && href.len() > 1).then_some(href)
}

/// Document scroll position that puts a target at `target_top` (relative to
/// the viewport) just below the fixed header.
pub fn anchor_scroll_top(target_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
	target_top + scroll_y - header_offset
}

fn smooth_scroll_to(selector: &str) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let Some(target) = window
		.document()
		.and_then(|d| d.query_selector(selector).ok().flatten())
	else {
		return;
	};
	let rect = target.get_bounding_client_rect();
	let top = anchor_scroll_top(rect.top(), window.scroll_y().unwrap_or(0.0), HEADER_OFFSET);

	let options = ScrollToOptions::new();
	options.set_top(top);
	options.set_behavior(ScrollBehavior::Smooth);
	window.scroll_to_with_scroll_to_options(&options);
}

/// Smooth-scroll clicks on in-page nav links instead of jumping.
pub fn handle_nav_click(ev: &MouseEvent) {
	let href = ev
		.target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.and_then(|el| el.closest("a").ok().flatten())
		.and_then(|a| a.get_attribute("href"));
	if let Some(anchor) = href.as_deref().and_then(in_page_anchor) {
		ev.prevent_default();
		smooth_scroll_to(anchor);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_observer_reveals_everything() {
		assert_eq!(reveal_strategy(false, 3), RevealStrategy::RevealAll);
		assert_eq!(reveal_strategy(true, 0), RevealStrategy::RevealAll);
		assert_eq!(reveal_strategy(true, 3), RevealStrategy::Observe);
	}

	#[test]
	fn only_fragment_links_are_intercepted() {
		assert_eq!(in_page_anchor("#work"), Some("#work"));
		assert_eq!(in_page_anchor("#"), None);
		assert_eq!(in_page_anchor("/about"), None);
		assert_eq!(in_page_anchor("https://example.com/#x"), None);
	}

	#[test]
	fn scroll_target_clears_the_header() {
		assert_eq!(anchor_scroll_top(300.0, 1000.0, HEADER_OFFSET), 1228.0);
		assert_eq!(anchor_scroll_top(-200.0, 500.0, HEADER_OFFSET), 228.0);
	}
}
