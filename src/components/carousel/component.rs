//! Leptos component rendering the slide carousel.
//!
//! Index state lives in a signal so the track offset and indicator dots
//! re-render on change. The autoplay timer is a `setInterval` owned by an
//! [`Autoplay`] shared between the pointer, visibility and click handlers.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent};

use super::autoplay::{Autoplay, WindowIntervals};
use super::state::{CarouselCommand, CarouselConfig, CarouselState, command_for_key};
use super::types::Slide;

/// Forward page visibility changes to autoplay for the rest of the session.
fn watch_visibility(autoplay: Rc<RefCell<Autoplay<WindowIntervals>>>) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		warn!("constellation: no document, autoplay ignores page visibility");
		return;
	};
	autoplay.borrow_mut().visibility_changed(document.hidden());
	let document_cb = document.clone();
	let callback = Closure::<dyn FnMut()>::new(move || {
		autoplay.borrow_mut().visibility_changed(document_cb.hidden());
	});
	if document
		.add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref())
		.is_err()
	{
		warn!("constellation: could not subscribe to visibilitychange");
	}
	// Lives as long as the page.
	callback.forget();
}

/// Horizontally paged view over `slides` with arrows, dots, keyboard
/// navigation and autoplay.
///
/// Renders nothing when `slides` is empty.
#[component]
pub fn Carousel(
	slides: Vec<Slide>,
	#[prop(default = CarouselConfig::default())] config: CarouselConfig,
) -> impl IntoView {
	let state = match CarouselState::new(slides.len(), config.step_percent) {
		Ok(state) => RwSignal::new(state),
		Err(e) => {
			warn!("constellation: carousel disabled: {}", e);
			return ().into_any();
		}
	};
	info!("constellation: carousel started with {} slides", slides.len());

	let intervals = WindowIntervals::new(move || {
		state.update(|s| s.next());
	});
	let autoplay = Rc::new(RefCell::new(Autoplay::new(
		intervals,
		config.autoplay_period_ms,
	)));
	autoplay.borrow_mut().sync();
	watch_visibility(autoplay.clone());

	let autoplay_enter = autoplay.clone();
	let on_mouseenter = move |_: MouseEvent| autoplay_enter.borrow_mut().pointer_entered();
	let autoplay_leave = autoplay.clone();
	let on_mouseleave = move |_: MouseEvent| autoplay_leave.borrow_mut().pointer_left();

	let on_keydown = move |ev: KeyboardEvent| {
		if let Some(command) = command_for_key(&ev.key()) {
			ev.prevent_default();
			state.update(|s| s.apply(command));
		}
	};

	let track_style = move || {
		format!(
			"transform: translateX(-{}%);",
			state.with(|s| s.offset_percent())
		)
	};

	let dots = (0..slides.len())
		.map(|k| {
			view! {
				<button
					class="carousel-dot"
					class:active=move || state.with(|s| s.is_active_dot(k))
					aria-label=format!("Go to slide {}", k + 1)
					on:click=move |_| state.update(|s| s.apply(CarouselCommand::GoTo(k)))
				/>
			}
		})
		.collect_view();

	let items = slides
		.into_iter()
		.map(|slide| {
			view! {
				<article class="carousel-slide">
					{slide.image.map(|src| view! { <img src=src alt="" loading="lazy" /> })}
					<h3>{slide.title}</h3>
					<p>{slide.body}</p>
				</article>
			}
		})
		.collect_view();

	view! {
		<section
			class="carousel"
			tabindex="0"
			on:mouseenter=on_mouseenter
			on:mouseleave=on_mouseleave
			on:keydown=on_keydown
		>
			<button
				class="carousel-arrow prev"
				aria-label="Previous slide"
				on:click=move |_| state.update(|s| s.apply(CarouselCommand::Prev))
			>
				"‹"
			</button>
			<div class="carousel-viewport">
				<div class="carousel-track" style=track_style>
					{items}
				</div>
			</div>
			<button
				class="carousel-arrow next"
				aria-label="Next slide"
				on:click=move |_| state.update(|s| s.apply(CarouselCommand::Next))
			>
				"›"
			</button>
			<div class="carousel-dots">{dots}</div>
		</section>
	}
	.into_any()
}
