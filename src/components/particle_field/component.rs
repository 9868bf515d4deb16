//! Leptos component hosting the particle field on a fullscreen canvas.
//!
//! The animation loop runs via `requestAnimationFrame`: each frame ticks the
//! field and requests its successor only when the field asks for one. Window
//! resizes rebuild the field; hiding the page cancels the pending frame and
//! showing it again rebaselines the clock before restarting the chain.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::FieldConfig;
use super::particles::{NextFrame, ParticleField};
use super::surface::{Surface, canvas_surface};
use crate::error::SetupError;

/// Bundles the simulation with the canvas context it draws on.
struct FieldContext {
	field: ParticleField,
	surface: CanvasRenderingContext2d,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type EventCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Current viewport size in CSS pixels.
fn viewport_size(window: &Window) -> Result<(f64, f64), SetupError> {
	let width = window.inner_width().ok().and_then(|v| v.as_f64());
	let height = window.inner_height().ok().and_then(|v| v.as_f64());
	width
		.zip(height)
		.ok_or(SetupError::MissingCapability("window.innerWidth/innerHeight"))
}

fn now(window: &Window) -> f64 {
	window
		.performance()
		.map(|p| p.now())
		.unwrap_or_else(js_sys::Date::now)
}

fn request_frame(animate: &FrameCallback, frame_id: &Cell<Option<i32>>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *animate.borrow() {
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(id) => frame_id.set(Some(id)),
			Err(e) => warn!("constellation: requestAnimationFrame failed: {:?}", e),
		}
	}
}

/// Renders the drifting particle network behind the page content.
///
/// The canvas fills the viewport and follows window resizes. If the browser
/// cannot provide a 2D context the canvas stays blank and nothing is scheduled.
#[component]
pub fn ParticleBackdrop(#[prop(default = FieldConfig::default())] config: FieldConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<FieldContext>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let resize_cb: EventCallback = Rc::new(RefCell::new(None));
	let visibility_cb: EventCallback = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		if let Err(e) = start(
			&canvas,
			config.clone(),
			&context,
			&animate,
			&frame_id,
			&resize_cb,
			&visibility_cb,
		) {
			warn!("constellation: particle backdrop disabled: {}", e);
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="background-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: -1; pointer-events: none;"
		/>
	}
}

fn start(
	canvas: &HtmlCanvasElement,
	config: FieldConfig,
	context: &Rc<RefCell<Option<FieldContext>>>,
	animate: &FrameCallback,
	frame_id: &Rc<Cell<Option<i32>>>,
	resize_cb: &EventCallback,
	visibility_cb: &EventCallback,
) -> Result<(), SetupError> {
	let window = web_sys::window().ok_or(SetupError::MissingCapability("window"))?;
	let document = window
		.document()
		.ok_or(SetupError::MissingCapability("document"))?;
	let mut surface = canvas_surface(canvas)?;
	let (w, h) = viewport_size(&window)?;
	surface.set_size(w, h);

	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
	let field = ParticleField::new(config, w, h, now(&window), seed);
	info!(
		"constellation: particle field started with {} particles",
		field.particles().len()
	);
	*context.borrow_mut() = Some(FieldContext { field, surface });

	let context_resize = context.clone();
	*resize_cb.borrow_mut() = Some(Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		let Ok((nw, nh)) = viewport_size(&win) else {
			return;
		};
		if let Some(ref mut c) = *context_resize.borrow_mut() {
			c.field.resize(nw, nh, &mut c.surface);
		}
	}));
	if let Some(ref cb) = *resize_cb.borrow() {
		window
			.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
			.map_err(|_| SetupError::MissingCapability("resize events"))?;
	}

	let (context_anim, animate_inner, frame_inner) =
		(context.clone(), animate.clone(), frame_id.clone());
	*animate.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
		let next = match *context_anim.borrow_mut() {
			Some(ref mut c) => c.field.tick(timestamp, &mut c.surface),
			None => NextFrame::Skip,
		};
		if next == NextFrame::Request {
			request_frame(&animate_inner, &frame_inner);
		} else {
			frame_inner.set(None);
		}
	}));

	let (context_vis, animate_vis, frame_vis, document_vis) = (
		context.clone(),
		animate.clone(),
		frame_id.clone(),
		document.clone(),
	);
	*visibility_cb.borrow_mut() = Some(Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		let hidden = document_vis.hidden();
		let restart = match *context_vis.borrow_mut() {
			Some(ref mut c) if hidden => {
				c.field.pause();
				false
			}
			Some(ref mut c) => c.field.resume(now(&win)),
			None => false,
		};
		if hidden {
			if let Some(id) = frame_vis.take() {
				let _ = win.cancel_animation_frame(id);
			}
		} else if restart {
			request_frame(&animate_vis, &frame_vis);
		}
	}));
	if let Some(ref cb) = *visibility_cb.borrow() {
		document
			.add_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref())
			.map_err(|_| SetupError::MissingCapability("visibilitychange events"))?;
	}

	request_frame(animate, frame_id);
	Ok(())
}
