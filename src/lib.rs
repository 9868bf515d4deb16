//! constellation: animated landing-page chrome.
//!
//! This crate provides a WASM-based particle network backdrop and a slide
//! carousel, plus the small page shell that hosts them.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, MouseEvent, Window};

use crate::components::chrome::{handle_nav_click, watch_reveals};

pub mod components;
pub mod config;
pub mod error;

pub use components::carousel::{Carousel, Slide};
pub use components::particle_field::ParticleBackdrop;
pub use config::SiteConfig;
pub use error::SetupError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("constellation: logging initialized");
}

/// Text of a `<script>` data island with the given id.
fn load_data_island(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load configuration from a script element with id="site-config".
/// Falls back to defaults when absent or invalid.
fn load_site_config() -> SiteConfig {
	let Some(json_text) = load_data_island("site-config") else {
		return SiteConfig::default();
	};
	match SiteConfig::from_json(&json_text) {
		Ok(config) => config,
		Err(e) => {
			warn!("constellation: ignoring site config: {}", e);
			SiteConfig::default()
		}
	}
}

/// Load slides from a script element with id="carousel-data".
/// Expected format: JSON array of { title, body, image? }
fn load_slides() -> Vec<Slide> {
	let Some(json_text) = load_data_island("carousel-data") else {
		return Vec::new();
	};
	match serde_json::from_str::<Vec<Slide>>(&json_text) {
		Ok(slides) => {
			info!("constellation: loaded {} slides", slides.len());
			slides
		}
		Err(e) => {
			warn!("constellation: failed to parse carousel data: {}", e);
			Vec::new()
		}
	}
}

fn current_year() -> u32 {
	js_sys::Date::new_0().get_full_year()
}

/// Main application component.
/// Reads configuration and slides from the DOM and lays out the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_site_config();
	let slides = load_slides();
	let nav_open = RwSignal::new(false);

	Effect::new(move |_| {
		if let Err(e) = watch_reveals() {
			warn!("constellation: reveal-on-scroll disabled: {}", e);
		}
	});

	let on_nav_click = move |ev: MouseEvent| {
		handle_nav_click(&ev);
		nav_open.set(false);
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Constellation" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackdrop config=config.backdrop />

		<header class="site-header">
			<nav class="site-nav" class:open=move || nav_open.get()>
				<button
					class="nav-toggle"
					aria-label="Toggle navigation"
					on:click=move |_| nav_open.update(|open| *open = !*open)
				>
					"☰"
				</button>
				<ul class="nav-list" on:click=on_nav_click>
					<li><a href="#work">"Work"</a></li>
					<li><a href="#contact">"Contact"</a></li>
				</ul>
			</nav>
		</header>

		<main>
			<section id="work" class="reveal">
				<Carousel slides=slides config=config.carousel />
			</section>
			<section id="contact" class="reveal" />
		</main>

		<footer class="site-footer">
			<p>"© " {current_year()}</p>
		</footer>
	}
}
