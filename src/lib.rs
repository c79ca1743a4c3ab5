//! southern-sky: scroll-driven starfield that morphs into the map of
//! New Zealand.
//!
//! This crate provides a WASM-based background component: a full-viewport
//! canvas of twinkling stars that, as the visitor scrolls toward the
//! experience section, gathers first onto the country's outline and then
//! fills its interior.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};
use web_sys::ScrollRestoration;

pub mod components;

pub use components::starfield::{CandidatePoint, StarAsset, StarfieldCanvas, SvgSize, Theme};

// Pulls in the "js" feature so rand can seed itself in the browser.
#[cfg(target_arch = "wasm32")]
use getrandom as _;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("southern-sky: logging initialized");
}

/// Main application component.
/// Renders the portfolio page shell with the starfield fixed behind it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	Effect::new(move |_| {
		let Some(window) = web_sys::window() else {
			return;
		};
		// Reloads start at the top; the browser would otherwise restore
		// the old offset and the morph would begin mid-flight.
		if let Ok(history) = window.history() {
			let _ = history.set_scroll_restoration(ScrollRestoration::Manual);
		}
		window.scroll_to_with_x_and_y(0.0, 0.0);
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Southern Sky" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarfieldCanvas />
		<main class="content">
			<section id="about" class="panel" style="min-height: 100vh">
				<h1>"Kia ora."</h1>
				<p class="subtitle">"Keep scrolling; the sky knows where home is."</p>
			</section>
			<section id="projects" class="panel" style="min-height: 100vh">
				<h2>"Projects"</h2>
			</section>
			<section id="experience" class="panel" style="min-height: 100vh">
				<h2>"Experience"</h2>
			</section>
			<section id="blog" class="panel" style="min-height: 100vh">
				<h2>"Writing"</h2>
			</section>
			<section id="contact" class="panel" style="min-height: 60vh">
				<h2>"Contact"</h2>
			</section>
		</main>
	}
}
