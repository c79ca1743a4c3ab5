//! Browser-side tests for the pieces that need a real DOM.

#![allow(unused_crate_dependencies)]
#![cfg(target_arch = "wasm32")]

use leptos::prelude::*;
use southern_sky::StarfieldCanvas;
use southern_sky::components::starfield::theme::Color;
use southern_sky::components::starfield::{DeviceTier, SpriteCache};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn test_document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn sprite_cache_reuses_one_canvas_per_quantized_key() {
	let document = test_document();
	let mut cache = SpriteCache::new();
	let color = Color::rgb(226, 232, 245);

	let first = cache
		.get_or_create(&document, 1.23, 0.5, color, 1.0)
		.expect("sprite should render")
		.canvas
		.clone();
	let second = cache
		.get_or_create(&document, 1.18, 0.52, color, 1.0)
		.expect("sprite should render")
		.canvas
		.clone();

	assert_eq!(cache.len(), 1);
	assert!(js_sys::Object::is(first.as_ref(), second.as_ref()));
}

#[wasm_bindgen_test]
fn sprite_cache_stays_small_for_a_full_field() {
	let document = test_document();
	let mut cache = SpriteCache::new();
	let color = Color::rgb(226, 232, 245);

	// The builder's radius range is 0.4..2.0 and glow 0.0..1.0; quantized
	// to tenths that is at most 17 x 11 keys.
	for size_deci in 4..=20 {
		for glow_deci in 0..=10 {
			let radius = size_deci as f64 / 10.0;
			let glow = glow_deci as f64 / 10.0;
			assert!(cache.get_or_create(&document, radius, glow, color, 1.0).is_some());
		}
	}
	assert_eq!(cache.len(), 17 * 11);

	cache.clear();
	assert!(cache.is_empty());
}

#[wasm_bindgen_test]
fn sprite_canvas_grows_with_glow() {
	let document = test_document();
	let mut cache = SpriteCache::new();
	let color = Color::rgb(226, 232, 245);

	let plain = cache
		.get_or_create(&document, 2.0, 0.0, color, 1.0)
		.expect("sprite should render")
		.canvas
		.clone();
	let glowing = cache
		.get_or_create(&document, 2.0, 1.0, color, 1.0)
		.expect("sprite should render")
		.canvas
		.clone();

	assert!(glowing.width() > plain.width());
}

#[wasm_bindgen_test]
fn device_tier_detection_yields_a_usable_preset() {
	let tier = DeviceTier::detect();
	assert!(tier.preset().total() > 0);
}

#[wasm_bindgen_test]
fn starfield_canvas_mounts_a_fixed_canvas() {
	mount_to_body(|| view! { <StarfieldCanvas /> });

	let canvas = test_document()
		.query_selector("canvas.starfield-canvas")
		.unwrap();
	assert!(canvas.is_some());
}
