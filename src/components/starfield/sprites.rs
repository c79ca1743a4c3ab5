//! Pre-rendered star sprites.
//!
//! Drawing a radial gradient per star per frame is the slow path; instead
//! each distinct (radius, glow) pair is rendered once to a small offscreen
//! canvas and blitted with `drawImage`. Keys are quantized to one decimal,
//! which keeps the cache at a few dozen entries for a full field.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::theme::Color;

/// Cache key: radius and glow rounded to tenths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteKey {
	size_deci: u32,
	glow_deci: u32,
}

impl SpriteKey {
	/// Quantize a star's radius and glow to the nearest tenth.
	pub fn quantize(radius: f64, glow: f64) -> Self {
		Self {
			size_deci: (radius.max(0.0) * 10.0).round() as u32,
			glow_deci: (glow.max(0.0) * 10.0).round() as u32,
		}
	}

	fn radius(self) -> f64 {
		self.size_deci as f64 / 10.0
	}

	fn glow(self) -> f64 {
		self.glow_deci as f64 / 10.0
	}
}

/// An offscreen canvas holding one rendered star.
pub struct Sprite {
	pub canvas: HtmlCanvasElement,
	/// Half the canvas edge, the offset from star center to blit origin.
	pub half: f64,
}

/// Lazily-built sprite cache for one theme.
#[derive(Default)]
pub struct SpriteCache {
	entries: HashMap<SpriteKey, Sprite>,
}

impl SpriteCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Drop every cached canvas. Called on teardown and theme changes.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Fetch the sprite for a (radius, glow) pair, rendering it on first use.
	///
	/// Returns `None` when the offscreen canvas cannot be created; callers
	/// fall back to a plain arc fill.
	pub fn get_or_create(
		&mut self,
		document: &Document,
		radius: f64,
		glow: f64,
		color: Color,
		halo_factor: f64,
	) -> Option<&Sprite> {
		let key = SpriteKey::quantize(radius, glow);
		if !self.entries.contains_key(&key) {
			let sprite = render_sprite(document, key, color, halo_factor)?;
			self.entries.insert(key, sprite);
		}
		self.entries.get(&key)
	}
}

/// Halo radius in pixels for a star of the given quantized size and glow.
fn halo_radius(radius: f64, glow: f64, halo_factor: f64) -> f64 {
	radius * (2.0 + glow * 3.0) * halo_factor.max(0.1)
}

fn render_sprite(
	document: &Document,
	key: SpriteKey,
	color: Color,
	halo_factor: f64,
) -> Option<Sprite> {
	let radius = key.radius();
	let glow = key.glow();
	let halo = halo_radius(radius, glow, halo_factor);
	let edge = (halo * 2.0).ceil().max(2.0);

	let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
	canvas.set_width(edge as u32);
	canvas.set_height(edge as u32);
	let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

	let center = edge / 2.0;
	let gradient = ctx
		.create_radial_gradient(center, center, 0.0, center, center, halo)
		.ok()?;

	let core = Color::rgb(255, 255, 255).lerp(color, 0.3);
	gradient.add_color_stop(0.0, &core.to_css()).ok()?;
	gradient.add_color_stop(0.25, &color.to_css()).ok()?;
	gradient
		.add_color_stop(0.6, &color.with_alpha(0.25 + glow.min(1.0) * 0.2).to_css())
		.ok()?;
	gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)").ok()?;

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, edge, edge);

	Some(Sprite {
		canvas,
		half: center,
	})
}
