//! Point-field construction.
//!
//! Builds the full star population for a canvas size: outline stars drawn
//! from the pre-generated candidate list, interior stars rejection-sampled
//! inside the region shapes, exterior stars scattered outside them.
//! Population sizes scale with a coarse device tier. Each build is a
//! complete replacement; the render loop swaps the new array in whole.

use std::f64::consts::TAU;

use kurbo::{Affine, Point};
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::geometry::{DEFAULT_SOURCE_SIZE, MapShapes};
use super::types::CandidatePoint;

/// Which role a star plays in the morph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Population {
	/// Target lies on the map boundary; morphs during the outline phase.
	Outline,
	/// Target lies strictly inside a region; morphs during the interior phase.
	Interior,
	/// Fixed background scatter outside the map. Never moves.
	Exterior,
}

/// A single renderable star.
#[derive(Clone, Debug)]
pub struct StarPoint {
	/// Current position, updated each frame from progress.
	pub x: f64,
	pub y: f64,
	/// Rest position the morph starts from.
	pub start_x: f64,
	pub start_y: f64,
	/// Position the morph converges to.
	pub target_x: f64,
	pub target_y: f64,
	/// Dot radius in pixels.
	pub radius: f64,
	pub population: Population,
	/// Current opacity, updated each frame from the twinkle phase.
	pub opacity: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Twinkle phase in radians.
	pub phase: f64,
	/// Twinkle angular speed in radians per second.
	pub twinkle_speed: f64,
	/// Glow halo intensity in [0, 1].
	pub glow: f64,
}

/// Population sizes for one device tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopulationPreset {
	pub outline: usize,
	pub interior: usize,
	pub exterior: usize,
}

impl PopulationPreset {
	/// Total stars the preset asks for.
	pub const fn total(&self) -> usize {
		self.outline + self.interior + self.exterior
	}
}

/// Coarse device class selecting a population preset.
///
/// A battery/performance tradeoff, not a visual one: phones get roughly a
/// third of the desktop star count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceTier {
	Desktop,
	Mobile,
}

const MOBILE_WIDTH_THRESHOLD: f64 = 768.0;
const MOBILE_UA_MARKERS: [&str; 4] = ["Mobi", "Android", "iPhone", "iPad"];

impl DeviceTier {
	/// Population sizes for this tier.
	pub const fn preset(self) -> PopulationPreset {
		match self {
			Self::Desktop => PopulationPreset {
				outline: 1000,
				interior: 1000,
				exterior: 1000,
			},
			Self::Mobile => PopulationPreset {
				outline: 500,
				interior: 300,
				exterior: 300,
			},
		}
	}

	/// Classify from viewport width and user agent.
	pub fn from_viewport(width: f64, user_agent: &str) -> Self {
		let narrow = width < MOBILE_WIDTH_THRESHOLD;
		if narrow || MOBILE_UA_MARKERS.iter().any(|m| user_agent.contains(m)) {
			Self::Mobile
		} else {
			Self::Desktop
		}
	}

	/// Classify the current browser environment.
	pub fn detect() -> Self {
		let Some(window) = web_sys::window() else {
			return Self::Desktop;
		};
		let width = window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(1280.0);
		let user_agent = window.navigator().user_agent().unwrap_or_default();
		Self::from_viewport(width, &user_agent)
	}
}

/// Fraction of the canvas the fitted map may occupy.
const FIT_MARGIN: f64 = 0.85;

/// Rejection sampling gives up after this multiple of the target count.
const SAMPLE_ATTEMPT_MULTIPLE: usize = 50;

/// Uniform-fit transform from source space into the canvas: uniform scale
/// to fit with margin, offset to center the scaled source rectangle.
pub fn fit_transform(source: (f64, f64), width: f64, height: f64) -> Affine {
	let (sw, sh) = if source.0 > 0.0 && source.1 > 0.0 {
		source
	} else {
		DEFAULT_SOURCE_SIZE
	};
	let scale = (width / sw).min(height / sh) * FIT_MARGIN;
	let ox = (width - sw * scale) / 2.0;
	let oy = (height - sh * scale) / 2.0;
	Affine::translate((ox, oy)) * Affine::scale(scale)
}

/// Build a complete star field for the given canvas size and tier.
///
/// Tolerates partially-loaded geometry: with no candidates the outline
/// population is empty, and with no region shapes the interior population
/// is skipped while the exterior degenerates to a uniform scatter.
pub fn build_field(
	candidates: &[CandidatePoint],
	source_size: (f64, f64),
	shapes: &MapShapes,
	width: f64,
	height: f64,
	tier: DeviceTier,
	rng: &mut impl Rng,
) -> Vec<StarPoint> {
	if width <= 0.0 || height <= 0.0 {
		return Vec::new();
	}

	let preset = tier.preset();
	let transform = fit_transform(source_size, width, height);
	let placed = shapes.place(transform);
	let mut points = Vec::with_capacity(preset.total());

	// Outline: distinct candidates when there are enough, resampling with
	// replacement when the asset is smaller than the preset.
	if !candidates.is_empty() {
		let chosen: Vec<CandidatePoint> = if candidates.len() >= preset.outline {
			candidates
				.choose_multiple(rng, preset.outline)
				.copied()
				.collect()
		} else {
			(0..preset.outline)
				.map(|_| candidates[rng.gen_range(0..candidates.len())])
				.collect()
		};
		for c in chosen {
			let t = transform * Point::new(c.x, c.y);
			let start = (rng.gen_range(0.0..width), rng.gen_range(0.0..height));
			points.push(make_star(Population::Outline, start, (t.x, t.y), rng));
		}
	}

	// Interior: rejection-sample inside the union of all regions.
	if !placed.is_empty() {
		let cap = preset.interior * SAMPLE_ATTEMPT_MULTIPLE;
		let mut accepted = 0;
		let mut attempts = 0;
		while accepted < preset.interior && attempts < cap {
			attempts += 1;
			let (x, y) = (rng.gen_range(0.0..width), rng.gen_range(0.0..height));
			if placed.contains(x, y) {
				let start = (rng.gen_range(0.0..width), rng.gen_range(0.0..height));
				points.push(make_star(Population::Interior, start, (x, y), rng));
				accepted += 1;
			}
		}
		if accepted < preset.interior {
			debug!(
				"southern-sky: interior population undersized: {accepted}/{} after {attempts} attempts",
				preset.interior
			);
		}
	}

	// Exterior: static scatter outside every region. With no shapes this
	// accepts every sample, which is the degraded all-scatter mode.
	let cap = preset.exterior * SAMPLE_ATTEMPT_MULTIPLE;
	let mut accepted = 0;
	let mut attempts = 0;
	while accepted < preset.exterior && attempts < cap {
		attempts += 1;
		let (x, y) = (rng.gen_range(0.0..width), rng.gen_range(0.0..height));
		if !placed.contains(x, y) {
			points.push(make_star(Population::Exterior, (x, y), (x, y), rng));
			accepted += 1;
		}
	}
	if accepted < preset.exterior {
		debug!(
			"southern-sky: exterior population undersized: {accepted}/{} after {attempts} attempts",
			preset.exterior
		);
	}

	points
}

fn make_star(
	population: Population,
	start: (f64, f64),
	target: (f64, f64),
	rng: &mut impl Rng,
) -> StarPoint {
	let (radius, glow, opacity_min, opacity_max) = match population {
		Population::Outline => (
			rng.gen_range(0.8..2.0),
			rng.gen_range(0.5..1.0),
			rng.gen_range(0.30..0.45),
			rng.gen_range(0.75..1.0),
		),
		Population::Interior => (
			rng.gen_range(0.6..1.6),
			rng.gen_range(0.3..0.9),
			rng.gen_range(0.25..0.40),
			rng.gen_range(0.65..0.95),
		),
		Population::Exterior => (
			rng.gen_range(0.4..1.4),
			rng.gen_range(0.0..0.6),
			rng.gen_range(0.15..0.30),
			rng.gen_range(0.45..0.80),
		),
	};

	StarPoint {
		x: start.0,
		y: start.1,
		start_x: start.0,
		start_y: start.1,
		target_x: target.0,
		target_y: target.1,
		radius,
		population,
		opacity: (opacity_min + opacity_max) / 2.0,
		opacity_min,
		opacity_max,
		phase: rng.gen_range(0.0..TAU),
		twinkle_speed: rng.gen_range(0.5..2.0),
		glow,
	}
}
