//! Animation state for the starfield.
//!
//! Owns the star array, streak system, and scroll triggers. The render
//! loop drives it with a fixed timestep; scroll and resize handlers poke
//! it between frames.

use rand::Rng;

use super::field::{DeviceTier, Population, StarPoint};
use super::progress::{ProgressPair, ScrollTriggers, ease_out_cubic, lerp};
use super::streaks::StreakSystem;

/// Complete mutable state of one starfield instance.
pub struct StarfieldState {
	/// Star field. Rebuilds swap the whole vector so a frame never sees a
	/// half-regenerated population.
	pub points: Vec<StarPoint>,
	pub streaks: StreakSystem,
	/// Scroll ranges driving the two morph phases.
	pub triggers: ScrollTriggers,
	/// Most recent progress sample.
	pub progress: ProgressPair,
	/// Canvas size in CSS pixels.
	pub width: f64,
	pub height: f64,
	pub tier: DeviceTier,
}

impl StarfieldState {
	pub fn new(width: f64, height: f64, tier: DeviceTier) -> Self {
		Self {
			points: Vec::new(),
			streaks: StreakSystem::default(),
			triggers: ScrollTriggers::default(),
			progress: ProgressPair::default(),
			width,
			height,
			tier,
		}
	}

	/// Re-sample morph progress from a new scroll offset.
	pub fn set_scroll(&mut self, scroll_y: f64) {
		self.progress = self.triggers.sample(scroll_y);
	}

	/// Install new trigger ranges and re-sample at the current offset.
	pub fn set_triggers(&mut self, triggers: ScrollTriggers, scroll_y: f64) {
		self.triggers = triggers;
		self.progress = triggers.sample(scroll_y);
	}

	/// Swap in a freshly built star array.
	pub fn replace_points(&mut self, points: Vec<StarPoint>) {
		self.points = points;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Advance one frame: morph positions, twinkle phases, streaks.
	pub fn tick(&mut self, dt: f64, rng: &mut impl Rng) {
		let outline_t = ease_out_cubic(self.progress.outline);
		let interior_t = ease_out_cubic(self.progress.interior);

		for p in &mut self.points {
			match p.population {
				Population::Outline => {
					p.x = lerp(p.start_x, p.target_x, outline_t);
					p.y = lerp(p.start_y, p.target_y, outline_t);
				}
				Population::Interior => {
					p.x = lerp(p.start_x, p.target_x, interior_t);
					p.y = lerp(p.start_y, p.target_y, interior_t);
				}
				Population::Exterior => {}
			}
			p.phase += p.twinkle_speed * dt;
			p.opacity =
				p.opacity_min + ((p.phase.sin() + 1.0) / 2.0) * (p.opacity_max - p.opacity_min);
		}

		self.streaks.update(dt, self.width, self.height, rng);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::super::progress::ScrollRange;
	use super::*;

	fn star(population: Population, start: (f64, f64), target: (f64, f64)) -> StarPoint {
		StarPoint {
			x: start.0,
			y: start.1,
			start_x: start.0,
			start_y: start.1,
			target_x: target.0,
			target_y: target.1,
			radius: 1.0,
			population,
			opacity: 0.5,
			opacity_min: 0.2,
			opacity_max: 0.8,
			phase: 0.0,
			twinkle_speed: 1.0,
			glow: 0.5,
		}
	}

	fn scrubbed_state() -> StarfieldState {
		let mut state = StarfieldState::new(1280.0, 900.0, DeviceTier::Desktop);
		state.triggers = ScrollTriggers {
			outline: Some(ScrollRange::new(0.0, 100.0)),
			interior: Some(ScrollRange::new(100.0, 200.0)),
		};
		state.replace_points(vec![
			star(Population::Outline, (10.0, 20.0), (500.0, 600.0)),
			star(Population::Interior, (30.0, 40.0), (700.0, 800.0)),
			star(Population::Exterior, (50.0, 60.0), (900.0, 950.0)),
		]);
		state
	}

	#[test]
	fn zero_progress_holds_starts() {
		let mut state = scrubbed_state();
		let mut rng = StdRng::seed_from_u64(1);
		state.set_scroll(0.0);
		state.tick(0.016, &mut rng);
		assert_eq!(state.points[0].x, 10.0);
		assert_eq!(state.points[0].y, 20.0);
		assert_eq!(state.points[1].x, 30.0);
	}

	#[test]
	fn full_progress_converges_to_targets() {
		let mut state = scrubbed_state();
		let mut rng = StdRng::seed_from_u64(2);
		state.set_scroll(500.0);
		state.tick(0.016, &mut rng);
		assert!((state.points[0].x - 500.0).abs() < 1e-9);
		assert!((state.points[0].y - 600.0).abs() < 1e-9);
		assert!((state.points[1].x - 700.0).abs() < 1e-9);
	}

	#[test]
	fn exterior_points_never_move() {
		let mut state = scrubbed_state();
		let mut rng = StdRng::seed_from_u64(3);
		state.set_scroll(500.0);
		for _ in 0..60 {
			state.tick(0.016, &mut rng);
		}
		assert_eq!(state.points[2].x, 50.0);
		assert_eq!(state.points[2].y, 60.0);
	}

	#[test]
	fn outline_morph_is_front_loaded() {
		let mut state = scrubbed_state();
		let mut rng = StdRng::seed_from_u64(4);
		state.set_scroll(50.0);
		state.tick(0.016, &mut rng);
		// Halfway through the range the eased point is well past halfway.
		let travelled = (state.points[0].x - 10.0) / (500.0 - 10.0);
		assert!((travelled - 0.875).abs() < 1e-9);
	}

	#[test]
	fn interior_waits_for_its_own_range() {
		let mut state = scrubbed_state();
		let mut rng = StdRng::seed_from_u64(5);
		state.set_scroll(100.0);
		state.tick(0.016, &mut rng);
		// Outline done, interior not yet started.
		assert!((state.points[0].x - 500.0).abs() < 1e-9);
		assert_eq!(state.points[1].x, 30.0);
	}

	#[test]
	fn scrubbing_backwards_reverses_the_morph() {
		let mut state = scrubbed_state();
		let mut rng = StdRng::seed_from_u64(6);
		state.set_scroll(500.0);
		state.tick(0.016, &mut rng);
		let forward = state.points[0].x;
		state.set_scroll(0.0);
		state.tick(0.016, &mut rng);
		assert!(state.points[0].x < forward);
		assert_eq!(state.points[0].x, 10.0);
	}

	#[test]
	fn twinkle_stays_within_its_band() {
		let mut state = scrubbed_state();
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..600 {
			state.tick(0.016, &mut rng);
			for p in &state.points {
				assert!(p.opacity >= p.opacity_min - 1e-9);
				assert!(p.opacity <= p.opacity_max + 1e-9);
			}
		}
	}

	#[test]
	fn replacing_points_is_atomic() {
		let mut state = scrubbed_state();
		state.replace_points(vec![
			star(Population::Interior, (1.0, 1.0), (2.0, 2.0)),
			star(Population::Interior, (3.0, 3.0), (4.0, 4.0)),
		]);
		assert_eq!(state.points.len(), 2);
		assert!(
			state
				.points
				.iter()
				.all(|p| p.population == Population::Interior)
		);
	}

	#[test]
	fn installing_triggers_resamples_at_current_offset() {
		let mut state = StarfieldState::new(1280.0, 900.0, DeviceTier::Mobile);
		assert_eq!(state.progress, ProgressPair::default());
		state.set_triggers(
			ScrollTriggers {
				outline: Some(ScrollRange::new(0.0, 100.0)),
				interior: Some(ScrollRange::new(100.0, 200.0)),
			},
			150.0,
		);
		assert_eq!(state.progress.outline, 1.0);
		assert!((state.progress.interior - 0.5).abs() < 1e-9);
	}
}
