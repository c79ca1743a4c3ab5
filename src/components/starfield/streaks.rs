//! Shooting-star streaks layered over the star field.
//!
//! At most a handful are alive at once; each is spawned near the upper-left
//! edge, travels down-right on a shallow diagonal, and is removed when its
//! lifetime expires or it leaves the canvas.

use rand::Rng;

/// Upper bound on simultaneously live streaks.
pub const MAX_STREAKS: usize = 3;

/// Spawn probability per second while below [`MAX_STREAKS`].
const SPAWN_CHANCE_PER_SECOND: f64 = 0.3;

/// How far past the canvas edge a streak may travel before removal.
const EXIT_MARGIN: f64 = 200.0;

/// Travel direction band, degrees below horizontal.
const ANGLE_BAND_DEG: (f64, f64) = (28.0, 36.0);

/// A single shooting star.
#[derive(Clone, Debug)]
pub struct Streak {
	/// Head position in canvas pixels.
	pub x: f64,
	pub y: f64,
	/// Velocity in pixels per second.
	pub vx: f64,
	pub vy: f64,
	/// Seconds alive so far.
	pub life: f64,
	/// Seconds until removal.
	pub max_life: f64,
	/// Trail length in pixels.
	pub length: f64,
	/// Stroke width in pixels.
	pub width: f64,
}

impl Streak {
	fn spawn(canvas_width: f64, canvas_height: f64, rng: &mut impl Rng) -> Self {
		let angle = rng
			.gen_range(ANGLE_BAND_DEG.0..ANGLE_BAND_DEG.1)
			.to_radians();
		let speed = rng.gen_range(380.0..640.0);
		let from_top = rng.gen_bool(0.7);
		let (x, y) = if from_top {
			(rng.gen_range(0.0..canvas_width * 0.8), rng.gen_range(-40.0..0.0))
		} else {
			(rng.gen_range(-40.0..0.0), rng.gen_range(0.0..canvas_height * 0.5))
		};
		Self {
			x,
			y,
			vx: speed * angle.cos(),
			vy: speed * angle.sin(),
			life: 0.0,
			max_life: rng.gen_range(0.9..1.8),
			length: rng.gen_range(90.0..170.0),
			width: rng.gen_range(1.2..2.6),
		}
	}

	/// Remaining brightness, 1 at spawn down to 0 at expiry.
	pub fn fade(&self) -> f64 {
		(1.0 - self.life / self.max_life).clamp(0.0, 1.0)
	}

	/// Position of the trail's far end.
	pub fn tail(&self) -> (f64, f64) {
		let speed = self.vx.hypot(self.vy);
		if speed <= f64::EPSILON {
			return (self.x, self.y);
		}
		let k = self.length / speed;
		(self.x - self.vx * k, self.y - self.vy * k)
	}
}

/// Owns the live streaks and their spawn/advance/cull cycle.
#[derive(Clone, Debug, Default)]
pub struct StreakSystem {
	pub streaks: Vec<Streak>,
}

impl StreakSystem {
	/// Advance one frame: maybe spawn, move heads, drop the expired.
	pub fn update(&mut self, dt: f64, width: f64, height: f64, rng: &mut impl Rng) {
		let can_spawn = width > 0.0 && height > 0.0 && self.streaks.len() < MAX_STREAKS;
		if can_spawn && rng.gen_range(0.0..1.0) < SPAWN_CHANCE_PER_SECOND * dt {
			self.streaks.push(Streak::spawn(width, height, rng));
		}
		for s in &mut self.streaks {
			s.x += s.vx * dt;
			s.y += s.vy * dt;
			s.life += dt;
		}
		self.streaks.retain(|s| {
			s.life < s.max_life
				&& s.x > -EXIT_MARGIN
				&& s.x < width + EXIT_MARGIN
				&& s.y > -EXIT_MARGIN
				&& s.y < height + EXIT_MARGIN
		});
	}

	pub fn clear(&mut self) {
		self.streaks.clear();
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use rand::rngs::mock::StepRng;

	use super::*;

	/// Rolls 0.0 every time, so every spawn check passes.
	fn always_spawn() -> StepRng {
		StepRng::new(0, 0)
	}

	/// Yields values near 1.0, so no spawn roll ever succeeds.
	fn never_spawn() -> StepRng {
		StepRng::new(u64::MAX, 0)
	}

	fn still_streak(max_life: f64) -> Streak {
		Streak {
			x: 400.0,
			y: 300.0,
			vx: 0.0,
			vy: 0.0,
			life: 0.0,
			max_life,
			length: 120.0,
			width: 2.0,
		}
	}

	#[test]
	fn live_count_never_exceeds_the_cap() {
		let mut system = StreakSystem::default();
		let mut rng = always_spawn();
		for _ in 0..200 {
			system.update(0.016, 1280.0, 900.0, &mut rng);
			assert!(system.streaks.len() <= MAX_STREAKS);
		}
	}

	#[test]
	fn expired_streaks_are_removed() {
		let mut system = StreakSystem::default();
		system.streaks.push(still_streak(1.0));
		let mut rng = never_spawn();
		for _ in 0..9 {
			system.update(0.1, 1280.0, 900.0, &mut rng);
		}
		assert_eq!(system.streaks.len(), 1);
		system.update(0.1, 1280.0, 900.0, &mut rng);
		assert!(system.streaks.is_empty());
	}

	#[test]
	fn offscreen_streaks_are_removed_before_expiry() {
		let mut system = StreakSystem::default();
		let mut runaway = still_streak(10.0);
		runaway.vx = 5000.0;
		system.streaks.push(runaway);
		let mut rng = never_spawn();
		system.update(1.0, 1280.0, 900.0, &mut rng);
		assert!(system.streaks.is_empty());
	}

	#[test]
	fn spawned_streaks_travel_down_right_within_the_band() {
		let mut system = StreakSystem::default();
		let mut rng = StdRng::seed_from_u64(41);
		let mut seen = 0;
		for _ in 0..20_000 {
			system.update(0.016, 1280.0, 900.0, &mut rng);
			for s in &system.streaks {
				if s.life == 0.016 {
					seen += 1;
					let angle = s.vy.atan2(s.vx).to_degrees();
					assert!(angle > ANGLE_BAND_DEG.0 - 1e-6 && angle < ANGLE_BAND_DEG.1 + 1e-6);
					let speed = s.vx.hypot(s.vy);
					assert!(speed > 379.0 && speed < 641.0);
					assert!((90.0..170.0).contains(&s.length));
					assert!((1.2..2.6).contains(&s.width));
				}
			}
		}
		assert!(seen > 0, "no streak ever spawned");
	}

	#[test]
	fn spawns_come_from_both_edges() {
		let mut system = StreakSystem::default();
		let mut rng = StdRng::seed_from_u64(43);
		let (mut top, mut left) = (0, 0);
		for _ in 0..60_000 {
			system.update(0.016, 1280.0, 900.0, &mut rng);
			for s in &system.streaks {
				if s.life == 0.016 {
					// Top spawns keep x >= 0; left spawns keep y >= 0.
					if s.y < 0.0 {
						top += 1;
					} else if s.x < 0.0 {
						left += 1;
					}
				}
			}
		}
		assert!(top > 0, "no top-edge spawn seen");
		assert!(left > 0, "no left-edge spawn seen");
		assert!(top > left);
	}

	#[test]
	fn fade_runs_from_one_to_zero() {
		let mut s = still_streak(2.0);
		assert_eq!(s.fade(), 1.0);
		s.life = 1.0;
		assert_eq!(s.fade(), 0.5);
		s.life = 2.5;
		assert_eq!(s.fade(), 0.0);
	}

	#[test]
	fn tail_sits_one_length_behind_the_head() {
		let s = Streak {
			vx: 300.0,
			vy: 400.0,
			..still_streak(1.0)
		};
		let (tx, ty) = s.tail();
		let dist = (s.x - tx).hypot(s.y - ty);
		assert!((dist - s.length).abs() < 1e-9);
		// Tail trails the motion: opposite side of the velocity.
		assert!(tx < s.x);
		assert!(ty < s.y);
	}

	#[test]
	fn clear_drops_everything() {
		let mut system = StreakSystem::default();
		system.streaks.push(still_streak(5.0));
		system.streaks.push(still_streak(5.0));
		system.clear();
		assert!(system.streaks.is_empty());
	}
}
