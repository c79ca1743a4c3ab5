//! Scroll-derived animation progress.
//!
//! The morph is scrubbed by scroll position rather than tweened over time:
//! each phase owns a [`ScrollRange`] mapping absolute scroll offsets to a
//! clamped 0..1 value, and the render loop eases that value per frame.

/// Ease-out cubic: fast start, gentle settle. Input is clamped to [0, 1].
pub fn ease_out_cubic(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	1.0 - (1.0 - t).powi(3)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Maps an absolute scroll offset range to normalized progress.
#[derive(Clone, Copy, Debug)]
pub struct ScrollRange {
	/// Scroll offset at which progress leaves 0.
	pub start_y: f64,
	/// Scroll offset at which progress reaches 1.
	pub end_y: f64,
}

impl ScrollRange {
	/// Create a range. Degenerate ranges (end at or before start) are
	/// widened to one pixel so progress stays well defined.
	pub fn new(start_y: f64, end_y: f64) -> Self {
		let end_y = if end_y > start_y { end_y } else { start_y + 1.0 };
		Self { start_y, end_y }
	}

	/// Normalized progress for a scroll offset, clamped to [0, 1].
	pub fn progress(&self, scroll_y: f64) -> f64 {
		((scroll_y - self.start_y) / (self.end_y - self.start_y)).clamp(0.0, 1.0)
	}
}

/// Current normalized progress for the two morph phases.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressPair {
	/// Outline-morph progress (scatter to map boundary).
	pub outline: f64,
	/// Interior-morph progress (scatter to map fill).
	pub interior: f64,
}

/// The two scroll triggers driving the outline and interior phases.
///
/// A `None` trigger is disabled and contributes a constant 0, which is how
/// a missing page anchor fails soft.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollTriggers {
	pub outline: Option<ScrollRange>,
	pub interior: Option<ScrollRange>,
}

impl ScrollTriggers {
	/// Derive both trigger ranges from page measurements.
	///
	/// The outline phase runs from the document top until the anchor
	/// section's midpoint reaches the viewport center; the interior phase
	/// runs from there to the bottom of the document. Without an anchor
	/// midpoint both phases stay disabled.
	pub fn from_anchor(anchor_mid_y: Option<f64>, viewport_h: f64, doc_h: f64) -> Self {
		let Some(mid) = anchor_mid_y else {
			return Self::default();
		};
		let outline_end = (mid - viewport_h / 2.0).max(1.0);
		let max_scroll = (doc_h - viewport_h).max(outline_end + 1.0);
		Self {
			outline: Some(ScrollRange::new(0.0, outline_end)),
			interior: Some(ScrollRange::new(outline_end, max_scroll)),
		}
	}

	/// Sample both triggers at a scroll offset.
	pub fn sample(&self, scroll_y: f64) -> ProgressPair {
		ProgressPair {
			outline: self.outline.map(|r| r.progress(scroll_y)).unwrap_or(0.0),
			interior: self.interior.map(|r| r.progress(scroll_y)).unwrap_or(0.0),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ease_out_cubic_boundaries() {
		assert_eq!(ease_out_cubic(0.0), 0.0);
		assert_eq!(ease_out_cubic(1.0), 1.0);
	}

	#[test]
	fn ease_out_cubic_clamps_input() {
		assert_eq!(ease_out_cubic(-2.5), 0.0);
		assert_eq!(ease_out_cubic(7.0), 1.0);
	}

	#[test]
	fn ease_out_cubic_is_monotone() {
		let mut prev = ease_out_cubic(0.0);
		for i in 1..=100 {
			let v = ease_out_cubic(i as f64 / 100.0);
			assert!(v >= prev, "decreased at t={}", i as f64 / 100.0);
			prev = v;
		}
	}

	#[test]
	fn ease_out_cubic_front_loads_motion() {
		// Half the scroll should already yield most of the motion.
		assert!(ease_out_cubic(0.5) > 0.8);
	}

	#[test]
	fn range_progress_clamps() {
		let r = ScrollRange::new(100.0, 500.0);
		assert_eq!(r.progress(0.0), 0.0);
		assert_eq!(r.progress(100.0), 0.0);
		assert_eq!(r.progress(300.0), 0.5);
		assert_eq!(r.progress(500.0), 1.0);
		assert_eq!(r.progress(10_000.0), 1.0);
		assert_eq!(r.progress(-10_000.0), 0.0);
	}

	#[test]
	fn degenerate_range_is_widened() {
		let r = ScrollRange::new(200.0, 200.0);
		assert!(r.end_y > r.start_y);
		assert_eq!(r.progress(199.0), 0.0);
		assert_eq!(r.progress(201.0), 1.0);
	}

	#[test]
	fn progress_never_escapes_unit_interval() {
		let r = ScrollRange::new(-50.0, 1234.5);
		for y in [-1e9, -1.0, 0.0, 3.3, 617.0, 1234.5, 1e9, f64::MAX] {
			let p = r.progress(y);
			assert!((0.0..=1.0).contains(&p), "p={p} at y={y}");
		}
	}

	#[test]
	fn missing_anchor_disables_both_triggers() {
		let t = ScrollTriggers::from_anchor(None, 900.0, 5000.0);
		let p = t.sample(2500.0);
		assert_eq!(p.outline, 0.0);
		assert_eq!(p.interior, 0.0);
	}

	#[test]
	fn phases_hand_off_at_anchor_midpoint() {
		let t = ScrollTriggers::from_anchor(Some(2450.0), 900.0, 5000.0);
		// Outline ends where the anchor midpoint crosses viewport center.
		let handoff = 2450.0 - 450.0;
		let at_handoff = t.sample(handoff);
		assert_eq!(at_handoff.outline, 1.0);
		assert_eq!(at_handoff.interior, 0.0);

		let at_top = t.sample(0.0);
		assert_eq!(at_top.outline, 0.0);
		assert_eq!(at_top.interior, 0.0);

		let at_bottom = t.sample(5000.0 - 900.0);
		assert_eq!(at_bottom.outline, 1.0);
		assert_eq!(at_bottom.interior, 1.0);
	}

	#[test]
	fn interior_ramps_between_handoff_and_bottom() {
		let t = ScrollTriggers::from_anchor(Some(2450.0), 900.0, 5000.0);
		let handoff = 2000.0;
		let bottom = 4100.0;
		let mid = (handoff + bottom) / 2.0;
		let p = t.sample(mid).interior;
		assert!((p - 0.5).abs() < 1e-9);
	}

	#[test]
	fn short_document_still_yields_valid_ranges() {
		// Anchor below the scrollable area; ranges must stay ordered.
		let t = ScrollTriggers::from_anchor(Some(100.0), 900.0, 600.0);
		let p = t.sample(50.0);
		assert!((0.0..=1.0).contains(&p.outline));
		assert!((0.0..=1.0).contains(&p.interior));
	}

	#[test]
	fn lerp_endpoints() {
		assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
		assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
		assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
	}
}
