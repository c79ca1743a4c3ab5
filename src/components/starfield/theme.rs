//! Visual theming for the starfield.
//!
//! Provides the color type, per-layer style configuration, and named presets.

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Skip background painting entirely, leaving the canvas transparent.
	/// The host page supplies the backdrop in this mode.
	pub transparent: bool,
}

/// Star visual style.
#[derive(Clone, Debug)]
pub struct StarStyle {
	/// Base star color. Sprites blend this towards white at the core.
	pub color: Color,
	/// Halo radius multiplier applied on top of per-star glow intensity.
	pub halo: f64,
}

/// Shooting-star streak style.
#[derive(Clone, Debug)]
pub struct StreakStyle {
	/// Trail color at the head; the tail fades to transparent.
	pub color: Color,
	/// Head glow color.
	pub head_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub star: StarStyle,
	pub streak: StreakStyle,
}

impl Theme {
	/// Deep night sky with a subtle radial gradient (default)
	pub fn night() -> Self {
		Self {
			name: "night",
			background: BackgroundStyle {
				color: Color::rgb(5, 8, 18),
				color_secondary: Color::rgb(14, 19, 36),
				use_gradient: true,
				transparent: false,
			},
			star: StarStyle {
				color: Color::rgb(226, 232, 245),
				halo: 1.0,
			},
			streak: StreakStyle {
				color: Color::rgba(235, 240, 255, 0.9),
				head_color: Color::rgb(255, 255, 255),
			},
		}
	}

	/// Transparent variant for layering over a page that paints its own
	/// dark backdrop.
	pub fn overlay() -> Self {
		Self {
			name: "overlay",
			background: BackgroundStyle {
				color: Color::rgba(0, 0, 0, 0.0),
				color_secondary: Color::rgba(0, 0, 0, 0.0),
				use_gradient: false,
				transparent: true,
			},
			..Self::night()
		}
	}

	/// Cooler southern-lights tint
	pub fn aurora() -> Self {
		Self {
			name: "aurora",
			background: BackgroundStyle {
				color: Color::rgb(4, 12, 16),
				color_secondary: Color::rgb(10, 26, 30),
				use_gradient: true,
				transparent: false,
			},
			star: StarStyle {
				color: Color::rgb(205, 238, 235),
				halo: 1.2,
			},
			streak: StreakStyle {
				color: Color::rgba(210, 245, 240, 0.9),
				head_color: Color::rgb(240, 255, 252),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::night()
	}
}
