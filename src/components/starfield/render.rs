//! Canvas rendering for the starfield.
//!
//! One pass per layer, back to front: background, star sprites, streaks.
//! Stars blit pre-rendered sprites from the cache; the arc fallback only
//! runs when an offscreen canvas cannot be created.

use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, Document};

use super::sprites::SpriteCache;
use super::state::StarfieldState;
use super::theme::Theme;

/// Renders one complete frame.
pub fn render(
	state: &StarfieldState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	sprites: &mut SpriteCache,
	document: &Document,
) {
	draw_background(state, ctx, theme);
	draw_stars(state, ctx, theme, sprites, document);
	draw_streaks(state, ctx, theme);
}

fn draw_background(state: &StarfieldState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.transparent {
		ctx.clear_rect(0.0, 0.0, state.width, state.height);
		return;
	}

	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height * 0.35,
				0.0,
				state.width / 2.0,
				state.height * 0.35,
				state.width.max(state.height) * 0.9,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_stars(
	state: &StarfieldState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	sprites: &mut SpriteCache,
	document: &Document,
) {
	let color = theme.star.color;

	for p in &state.points {
		if !p.x.is_finite() || !p.y.is_finite() || p.radius <= 0.0 {
			continue;
		}

		match sprites.get_or_create(document, p.radius, p.glow, color, theme.star.halo) {
			Some(sprite) => {
				ctx.set_global_alpha(p.opacity);
				let _ = ctx.draw_image_with_html_canvas_element(
					&sprite.canvas,
					p.x - sprite.half,
					p.y - sprite.half,
				);
			}
			None => {
				ctx.set_global_alpha(1.0);
				ctx.set_fill_style_str(&format!(
					"rgba({}, {}, {}, {})",
					color.r, color.g, color.b, p.opacity
				));
				ctx.begin_path();
				let _ = ctx.arc(p.x, p.y, p.radius, 0.0, PI * 2.0);
				ctx.fill();
			}
		}
	}

	ctx.set_global_alpha(1.0);
}

fn draw_streaks(state: &StarfieldState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	for s in &state.streaks.streaks {
		let fade = s.fade();
		if fade <= 0.0 {
			continue;
		}
		let (tail_x, tail_y) = s.tail();

		let gradient = ctx.create_linear_gradient(tail_x, tail_y, s.x, s.y);
		let color = theme.streak.color;
		gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)").unwrap();
		gradient
			.add_color_stop(1.0, &color.with_alpha(color.a * fade).to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
		ctx.set_line_width(s.width);
		ctx.set_line_cap("round");
		ctx.begin_path();
		ctx.move_to(tail_x, tail_y);
		ctx.line_to(s.x, s.y);
		ctx.stroke();

		let head = theme.streak.head_color;
		ctx.set_fill_style_str(&head.with_alpha(head.a * fade).to_css());
		ctx.begin_path();
		let _ = ctx.arc(s.x, s.y, s.width * 1.4, 0.0, PI * 2.0);
		ctx.fill();
	}
}
