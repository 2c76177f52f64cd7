//! Star glyph rendering.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::particles::Sparkle;
use super::surface::DrawSurface;
use super::theme::SparkleStyle;

/// Vertices of a 4-point star, alternating outer and inner points.
///
/// Outer points sit at 0°, 90°, 180°, 270°; inner points are rotated 45° and
/// pulled in to `radius * inner_ratio`.
pub fn star_points(x: f64, y: f64, radius: f64, inner_ratio: f64) -> [(f64, f64); 8] {
	let inner = radius * inner_ratio;
	let mut points = [(0.0, 0.0); 8];
	for i in 0..4 {
		let angle = i as f64 * FRAC_PI_2;
		let inner_angle = angle + FRAC_PI_4;
		points[i * 2] = (x + angle.cos() * radius, y + angle.sin() * radius);
		points[i * 2 + 1] = (x + inner_angle.cos() * inner, y + inner_angle.sin() * inner);
	}
	points
}

/// Draws one sparkle at `alpha` with its tint's glow.
pub fn draw_sparkle<S: DrawSurface + ?Sized>(
	surface: &mut S,
	sparkle: &Sparkle,
	style: &SparkleStyle,
	alpha: f64,
) {
	surface.save();
	surface.set_global_alpha(alpha);
	surface.set_fill_color(style.fill(sparkle.tint));
	surface.set_shadow(sparkle.size * style.glow_blur, style.glow(sparkle.tint));

	let points = star_points(sparkle.x, sparkle.y, sparkle.size, style.inner_ratio);
	surface.begin_path();
	for (i, &(px, py)) in points.iter().enumerate() {
		if i == 0 {
			surface.move_to(px, py);
		} else {
			surface.line_to(px, py);
		}
	}
	surface.close_path();
	surface.fill();

	surface.restore();
}
