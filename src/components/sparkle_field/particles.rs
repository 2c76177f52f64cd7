//! Twinkling star particles.

use rand::Rng;

use super::theme::{SparkleStyle, SparkleTint};

/// Lower bound of the twinkle oscillation.
pub const OPACITY_MIN: f64 = 0.1;
/// Upper bound of the twinkle oscillation.
pub const OPACITY_MAX: f64 = 0.8;
/// Opacity change per frame.
pub const TWINKLE_STEP: f64 = 0.008;
/// Frames over which a sparkle fades out before it expires.
pub const FADE_FRAMES: f64 = 30.0;
/// How far past the viewport edge a sparkle may drift before it is culled.
pub const CULL_MARGIN: f64 = 10.0;

const LIFE_MIN: u32 = 100;
const LIFE_MAX: u32 = 300;
const SIZE_MIN: f64 = 1.0;
const SIZE_SPAN: f64 = 3.0;
const DRIFT_SPAN: f64 = 0.3;
const SPAWN_OPACITY_MIN: f64 = 0.2;
const SPAWN_OPACITY_SPAN: f64 = 0.6;

/// A single twinkling sparkle, in logical pixel space.
#[derive(Clone, Debug)]
pub struct Sparkle {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal drift per frame.
	pub vx: f64,
	/// Vertical drift per frame.
	pub vy: f64,
	/// Outer radius of the star glyph
	pub size: f64,
	/// Base opacity before the life fade, within [`OPACITY_MIN`, `OPACITY_MAX`].
	pub opacity: f64,
	/// +1.0 while brightening, -1.0 while dimming
	pub twinkle_dir: f64,
	/// Colour family.
	pub tint: SparkleTint,
	/// Frames left to live
	pub life: u32,
	/// Life at spawn.
	pub max_life: u32,
}

impl Sparkle {
	/// Creates a sparkle somewhere inside a `width` x `height` field.
	pub fn spawn<R: Rng + ?Sized>(
		rng: &mut R,
		style: &SparkleStyle,
		width: f64,
		height: f64,
	) -> Self {
		let tint = style.pick_tint(rng);
		let life = rng.gen_range(LIFE_MIN..LIFE_MAX);

		Self {
			x: rng.gen_range(0.0..1.0) * width,
			y: rng.gen_range(0.0..1.0) * height,
			vx: (rng.gen_range(0.0..1.0) - 0.5) * DRIFT_SPAN,
			vy: (rng.gen_range(0.0..1.0) - 0.5) * DRIFT_SPAN,
			size: rng.gen_range(0.0..1.0) * SIZE_SPAN + SIZE_MIN,
			opacity: rng.gen_range(0.0..1.0) * SPAWN_OPACITY_SPAN + SPAWN_OPACITY_MIN,
			twinkle_dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
			tint,
			life,
			max_life: life,
		}
	}

	/// Moves, ages and twinkles the sparkle by one frame.
	pub fn advance(&mut self) {
		self.x += self.vx;
		self.y += self.vy;
		self.life = self.life.saturating_sub(1);
		self.twinkle();
	}

	fn twinkle(&mut self) {
		self.opacity =
			(self.opacity + TWINKLE_STEP * self.twinkle_dir).clamp(OPACITY_MIN, OPACITY_MAX);
		if self.opacity >= OPACITY_MAX || self.opacity <= OPACITY_MIN {
			self.twinkle_dir = -self.twinkle_dir;
		}
	}

	/// 1.0 for most of the life, ramping down to 0.0 over the last frames.
	pub fn life_fade(&self) -> f64 {
		(self.life as f64 / FADE_FRAMES).clamp(0.0, 1.0)
	}

	/// Opacity actually drawn this frame.
	pub fn draw_alpha(&self) -> f64 {
		self.opacity * self.life_fade()
	}

	/// Out of life.
	pub fn is_expired(&self) -> bool {
		self.life == 0
	}

	/// True once the sparkle is outside the viewport plus [`CULL_MARGIN`].
	pub fn is_outside(&self, width: f64, height: f64) -> bool {
		self.x < -CULL_MARGIN
			|| self.x > width + CULL_MARGIN
			|| self.y < -CULL_MARGIN
			|| self.y > height + CULL_MARGIN
	}
}
