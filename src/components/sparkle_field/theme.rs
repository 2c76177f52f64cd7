//! Sparkle colours and visual style.

use rand::Rng;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same channels, new alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colour family a sparkle is born with. Fixed for the sparkle's life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SparkleTint {
	/// Warm gold.
	Gold,
	/// Soft violet.
	Violet,
}

/// Visual style shared by every sparkle of a field.
#[derive(Clone, Debug)]
pub struct SparkleStyle {
	/// Fill colour of gold sparkles
	pub gold: Color,
	/// Fill colour of violet sparkles
	pub violet: Color,
	/// Chance that a new sparkle is gold rather than violet
	pub gold_probability: f64,
	/// Alpha of the glow colour, independent of the twinkle
	pub glow_alpha: f64,
	/// Glow blur radius as a multiple of sparkle size
	pub glow_blur: f64,
	/// Inner star radius as a fraction of the outer radius
	pub inner_ratio: f64,
}

impl SparkleStyle {
	/// Rolls the tint of a new sparkle.
	pub fn pick_tint<R: Rng + ?Sized>(&self, rng: &mut R) -> SparkleTint {
		if rng.gen_bool(self.gold_probability.clamp(0.0, 1.0)) {
			SparkleTint::Gold
		} else {
			SparkleTint::Violet
		}
	}

	/// Opaque fill colour for a tint. Per-frame opacity goes through global alpha.
	pub fn fill(&self, tint: SparkleTint) -> Color {
		match tint {
			SparkleTint::Gold => self.gold,
			SparkleTint::Violet => self.violet,
		}
	}

	/// Shadow colour for a tint.
	pub fn glow(&self, tint: SparkleTint) -> Color {
		self.fill(tint).with_alpha(self.glow_alpha)
	}
}

impl Default for SparkleStyle {
	fn default() -> Self {
		Self {
			gold: Color::rgb(212, 175, 55),
			violet: Color::rgb(200, 162, 255),
			gold_probability: 0.6,
			glow_alpha: 0.6,
			glow_blur: 3.0,
			inner_ratio: 0.35,
		}
	}
}
