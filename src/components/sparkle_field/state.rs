//! Sparkle field simulation state.
//!
//! Holds the active sparkles and the logical field size. One call to
//! [`SparkleField::step`] produces one frame: clear, top up to capacity, then
//! advance, cull and draw every sparkle.

use rand::Rng;

use super::particles::Sparkle;
use super::render;
use super::surface::DrawSurface;
use super::theme::SparkleStyle;

/// What a single frame did. Handy for tracing and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	/// Sparkles created to top the field up.
	pub spawned: usize,
	/// Sparkles removed for expiring or leaving the field.
	pub culled: usize,
	/// Sparkles drawn.
	pub drawn: usize,
}

/// Bounded collection of sparkles over a logical `width` x `height` area.
#[derive(Clone, Debug)]
pub struct SparkleField {
	/// Live sparkles, oldest first.
	pub sparkles: Vec<Sparkle>,
	capacity: usize,
	/// Logical width.
	pub width: f64,
	/// Logical height.
	pub height: f64,
}

impl SparkleField {
	/// Empty field. Sparkles are spawned by the first [`SparkleField::step`].
	pub fn new(capacity: usize, width: f64, height: f64) -> Self {
		Self {
			sparkles: Vec::with_capacity(capacity),
			capacity,
			width,
			height,
		}
	}

	/// Target sparkle count.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Changes the target count. A shrinking field drops its newest sparkles
	/// right away so the count never exceeds capacity.
	pub fn set_capacity(&mut self, capacity: usize) {
		self.capacity = capacity;
		self.sparkles.truncate(capacity);
	}

	/// Updates the logical size. Sparkles keep their positions; any that end
	/// up outside the new bounds are culled on the next frame.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Spawns sparkles until the field is at capacity. Returns how many.
	pub fn fill<R: Rng + ?Sized>(&mut self, style: &SparkleStyle, rng: &mut R) -> usize {
		let missing = self.capacity.saturating_sub(self.sparkles.len());
		for _ in 0..missing {
			self.sparkles
				.push(Sparkle::spawn(rng, style, self.width, self.height));
		}
		missing
	}

	/// Runs one frame against `surface`.
	pub fn step<S, R>(&mut self, surface: &mut S, style: &SparkleStyle, rng: &mut R) -> FrameStats
	where
		S: DrawSurface + ?Sized,
		R: Rng + ?Sized,
	{
		surface.clear_rect(0.0, 0.0, self.width, self.height);

		let mut stats = FrameStats {
			spawned: self.fill(style, rng),
			..FrameStats::default()
		};

		// Back to front so removal doesn't skip the next sparkle.
		for i in (0..self.sparkles.len()).rev() {
			let sparkle = &mut self.sparkles[i];
			sparkle.advance();
			let alpha = sparkle.draw_alpha();

			if sparkle.is_expired() || sparkle.is_outside(self.width, self.height) {
				self.sparkles.remove(i);
				stats.culled += 1;
				continue;
			}

			render::draw_sparkle(surface, &self.sparkles[i], style, alpha);
			stats.drawn += 1;
		}

		stats
	}
}
