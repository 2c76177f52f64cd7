//! Logical vs. physical pixel scaling.
//!
//! # Coordinate Spaces
//!
//! - **Logical**: CSS pixels. Sparkle positions, sizes and the cull margin all
//!   live here, and the field's width/height are the window's inner size.
//! - **Physical**: pixels of the canvas backing buffer. The buffer is the
//!   logical size multiplied by the device pixel ratio, capped at
//!   [`MAX_PIXEL_RATIO`] so high-density screens don't pay for 3x or 4x
//!   buffers.
//!
//! The canvas context is given a uniform scale transform of
//! [`Viewport::pixel_ratio`], so drawing commands are issued in logical units
//! and land at `logical * ratio` in the buffer.

/// Upper bound on the device pixel ratio used for the backing buffer.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Snapshot of the host viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Logical width in CSS pixels.
	pub width: f64,
	/// Logical height in CSS pixels.
	pub height: f64,
	/// Device pixel ratio reported by the host.
	pub device_pixel_ratio: f64,
}

impl Viewport {
	/// Viewport of `width` x `height` CSS pixels.
	pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
		Self {
			width,
			height,
			device_pixel_ratio,
		}
	}

	/// Effective ratio: the device ratio capped at [`MAX_PIXEL_RATIO`].
	///
	/// Hosts that report nothing useful (zero, negative, NaN) get 1.0.
	pub fn pixel_ratio(&self) -> f64 {
		if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
			self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
		} else {
			1.0
		}
	}

	/// Backing buffer dimensions in physical pixels.
	pub fn buffer_size(&self) -> (u32, u32) {
		let ratio = self.pixel_ratio();
		(
			(self.width.max(0.0) * ratio) as u32,
			(self.height.max(0.0) * ratio) as u32,
		)
	}

	/// Where a logical point lands in the backing buffer.
	pub fn to_physical(&self, x: f64, y: f64) -> (f64, f64) {
		let ratio = self.pixel_ratio();
		(x * ratio, y * ratio)
	}
}
