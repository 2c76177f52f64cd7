//! Off-browser test doubles for the drawing surface and frame host.

use super::engine::FrameHost;
use super::scale::Viewport;
use super::surface::DrawSurface;
use super::theme::Color;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
	Configure { width: u32, height: u32, ratio: f64 },
	Clear(f64, f64, f64, f64),
	Save,
	Restore,
	GlobalAlpha(f64),
	FillColor(Color),
	Shadow(f64, Color),
	BeginPath,
	MoveTo(f64, f64),
	LineTo(f64, f64),
	ClosePath,
	Fill,
}

/// Records every call and tracks the state a real context would keep.
#[derive(Debug)]
pub struct RecordingSurface {
	pub ops: Vec<Op>,
	pub buffer: (u32, u32),
	pub ratio: f64,
	/// Path vertices after the scale transform, in buffer pixels.
	pub physical_path: Vec<(f64, f64)>,
	alpha: f64,
	alpha_stack: Vec<f64>,
	fill_alphas: Vec<f64>,
}

impl Default for RecordingSurface {
	fn default() -> Self {
		Self {
			ops: Vec::new(),
			buffer: (300, 150),
			ratio: 1.0,
			physical_path: Vec::new(),
			alpha: 1.0,
			alpha_stack: Vec::new(),
			fill_alphas: Vec::new(),
		}
	}
}

impl RecordingSurface {
	/// Global alpha in effect at each `fill`.
	pub fn fills(&self) -> Vec<f64> {
		self.fill_alphas.clone()
	}

	pub fn clear_log(&mut self) {
		self.ops.clear();
		self.physical_path.clear();
		self.fill_alphas.clear();
	}

	pub fn clears(&self) -> usize {
		self.ops.iter().filter(|op| matches!(op, Op::Clear(..))).count()
	}
}

impl DrawSurface for RecordingSurface {
	fn configure(&mut self, viewport: &Viewport) {
		let (width, height) = viewport.buffer_size();
		self.buffer = (width, height);
		self.ratio = viewport.pixel_ratio();
		self.ops.push(Op::Configure {
			width,
			height,
			ratio: self.ratio,
		});
	}

	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		self.ops.push(Op::Clear(x, y, width, height));
	}

	fn save(&mut self) {
		self.alpha_stack.push(self.alpha);
		self.ops.push(Op::Save);
	}

	fn restore(&mut self) {
		if let Some(alpha) = self.alpha_stack.pop() {
			self.alpha = alpha;
		}
		self.ops.push(Op::Restore);
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		self.alpha = alpha;
		self.ops.push(Op::GlobalAlpha(alpha));
	}

	fn set_fill_color(&mut self, color: Color) {
		self.ops.push(Op::FillColor(color));
	}

	fn set_shadow(&mut self, blur: f64, color: Color) {
		self.ops.push(Op::Shadow(blur, color));
	}

	fn begin_path(&mut self) {
		self.ops.push(Op::BeginPath);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.physical_path.push((x * self.ratio, y * self.ratio));
		self.ops.push(Op::MoveTo(x, y));
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.physical_path.push((x * self.ratio, y * self.ratio));
		self.ops.push(Op::LineTo(x, y));
	}

	fn close_path(&mut self) {
		self.ops.push(Op::ClosePath);
	}

	fn fill(&mut self) {
		self.fill_alphas.push(self.alpha);
		self.ops.push(Op::Fill);
	}
}

/// Frame host driven by hand: frames fire only when the test says so.
#[derive(Debug)]
pub struct ManualHost {
	pub viewport: Viewport,
	pub pending: Vec<u32>,
	pub cancelled: Vec<u32>,
	pub requests: usize,
	pub released: bool,
	/// Makes `request_frame` fail, as a host without animation frames would.
	pub refuse_frames: bool,
	next: u32,
}

impl ManualHost {
	pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
		Self {
			viewport: Viewport::new(width, height, device_pixel_ratio),
			pending: Vec::new(),
			cancelled: Vec::new(),
			requests: 0,
			released: false,
			refuse_frames: false,
			next: 1,
		}
	}

	/// Consumes the oldest pending frame, mimicking the host firing it.
	pub fn take_frame(&mut self) -> Option<u32> {
		if self.pending.is_empty() {
			None
		} else {
			Some(self.pending.remove(0))
		}
	}
}

impl FrameHost for ManualHost {
	type Handle = u32;

	fn viewport(&self) -> Viewport {
		self.viewport
	}

	fn request_frame(&mut self) -> Option<u32> {
		self.requests += 1;
		if self.refuse_frames {
			return None;
		}
		let handle = self.next;
		self.next += 1;
		self.pending.push(handle);
		Some(handle)
	}

	fn cancel_frame(&mut self, handle: u32) {
		self.pending.retain(|&h| h != handle);
		self.cancelled.push(handle);
	}

	fn release(&mut self) {
		self.released = true;
	}
}
