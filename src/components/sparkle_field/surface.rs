//! Drawing surface abstraction and its HTML canvas implementation.

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scale::Viewport;
use super::theme::Color;

/// Immediate-mode 2D drawing operations used by the sparkle renderer.
///
/// Mirrors the subset of `CanvasRenderingContext2d` the field needs, so the
/// simulation can run against a recording surface in tests.
pub trait DrawSurface {
	/// Sizes the backing buffer for `viewport` and scales the context so
	/// drawing commands are expressed in logical units.
	fn configure(&mut self, viewport: &Viewport);
	/// Clears a rectangle in logical units.
	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
	/// Pushes the drawing state.
	fn save(&mut self);
	/// Pops the drawing state.
	fn restore(&mut self);
	/// Alpha applied to everything drawn after this call.
	fn set_global_alpha(&mut self, alpha: f64);
	/// Color for subsequent fills.
	fn set_fill_color(&mut self, color: Color);
	/// Glow around filled shapes.
	fn set_shadow(&mut self, blur: f64, color: Color);
	/// Starts a new path.
	fn begin_path(&mut self);
	/// Moves the pen without drawing.
	fn move_to(&mut self, x: f64, y: f64);
	/// Adds a straight segment to the current path.
	fn line_to(&mut self, x: f64, y: f64);
	/// Joins the path back to its start.
	fn close_path(&mut self);
	/// Fills the current path with the current fill color.
	fn fill(&mut self);
}

/// Reasons a named canvas could not be bound.
#[derive(Debug, Error)]
pub enum SurfaceError {
	/// Not running in a browser window.
	#[error("no global window")]
	NoWindow,
	/// The window has no document.
	#[error("window has no document")]
	NoDocument,
	/// Nothing in the document has this id.
	#[error("no element with id `{0}`")]
	MissingElement(String),
	/// The element exists but is not a `<canvas>`.
	#[error("element `{0}` is not a canvas")]
	NotACanvas(String),
	/// `getContext("2d")` failed.
	#[error("canvas `{0}` has no 2d context")]
	NoContext(String),
}

/// A `<canvas>` element and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Looks up the canvas with the given DOM id and acquires its 2D context.
	pub fn resolve(id: &str) -> Result<Self, SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let document = window.document().ok_or(SurfaceError::NoDocument)?;
		let element = document
			.get_element_by_id(id)
			.ok_or_else(|| SurfaceError::MissingElement(id.to_string()))?;
		let canvas: HtmlCanvasElement = element
			.dyn_into()
			.map_err(|_| SurfaceError::NotACanvas(id.to_string()))?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or_else(|| SurfaceError::NoContext(id.to_string()))?;

		Ok(Self { canvas, ctx })
	}
}

impl DrawSurface for CanvasSurface {
	fn configure(&mut self, viewport: &Viewport) {
		let (w, h) = viewport.buffer_size();
		self.canvas.set_width(w);
		self.canvas.set_height(h);

		let style = self.canvas.style();
		let _ = style.set_property("width", "100%");
		let _ = style.set_property("height", "100%");

		// Resizing resets the context state; set (not compound) the transform.
		let ratio = viewport.pixel_ratio();
		let _ = self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	}

	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		self.ctx.clear_rect(x, y, width, height);
	}

	fn save(&mut self) {
		self.ctx.save();
	}

	fn restore(&mut self) {
		self.ctx.restore();
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		self.ctx.set_global_alpha(alpha);
	}

	fn set_fill_color(&mut self, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
	}

	fn set_shadow(&mut self, blur: f64, color: Color) {
		self.ctx.set_shadow_blur(blur);
		self.ctx.set_shadow_color(&color.to_css());
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.ctx.move_to(x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.ctx.line_to(x, y);
	}

	fn close_path(&mut self) {
		self.ctx.close_path();
	}

	fn fill(&mut self) {
		self.ctx.fill();
	}
}
