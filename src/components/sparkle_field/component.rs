//! Browser binding for the sparkle engine.
//!
//! [`SparkleSystem`] resolves a canvas by id, wires a window `resize` listener
//! and a `requestAnimationFrame` callback to a shared [`SparkleEngine`], and
//! exposes the lifecycle as a cheap, cloneable handle. Callbacks only hold weak
//! references to the engine, so dropping the last handle frees it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::engine::{FrameHost, SparkleEngine};
use super::scale::Viewport;
use super::surface::CanvasSurface;
use super::theme::SparkleStyle;
use super::types::SparkleConfig;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type BrowserEngine = SparkleEngine<CanvasSurface, BrowserHost>;

/// Window-backed frame scheduling and viewport queries.
pub struct BrowserHost {
	window: Window,
	on_frame: FrameCallback,
	on_resize: Option<Closure<dyn FnMut()>>,
}

impl FrameHost for BrowserHost {
	type Handle = i32;

	fn viewport(&self) -> Viewport {
		let dimension = |value: Result<JsValue, JsValue>| {
			value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
		};
		Viewport::new(
			dimension(self.window.inner_width()),
			dimension(self.window.inner_height()),
			self.window.device_pixel_ratio(),
		)
	}

	fn request_frame(&mut self) -> Option<i32> {
		let guard = self.on_frame.borrow();
		let cb = guard.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&mut self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}

	fn release(&mut self) {
		if let Some(cb) = self.on_resize.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		self.on_frame.borrow_mut().take();
	}
}

impl Drop for BrowserHost {
	// Never leave a listener pointing at a dropped closure.
	fn drop(&mut self) {
		self.release();
	}
}

/// Handle to a sparkle field drawn on a named canvas.
///
/// If the canvas can't be resolved the handle is inert: every method is a
/// no-op and the page carries on without sparkles.
#[derive(Clone)]
pub struct SparkleSystem {
	engine: Rc<RefCell<Option<BrowserEngine>>>,
}

impl SparkleSystem {
	/// Binds to the canvas with DOM id `canvas_id`. The field starts idle.
	pub fn new(canvas_id: &str, config: &SparkleConfig) -> Self {
		let engine: Rc<RefCell<Option<BrowserEngine>>> = Rc::new(RefCell::new(None));

		let surface = match CanvasSurface::resolve(canvas_id) {
			Ok(surface) => surface,
			Err(e) => {
				warn!("sparkle: #{canvas_id} unavailable, running inert: {e}");
				return Self { engine };
			}
		};
		let Some(window) = web_sys::window() else {
			return Self { engine };
		};

		let on_frame: FrameCallback = Rc::new(RefCell::new(None));
		let engine_frame = Rc::downgrade(&engine);
		*on_frame.borrow_mut() = Some(Closure::new(move || {
			with_engine(&engine_frame, |e| {
				e.on_frame();
			});
		}));

		let engine_resize = Rc::downgrade(&engine);
		let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
			with_engine(&engine_resize, BrowserEngine::resize);
		});
		let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

		let rng = match config.seed {
			Some(seed) => SmallRng::seed_from_u64(seed),
			None => SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64),
		};
		let host = BrowserHost {
			window,
			on_frame,
			on_resize: Some(on_resize),
		};
		*engine.borrow_mut() = Some(SparkleEngine::new(
			surface,
			host,
			config.capacity,
			SparkleStyle::default(),
			rng,
		));
		debug!("sparkle: bound to #{canvas_id} (capacity {})", config.capacity);

		Self { engine }
	}

	/// True when no canvas was bound.
	pub fn is_inert(&self) -> bool {
		self.engine.borrow().is_none()
	}

	/// Starts animating. No-op when already running, inert or destroyed.
	pub fn start(&self) {
		if let Some(ref mut e) = *self.engine.borrow_mut() {
			e.start();
		}
	}

	/// Pauses animating and keeps the sparkles.
	pub fn stop(&self) {
		if let Some(ref mut e) = *self.engine.borrow_mut() {
			e.stop();
		}
	}

	/// Stops the field and detaches it from the window. Further calls are no-ops.
	pub fn destroy(&self) {
		if let Some(ref mut e) = *self.engine.borrow_mut() {
			e.destroy();
		}
	}

	/// True while the field animates.
	pub fn is_running(&self) -> bool {
		self.engine.borrow().as_ref().is_some_and(|e| e.is_running())
	}

	/// Target sparkle count; 0 when inert.
	pub fn capacity(&self) -> usize {
		self.engine.borrow().as_ref().map_or(0, |e| e.capacity())
	}

	/// Changes the target sparkle count, applied on the next frame.
	pub fn set_capacity(&self, capacity: usize) {
		if let Some(ref mut e) = *self.engine.borrow_mut() {
			e.set_capacity(capacity);
		}
	}

	/// Sparkles currently alive.
	pub fn particle_count(&self) -> usize {
		self.engine.borrow().as_ref().map_or(0, |e| e.particle_count())
	}
}

fn with_engine(engine: &Weak<RefCell<Option<BrowserEngine>>>, f: impl FnOnce(&mut BrowserEngine)) {
	let Some(engine) = engine.upgrade() else {
		return;
	};
	// A callback firing while a handle method holds the engine is skipped.
	let Ok(mut guard) = engine.try_borrow_mut() else {
		return;
	};
	if let Some(ref mut e) = *guard {
		f(e);
	}
}
