//! Sparkle engine lifecycle.
//!
//! [`SparkleEngine`] ties a [`SparkleField`] to a drawing surface and a frame
//! host, and runs it as a small state machine:
//!
//! ```text
//!   Idle --start--> Running --stop--> Idle
//!     \                |
//!      +---destroy-----+-----> Destroyed (terminal)
//! ```
//!
//! While running, each host frame calls [`SparkleEngine::on_frame`], which
//! renders one frame and requests the next. At most one frame is pending at a
//! time, and stopping cancels it.

use log::{debug, warn};
use rand::rngs::SmallRng;

use super::scale::Viewport;
use super::state::{FrameStats, SparkleField};
use super::surface::DrawSurface;
use super::theme::SparkleStyle;

/// Host services the engine needs besides drawing.
pub trait FrameHost {
	/// Identifies a scheduled frame so it can be cancelled.
	type Handle;

	/// Current logical viewport and device pixel ratio.
	fn viewport(&self) -> Viewport;
	/// Schedules one call to the engine's `on_frame`. `None` if the host refused.
	fn request_frame(&mut self) -> Option<Self::Handle>;
	/// Cancels a frame that has not fired yet.
	fn cancel_frame(&mut self, handle: Self::Handle);
	/// Drops host registrations (resize listener, frame callback).
	fn release(&mut self);
}

/// Lifecycle state of a [`SparkleEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
	/// Not animating; sparkles are kept.
	Idle,
	/// A frame is rendered on every host tick.
	Running,
	/// Torn down. Every operation is a no-op.
	Destroyed,
}

/// A sparkle field bound to a surface and driven by a frame host.
pub struct SparkleEngine<S: DrawSurface, H: FrameHost> {
	field: SparkleField,
	style: SparkleStyle,
	surface: S,
	host: H,
	rng: SmallRng,
	state: EngineState,
	pending: Option<H::Handle>,
}

impl<S: DrawSurface, H: FrameHost> SparkleEngine<S, H> {
	/// Builds an idle engine and sizes the surface to the host viewport.
	pub fn new(surface: S, host: H, capacity: usize, style: SparkleStyle, rng: SmallRng) -> Self {
		let mut engine = Self {
			field: SparkleField::new(capacity, 0.0, 0.0),
			style,
			surface,
			host,
			rng,
			state: EngineState::Idle,
			pending: None,
		};
		engine.resize();
		engine
	}

	/// Current lifecycle state.
	pub fn state(&self) -> EngineState {
		self.state
	}

	/// True while frames are being rendered.
	pub fn is_running(&self) -> bool {
		self.state == EngineState::Running
	}

	/// Target sparkle count.
	pub fn capacity(&self) -> usize {
		self.field.capacity()
	}

	/// Changes the target sparkle count. Ignored once destroyed.
	pub fn set_capacity(&mut self, capacity: usize) {
		if self.state == EngineState::Destroyed {
			return;
		}
		self.field.set_capacity(capacity);
	}

	/// Sparkles currently alive.
	pub fn particle_count(&self) -> usize {
		self.field.sparkles.len()
	}

	/// The simulated field.
	pub fn field(&self) -> &SparkleField {
		&self.field
	}

	/// The surface being drawn on.
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// The frame host.
	pub fn host(&self) -> &H {
		&self.host
	}

	/// Re-reads the viewport, resizes the backing buffer and the field.
	pub fn resize(&mut self) {
		if self.state == EngineState::Destroyed {
			return;
		}
		let viewport = self.host.viewport();
		self.surface.configure(&viewport);
		self.field.resize(viewport.width, viewport.height);
	}

	/// Starts animating. Renders the first frame immediately.
	pub fn start(&mut self) {
		if self.state != EngineState::Idle {
			return;
		}
		debug!("sparkle: start ({} sparkles retained)", self.particle_count());
		self.state = EngineState::Running;
		self.on_frame();
	}

	/// Pauses animating. Sparkles are kept for the next `start`.
	pub fn stop(&mut self) {
		if self.state == EngineState::Running {
			debug!("sparkle: stop");
			self.state = EngineState::Idle;
		}
		if let Some(handle) = self.pending.take() {
			self.host.cancel_frame(handle);
		}
	}

	/// Stops for good and releases host registrations.
	pub fn destroy(&mut self) {
		if self.state == EngineState::Destroyed {
			return;
		}
		self.stop();
		self.host.release();
		self.state = EngineState::Destroyed;
		debug!("sparkle: destroyed");
	}

	/// Frame callback. Renders one frame and schedules the next while running.
	pub fn on_frame(&mut self) -> Option<FrameStats> {
		// The pending frame is the one firing now.
		self.pending = None;
		if self.state != EngineState::Running {
			return None;
		}

		let stats = self
			.field
			.step(&mut self.surface, &self.style, &mut self.rng);

		self.pending = self.host.request_frame();
		if self.pending.is_none() {
			// Nothing will call us again; go idle so `start` can re-arm the loop.
			warn!("sparkle: host refused to schedule the next frame");
			self.state = EngineState::Idle;
		}
		Some(stats)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::sparkle_field::particles::OPACITY_MAX;
	use crate::components::sparkle_field::testing::{ManualHost, Op, RecordingSurface};
	use rand::SeedableRng;

	type TestEngine = SparkleEngine<RecordingSurface, ManualHost>;

	fn engine(capacity: usize) -> TestEngine {
		SparkleEngine::new(
			RecordingSurface::default(),
			ManualHost::new(800.0, 600.0, 1.0),
			capacity,
			SparkleStyle::default(),
			SmallRng::seed_from_u64(99),
		)
	}

	/// Fires the pending frame the way the browser would.
	fn tick(engine: &mut TestEngine) -> Option<FrameStats> {
		engine.host.take_frame()?;
		engine.on_frame()
	}

	#[test]
	fn test_new_engine_is_idle_and_sized() {
		let e = engine(40);
		assert_eq!(e.state(), EngineState::Idle);
		assert_eq!(e.particle_count(), 0);
		assert_eq!(e.field().width, 800.0);
		assert_eq!(e.field().height, 600.0);
		assert!(e.host().pending.is_empty());
		assert_eq!(e.surface().buffer, (800, 600));
	}

	#[test]
	fn test_start_renders_and_schedules_once() {
		let mut e = engine(40);
		e.start();
		assert!(e.is_running());
		assert_eq!(e.particle_count(), 40);
		assert_eq!(e.host().pending.len(), 1);

		e.start();
		assert_eq!(e.host().pending.len(), 1);
		assert_eq!(e.host().requests, 1);
	}

	#[test]
	fn test_one_frame_end_to_end() {
		let mut e = engine(40);
		e.start();
		let stats = tick(&mut e).expect("frame should run");
		assert_eq!(stats.drawn, 40);
		assert_eq!(e.particle_count(), 40);
		for alpha in e.surface().fills() {
			assert!((0.0..=OPACITY_MAX).contains(&alpha));
		}
		assert_eq!(e.host().pending.len(), 1);
	}

	#[test]
	fn test_stop_cancels_and_keeps_sparkles() {
		let mut e = engine(12);
		e.start();
		tick(&mut e);
		let before: Vec<(f64, f64)> = e.field().sparkles.iter().map(|s| (s.x, s.y)).collect();

		e.stop();
		assert!(!e.is_running());
		assert!(e.host().pending.is_empty());
		assert_eq!(e.host().cancelled.len(), 1);
		assert_eq!(e.particle_count(), 12);

		e.stop();
		assert_eq!(e.host().cancelled.len(), 1);

		e.start();
		assert_eq!(e.particle_count(), 12);
		// Same sparkles, one step further along.
		let after: Vec<(f64, f64)> = e.field().sparkles.iter().map(|s| (s.x, s.y)).collect();
		for ((bx, by), (ax, ay)) in before.iter().zip(&after) {
			assert!((bx - ax).abs() <= 0.15 && (by - ay).abs() <= 0.15);
		}
	}

	#[test]
	fn test_late_frame_after_stop_does_nothing() {
		let mut e = engine(5);
		e.start();
		e.stop();
		let requests = e.host().requests;
		assert_eq!(e.on_frame(), None);
		assert_eq!(e.host().requests, requests);
		assert!(e.host().pending.is_empty());
	}

	#[test]
	fn test_destroy_is_terminal() {
		let mut e = engine(8);
		e.start();
		e.destroy();
		assert_eq!(e.state(), EngineState::Destroyed);
		assert!(e.host().released);
		assert!(e.host().pending.is_empty());

		e.start();
		e.stop();
		e.resize();
		e.set_capacity(100);
		e.destroy();
		assert_eq!(e.on_frame(), None);
		assert_eq!(e.state(), EngineState::Destroyed);
		assert_eq!(e.capacity(), 8);
		assert!(e.host().pending.is_empty());
		assert_eq!(e.host().requests, 1);
	}

	#[test]
	fn test_destroy_idle_engine() {
		let mut e = engine(8);
		e.destroy();
		assert!(e.host().released);
		assert!(e.host().cancelled.is_empty());
		e.start();
		assert_eq!(e.particle_count(), 0);
	}

	#[test]
	fn test_capacity_change_applies_next_frame() {
		let mut e = engine(40);
		e.set_capacity(25);
		e.start();
		assert_eq!(e.particle_count(), 25);

		e.set_capacity(30);
		tick(&mut e);
		assert_eq!(e.particle_count(), 30);

		e.set_capacity(5);
		assert_eq!(e.particle_count(), 5);
	}

	#[test]
	fn test_resize_scales_drawing() {
		let mut e = SparkleEngine::new(
			RecordingSurface::default(),
			ManualHost::new(800.0, 600.0, 3.0),
			0,
			SparkleStyle::default(),
			SmallRng::seed_from_u64(1),
		);
		assert_eq!(e.surface().buffer, (1600, 1200));
		assert_eq!(e.surface().ratio, 2.0);

		e.surface.move_to(400.0, 300.0);
		assert_eq!(e.surface().physical_path, vec![(800.0, 600.0)]);
		assert_eq!(e.field().width, 800.0);

		e.host.viewport = Viewport::new(1024.0, 768.0, 1.0);
		e.resize();
		assert_eq!(e.surface().buffer, (1024, 768));
		assert_eq!(
			e.surface().ops.last(),
			Some(&Op::Configure {
				width: 1024,
				height: 768,
				ratio: 1.0
			})
		);
		assert_eq!((e.field().width, e.field().height), (1024.0, 768.0));
	}

	#[test]
	fn test_refused_frame_allows_restart() {
		let mut e = engine(3);
		e.host.refuse_frames = true;
		e.start();
		assert_eq!(e.state(), EngineState::Idle);
		assert!(e.host().pending.is_empty());
		assert_eq!(e.particle_count(), 3);
		e.stop();
		assert!(e.host().cancelled.is_empty());

		e.host.refuse_frames = false;
		e.start();
		assert!(e.is_running());
		assert_eq!(e.host().pending.len(), 1);
		assert_eq!(e.particle_count(), 3);
	}
}
