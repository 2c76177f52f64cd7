//! Twinkling sparkle background for the invitation.
//!
//! Draws a bounded field of 4-point stars on an HTML canvas with:
//! - Per-frame spawning up to a configurable capacity
//! - Drift, ping-pong twinkle and an end-of-life fade
//! - Culling once a sparkle expires or drifts past the viewport margin
//! - Device-pixel-ratio aware sizing that follows window resizes
//!
//! The simulation ([`SparkleEngine`]) is written against the [`DrawSurface`]
//! and [`FrameHost`] traits; [`SparkleSystem`] binds it to a real canvas and
//! `requestAnimationFrame`.
//!
//! # Example
//!
//! ```ignore
//! use sparkle_invite::{SparkleConfig, SparkleSystem};
//!
//! let sparkles = SparkleSystem::new("sparkle-canvas", &SparkleConfig::default());
//! sparkles.start();
//! // ...later
//! sparkles.destroy();
//! ```

mod component;
mod engine;
mod particles;
mod render;
pub mod scale;
mod stage;
mod state;
mod surface;
#[cfg(test)]
mod testing;
pub mod theme;
mod types;

pub use component::SparkleSystem;
pub use engine::{EngineState, FrameHost, SparkleEngine};
pub use particles::Sparkle;
pub use stage::{Cue, SparkleStage, reveal_cues};
pub use state::{FrameStats, SparkleField};
pub use surface::{CanvasSurface, DrawSurface, SurfaceError};
pub use theme::{Color, SparkleStyle, SparkleTint};
pub use types::{SparkleConfig, StageConfig};
