//! Configuration for sparkle fields and the reveal stage.

use serde::{Deserialize, Deserializer};

/// Settings for one sparkle field.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SparkleConfig {
	/// Number of sparkles kept alive.
	pub capacity: usize,
	/// Fixed RNG seed. Unset means a fresh seed per page load.
	pub seed: Option<u64>,
}

impl SparkleConfig {
	/// Config with the given capacity and a fresh seed per page load.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			capacity,
			seed: None,
		}
	}
}

impl Default for SparkleConfig {
	fn default() -> Self {
		Self::with_capacity(40)
	}
}

/// Settings for the two-field invitation stage.
///
/// Read from a `<script id="sparkle-config" type="application/json">` element
/// when present. Every field is optional.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StageConfig {
	/// DOM id of the canvas behind the envelope.
	pub envelope_canvas: String,
	/// DOM id of the canvas behind the invitation card.
	pub invitation_canvas: String,
	/// Field behind the envelope. Missing keys default to capacity 40.
	#[serde(deserialize_with = "envelope_slot")]
	pub envelope: SparkleConfig,
	/// Field behind the card. Missing keys default to capacity 25.
	#[serde(deserialize_with = "invitation_slot")]
	pub invitation: SparkleConfig,
	/// Delay between opening and starting the invitation field.
	pub reveal_delay_ms: u64,
	/// Delay between opening and destroying the envelope field.
	pub retire_delay_ms: u64,
}

impl Default for StageConfig {
	fn default() -> Self {
		Self {
			envelope_canvas: "sparkle-canvas".to_string(),
			invitation_canvas: "sparkle-canvas-2".to_string(),
			envelope: SparkleConfig::with_capacity(40),
			invitation: SparkleConfig::with_capacity(25),
			reveal_delay_ms: 1400,
			retire_delay_ms: 2000,
		}
	}
}

/// Keys present in a field's JSON object; the rest come from the slot default.
#[derive(Deserialize)]
struct SparkleOverrides {
	capacity: Option<usize>,
	seed: Option<u64>,
}

impl SparkleOverrides {
	fn over(self, base: SparkleConfig) -> SparkleConfig {
		SparkleConfig {
			capacity: self.capacity.unwrap_or(base.capacity),
			seed: self.seed.or(base.seed),
		}
	}
}

fn envelope_slot<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SparkleConfig, D::Error> {
	SparkleOverrides::deserialize(deserializer).map(|o| o.over(StageConfig::default().envelope))
}

fn invitation_slot<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SparkleConfig, D::Error> {
	SparkleOverrides::deserialize(deserializer).map(|o| o.over(StageConfig::default().invitation))
}
