//! The invitation's two sparkle fields and the reveal that hands over between them.

use std::cell::Cell;
use std::time::Duration;

use leptos::prelude::set_timeout;
use log::info;

use super::component::SparkleSystem;
use super::types::StageConfig;

/// Something that happens a fixed delay after the envelope is opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
	/// Start the field behind the invitation card.
	StartInvitation,
	/// Tear down the field behind the envelope.
	RetireEnvelope,
}

/// Timed cues for a reveal, in firing order.
pub fn reveal_cues(config: &StageConfig) -> Vec<(Duration, Cue)> {
	let mut cues = vec![
		(
			Duration::from_millis(config.reveal_delay_ms),
			Cue::StartInvitation,
		),
		(
			Duration::from_millis(config.retire_delay_ms),
			Cue::RetireEnvelope,
		),
	];
	cues.sort_by_key(|(delay, _)| *delay);
	cues
}

/// Owns the envelope and invitation sparkle fields.
///
/// The envelope field animates from construction; the invitation field waits
/// idle until [`SparkleStage::open`].
pub struct SparkleStage {
	envelope: SparkleSystem,
	invitation: SparkleSystem,
	cues: Vec<(Duration, Cue)>,
	opened: Cell<bool>,
}

impl SparkleStage {
	/// Binds both canvases and starts the envelope field.
	pub fn new(config: &StageConfig) -> Self {
		let envelope = SparkleSystem::new(&config.envelope_canvas, &config.envelope);
		envelope.start();
		let invitation = SparkleSystem::new(&config.invitation_canvas, &config.invitation);

		Self {
			envelope,
			invitation,
			cues: reveal_cues(config),
			opened: Cell::new(false),
		}
	}

	/// Field behind the envelope.
	pub fn envelope(&self) -> &SparkleSystem {
		&self.envelope
	}

	/// Field behind the invitation card.
	pub fn invitation(&self) -> &SparkleSystem {
		&self.invitation
	}

	/// Whether [`SparkleStage::open`] has been called.
	pub fn is_opened(&self) -> bool {
		self.opened.get()
	}

	/// Schedules the hand-over from the envelope field to the invitation
	/// field. Only the first call does anything.
	pub fn open(&self) {
		if self.opened.replace(true) {
			return;
		}
		info!("sparkle: envelope opened");

		for &(delay, cue) in &self.cues {
			let target = match cue {
				Cue::StartInvitation => self.invitation.clone(),
				Cue::RetireEnvelope => self.envelope.clone(),
			};
			set_timeout(move || apply(cue, &target), delay);
		}
	}
}

fn apply(cue: Cue, system: &SparkleSystem) {
	match cue {
		Cue::StartInvitation => system.start(),
		Cue::RetireEnvelope => system.destroy(),
	}
}
