//! sparkle-invite: Animated sparkle backgrounds for a web invitation.
//!
//! This crate provides a WASM-based particle field that twinkles behind the
//! invitation's envelope and card, plus the small Leptos shell that owns both
//! fields and hands over between them when the envelope is opened.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::sparkle_field::{SparkleConfig, SparkleStage, SparkleSystem, StageConfig};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("sparkle-invite: logging initialized");
}

/// Load stage settings from a script element with id="sparkle-config".
/// Expected format: JSON matching [`StageConfig`]; every field is optional.
fn load_stage_config() -> Option<StageConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("sparkle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<StageConfig>(&json_text) {
		Ok(config) => {
			info!(
				"sparkle-invite: loaded config (envelope {}, invitation {})",
				config.envelope.capacity, config.invitation.capacity
			);
			Some(config)
		}
		Err(e) => {
			warn!("sparkle-invite: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Renders both sparkle canvases and opens the envelope on click.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_stage_config().unwrap_or_default();
	let stage: Rc<RefCell<Option<SparkleStage>>> = Rc::new(RefCell::new(None));

	// Canvases are in the DOM once the view has mounted.
	let (stage_init, config_init) = (stage.clone(), config.clone());
	Effect::new(move |_| {
		if stage_init.borrow().is_none() {
			*stage_init.borrow_mut() = Some(SparkleStage::new(&config_init));
		}
	});

	let on_open = move |_: leptos::ev::MouseEvent| {
		if let Some(ref s) = *stage.borrow() {
			s.open();
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="You're Invited" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="invitation">
			<canvas id=config.envelope_canvas class="sparkle-canvas" aria-hidden="true" />
			<button class="envelope-button" on:click=on_open>"Open the invitation"</button>
			<canvas
				id=config.invitation_canvas
				class="sparkle-canvas sparkle-canvas--card"
				aria-hidden="true"
			/>
		</div>
	}
}
