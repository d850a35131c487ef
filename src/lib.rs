/// Discussions - browser extension and dashboard helpers
/// Built with Rust + WASM

mod background;
mod badge;
pub mod browser;
pub mod config;
mod error;
pub mod host;
mod launcher;
mod preview;
mod sync;
mod tab_data;

#[cfg(test)]
mod testing;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub use badge::BadgeState;
pub use config::Config;
pub use error::ExtensionError;
pub use launcher::{DiscussionLauncher, discussions_url, encode_component};
pub use preview::{FieldValue, FormPayload, LivePreview};
pub use sync::{BadgeSynchronizer, decode_counts};
pub use tab_data::{CreateTabProperties, DiscussionCounts, TabInfo, TabUrlChanged};

use browser::chrome::{ChromeAction, ChromeEvents, ChromeTabs};
use browser::http::CountsApi;
use host::LocalTask;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Read an optional JS config object; `undefined`/`null` keeps the defaults
fn config_from_js(config: JsValue) -> Result<Config, ExtensionError> {
    if config.is_null() || config.is_undefined() {
        return Ok(Config::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}

// Start the badge synchronizer and the discussion launcher in the service worker
#[wasm_bindgen]
pub fn start_background() {
    run_background(Config::default());
}

#[wasm_bindgen]
pub fn start_background_with_config(config: JsValue) -> Result<(), JsValue> {
    run_background(config_from_js(config)?);
    Ok(())
}

fn run_background(config: Config) {
    let synchronizer = Rc::new(BadgeSynchronizer::new(
        CountsApi::new(config.api),
        ChromeAction,
        config.badge,
    ));
    let launcher = Rc::new(DiscussionLauncher::new(ChromeTabs, config.launcher));

    background::attach(
        &ChromeEvents,
        synchronizer,
        launcher,
        Rc::new(|task: LocalTask| spawn_local(task)),
    );
    log::info!("Discussions background started");
}

// Start the mention rule live preview on the dashboard page
#[wasm_bindgen]
pub fn start_mention_preview() -> Result<(), JsValue> {
    browser::dom::install_when_ready(Config::default().preview)?;
    Ok(())
}

#[wasm_bindgen]
pub fn start_mention_preview_with_config(config: JsValue) -> Result<(), JsValue> {
    browser::dom::install_when_ready(config_from_js(config)?.preview)?;
    Ok(())
}
