//! Advisor App: WASM entry point.
//!
//! This crate is the composition root. It loads the saved settings, builds
//! the platform adapters and hands them to the egui UI.

mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use advisor_platform::storage::open_storage;
use advisor_types::config::StorageBackendType;

const CANVAS_ID: &str = "advisor_canvas";

/// WASM entry point, called from index.html
#[wasm_bindgen(start)]
pub async fn main() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("MSFEA advisor starting...");

    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CANVAS_ID))
        .ok_or_else(|| JsValue::from_str("No canvas element with id 'advisor_canvas'"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    // Settings pick the conversation backend, so they always live in the
    // default store and are read before anything else is built
    let settings_store = open_storage(StorageBackendType::Auto);
    let config = app::load_config(settings_store.as_ref()).await;

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| Ok(Box::new(app::AdvisorApp::new(cc, config, settings_store)))),
            )
            .await;
        if let Err(e) = started {
            log::error!("Failed to start eframe: {:?}", e);
        }
    });

    Ok(())
}
