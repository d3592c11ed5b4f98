use std::rc::Rc;

use wasm_bindgen::prelude::*;

use yolo_drop_core::{UploadConfig, UploadController, logging};

use crate::dom::{DomView, read_page_config};
use crate::error::DomError;
use crate::events;
use crate::web_backend::WebBackend;

/// Controller wired to the real page.
pub type WebController = UploadController<DomView, WebBackend>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(e) = mount() {
        // The logger may not be up yet
        web_sys::console::error_1(&format!("YOLO upload widget failed to start: {}", e).into());
    }
}

fn mount() -> Result<(), DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let document = window.document().ok_or(DomError::NoDocument)?;

    let (config, config_error) = match read_page_config(&document) {
        Ok(config) => (config, None),
        Err(e) => (UploadConfig::default(), Some(e)),
    };
    logging::init(config.log_level);
    if let Some(e) = config_error {
        log::warn!("Ignoring page configuration: {}", e);
    }

    let view = DomView::from_document(&document)?;
    let backend = WebBackend::new(window, view.video_preview().clone());
    log::info!("Detection API at {}", config.api_base_url);

    let controller = Rc::new(UploadController::new(config, view, backend));
    events::bind(&controller)?;
    controller.reset();

    log::info!("YOLO upload widget ready");
    Ok(())
}
