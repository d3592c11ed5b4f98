//! DOM event wiring (WASM only).
//!
//! Listeners live for the whole page, so their closures are leaked with
//! `forget()` once registered.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Event, EventTarget};

use crate::error::DomError;
use crate::wasm::WebController;
use crate::web_backend::files_of;

fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), DomError>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| DomError::Js(format!("{:?}", e)))?;
    closure.forget(); // Leak the closure to keep it alive
    Ok(())
}

fn suppress_default(event: &Event) {
    event.prevent_default();
    event.stop_propagation();
}

/// Register every listener the widget needs.
pub fn bind(controller: &Rc<WebController>) -> Result<(), DomError> {
    let view = controller.view();
    let drop_zone: &EventTarget = view.drop_zone();

    for name in ["dragenter", "dragover"] {
        let ctrl = Rc::clone(controller);
        listen(drop_zone, name, move |event: DragEvent| {
            suppress_default(&event);
            ctrl.drag_enter();
        })?;
    }

    let ctrl = Rc::clone(controller);
    listen(drop_zone, "dragleave", move |event: DragEvent| {
        suppress_default(&event);
        ctrl.drag_leave();
    })?;

    let ctrl = Rc::clone(controller);
    listen(drop_zone, "drop", move |event: DragEvent| {
        suppress_default(&event);
        ctrl.drag_leave();

        let files = files_of(event.data_transfer().and_then(|transfer| transfer.files()));
        log::debug!("📂 {} file(s) dropped", files.len());
        let ctrl = Rc::clone(&ctrl);
        wasm_bindgen_futures::spawn_local(async move {
            ctrl.acquire_file(files).await;
        });
    })?;

    let ctrl = Rc::clone(controller);
    let input = view.file_input().clone();
    listen(view.file_input(), "change", move |_: Event| {
        let files = files_of(input.files());
        log::debug!("📂 {} file(s) picked", files.len());
        let ctrl = Rc::clone(&ctrl);
        wasm_bindgen_futures::spawn_local(async move {
            ctrl.acquire_file(files).await;
        });
    })?;

    let ctrl = Rc::clone(controller);
    listen(view.video_preview(), "error", move |_: Event| {
        ctrl.on_preview_error();
    })?;

    let reupload = view.append_reupload_button()?;
    let ctrl = Rc::clone(controller);
    listen(&reupload, "click", move |_: Event| {
        log::info!("Re-upload requested");
        ctrl.reset();
    })?;

    Ok(())
}
