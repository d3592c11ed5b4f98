//! yolo_drop - drag-and-drop upload widget for a YOLO detection API.
//!
//! The browser shell around [`yolo_drop_core`]: binds the page's elements,
//! wraps the browser's file, timer and fetch APIs, and starts the upload
//! controller when the WASM module loads.

mod error;

pub use error::DomError;
pub use yolo_drop_core;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod web_backend;

#[cfg(target_arch = "wasm32")]
pub use wasm::start;
