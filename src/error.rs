//! Error types for mounting the widget on the page.

use thiserror::Error;

/// Errors raised while binding the widget to the DOM.
#[derive(Error, Debug)]
pub enum DomError {
    /// No global `window` (not running in a browser main thread)
    #[error("No global window exists")]
    NoWindow,

    /// Window has no document
    #[error("No document in window")]
    NoDocument,

    /// A required element is not on the page
    #[error("Missing element: {selector}")]
    MissingElement {
        /// Id or CSS selector that matched nothing
        selector: String,
    },

    /// An element exists but has the wrong tag
    #[error("Element {selector} is not a {expected}")]
    WrongElementType {
        /// Id or CSS selector of the element
        selector: String,
        /// Expected element interface, e.g. `HTMLVideoElement`
        expected: &'static str,
    },

    /// A DOM call threw
    #[error("DOM error: {0}")]
    Js(String),
}

impl DomError {
    /// Create a missing element error.
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }

    /// Create a wrong element type error.
    pub fn wrong_type(selector: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongElementType {
            selector: selector.into(),
            expected,
        }
    }
}
