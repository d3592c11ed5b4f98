//! Single-owner handle for browser object URLs.
//!
//! An object URL keeps the file bytes alive until it is revoked. The handle
//! is neither `Clone` nor `Copy`, and the backend's revoke consumes it, so a
//! URL can be released at most once.

use std::cell::RefCell;

/// A `blob:` URL created for the currently previewed file.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an object URL leaks its file until revoked"]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Wrap a URL freshly returned by `URL.createObjectURL`.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Give up ownership, returning the raw URL for the revoke call.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Holds at most one live object URL.
#[derive(Debug, Default)]
pub struct ObjectUrlSlot {
    current: RefCell<Option<ObjectUrl>>,
}

impl ObjectUrlSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `url`, returning the handle it supersedes (which must be revoked).
    pub fn replace(&self, url: ObjectUrl) -> Option<ObjectUrl> {
        self.current.borrow_mut().replace(url)
    }

    /// Empty the slot, returning the held handle if any.
    pub fn take(&self) -> Option<ObjectUrl> {
        self.current.borrow_mut().take()
    }

    pub fn is_held(&self) -> bool {
        self.current.borrow().is_some()
    }
}
