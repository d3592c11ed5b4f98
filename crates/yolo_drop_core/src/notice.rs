//! Transient toast notices.

use std::cell::Cell;
use std::time::Duration;

/// Severity of a notice, selects its icon and style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

impl Severity {
    /// CSS class appended next to `notification`.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Success => "success",
        }
    }

    /// Font Awesome icon name (without the `fa-` prefix).
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "info-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Error => "exclamation-circle",
            Severity::Success => "check-circle",
        }
    }
}

/// A single notice shown on the page.
///
/// Notices stack: every one gets its own id and element, and the view removes
/// it on its own once `ttl` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Unique within one controller
    pub id: u64,
    /// Text shown to the user
    pub message: String,
    /// Icon and style selector
    pub severity: Severity,
    /// Time until automatic removal
    pub ttl: Duration,
}

/// Hands out notices with increasing ids.
#[derive(Debug)]
pub struct NoticeFactory {
    next_id: Cell<u64>,
    ttl: Duration,
}

impl NoticeFactory {
    /// Create a factory whose notices live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            next_id: Cell::new(1),
            ttl,
        }
    }

    /// Build the next notice.
    pub fn create(&self, message: impl Into<String>, severity: Severity) -> Notice {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Notice {
            id,
            message: message.into(),
            severity,
            ttl: self.ttl,
        }
    }
}
