//! Scenario tests for the upload controller.
//!
//! The controller runs against a recording view and a scripted backend;
//! futures are driven with `pollster`.

mod lifecycle_tests;
mod mock;
