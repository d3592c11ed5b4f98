//! Simulated upload progress.
//!
//! The browser gives no upload progress for a plain `fetch`, so the bar
//! advances on a timer and only reaches 100% once the response is in.

use crate::config::ProgressConfig;

/// Highest value the simulation may show before the response is in
pub const MAX_SIMULATED: u8 = 99;

/// Percentage shown in the progress bar during one submission.
#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    value: u8,
    step: u8,
    cap: u8,
}

impl ProgressSimulator {
    /// Start at 0%.
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            value: 0,
            step: config.step,
            cap: config.cap.min(MAX_SIMULATED),
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Advance by one step while below the cap.
    ///
    /// Returns the new value, or `None` when the cap was already reached.
    /// The last step is cut short so the value lands exactly on the cap.
    pub fn advance(&mut self) -> Option<u8> {
        if self.value >= self.cap {
            return None;
        }
        self.value = self.value.saturating_add(self.step).min(self.cap);
        Some(self.value)
    }

    /// Response arrived: jump to 100%.
    pub fn complete(&mut self) -> u8 {
        self.value = 100;
        self.value
    }
}
