//! Configuration for the upload widget.
//!
//! Every field has a compiled-in default. A page can override any subset by
//! embedding a JSON document; nothing is ever written back.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_NOTICE_TTL_MS, DEFAULT_PROGRESS_CAP, DEFAULT_PROGRESS_FADE_MS,
    DEFAULT_PROGRESS_STEP, DEFAULT_PROGRESS_TICK_MS, DEFAULT_UPLOAD_FIELD, MEDIA_PATH, UPLOAD_PATH,
};
use crate::progress::MAX_SIMULATED;

/// Log level setting for the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration format version.
pub const CONFIG_VERSION: u32 = 1;

/// Timing of the simulated progress bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Milliseconds between two simulated steps
    pub tick_ms: u64,
    /// Percentage added per step
    pub step: u8,
    /// Highest value reachable before the response arrives
    pub cap: u8,
    /// Milliseconds the full bar stays visible before it is hidden
    pub fade_out_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_PROGRESS_TICK_MS,
            step: DEFAULT_PROGRESS_STEP,
            cap: DEFAULT_PROGRESS_CAP,
            fade_out_ms: DEFAULT_PROGRESS_FADE_MS,
        }
    }
}

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Version of the configuration format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Base URL of the detection API, without trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Multipart field name carrying the file
    #[serde(default = "default_upload_field")]
    pub upload_field: String,

    /// Progress bar simulation
    #[serde(default)]
    pub progress: ProgressConfig,

    /// Lifetime of a notice in milliseconds
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_upload_field() -> String {
    DEFAULT_UPLOAD_FIELD.to_string()
}

fn default_notification_ttl_ms() -> u64 {
    DEFAULT_NOTICE_TTL_MS
}

impl UploadConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            api_base_url: default_api_base_url(),
            upload_field: default_upload_field(),
            progress: ProgressConfig::default(),
            notification_ttl_ms: default_notification_ttl_ms(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.is_empty() {
            return Err(ConfigError::invalid("api_base_url must not be empty"));
        }
        if self.upload_field.is_empty() {
            return Err(ConfigError::invalid("upload_field must not be empty"));
        }
        if self.progress.tick_ms == 0 {
            return Err(ConfigError::invalid("progress.tick_ms must be positive"));
        }
        if self.progress.step == 0 {
            return Err(ConfigError::invalid("progress.step must be positive"));
        }
        if self.progress.cap == 0 || self.progress.cap > MAX_SIMULATED {
            return Err(ConfigError::invalid(format!(
                "progress.cap must be between 1 and {}, got {}",
                MAX_SIMULATED, self.progress.cap
            )));
        }
        Ok(())
    }

    /// Endpoint the file is posted to.
    pub fn upload_url(&self) -> String {
        format!("{}/{}", self.api_base_url, UPLOAD_PATH)
    }

    /// Absolute URL of a media file produced by the API.
    pub fn media_url(&self, relative_path: &str) -> String {
        format!("{}/{}/{}", self.api_base_url, MEDIA_PATH, relative_path)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
