//! yolo_drop_core - upload lifecycle for the YOLO detection widget.
//!
//! Platform-independent half of the widget: the [`UploadController`] state
//! machine, the detection API response model, the summary tables shown to the
//! user, the simulated progress bar and the notice model. The browser shell
//! plugs in through [`UploadView`] (DOM writes) and [`UploadBackend`] (file
//! reads, object URLs, network, timers).

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod host;
pub mod logging;
pub mod media;
pub mod notice;
pub mod object_url;
pub mod progress;
pub mod response;
pub mod summary;

pub use config::{ConfigError, LogLevel, ProgressConfig, UploadConfig};
pub use controller::{Phase, UploadController};
pub use error::UploadError;
pub use host::{SelectedFile, UploadBackend, UploadView};
pub use media::MediaKind;
pub use notice::{Notice, Severity};
pub use object_url::ObjectUrl;
pub use progress::ProgressSimulator;
pub use response::{AnalysisResult, Detection, ImageAnalysis, UploadResponse, VideoAnalysis};
pub use summary::{DetectionRow, MetadataRow, ResultSummary};
