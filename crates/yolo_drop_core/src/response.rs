//! Detection API response model.
//!
//! The upload endpoint answers with a loosely typed envelope:
//!
//! ```json
//! { "success": true, "type": "image", "filename": "cat.jpg",
//!   "analysis": { "dimensions": "640x480", "detections": [{"class": "cat"}], ... } }
//! ```
//!
//! [`UploadResponse::into_result`] turns it into a typed [`AnalysisResult`]
//! or the matching [`UploadError`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::UploadError;
use crate::media::MediaKind;

/// Raw response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Missing counts as failure
    #[serde(default)]
    pub success: bool,
    /// Media kind of the analysis payload; only read on success
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Server-provided failure message
    #[serde(default)]
    pub error: Option<String>,
    /// Name the server stored the upload under
    #[serde(default)]
    pub filename: Option<String>,
    /// Kind-specific payload, decoded once `kind` is known
    #[serde(default)]
    pub analysis: Option<Value>,
}

/// One detected object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Detection {
    /// Class label, e.g. `person`
    #[serde(rename = "class")]
    pub class_name: String,
    /// Confidence in percent, not shown in the summary
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Detection {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            confidence: None,
        }
    }
}

/// Analysis of an uploaded image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageAnalysis {
    /// `WIDTHxHEIGHT`
    pub dimensions: String,
    /// Container format as detected by the server; absent for raw buffers
    #[serde(default)]
    pub format: Option<String>,
    /// Pixel mode, e.g. `RGB`
    pub mode: String,
    /// Per-channel means
    pub mean_values: Vec<f64>,
    #[serde(default)]
    pub detections: Vec<Detection>,
    /// Annotated image, relative to the media directory
    #[serde(default)]
    pub result_image: Option<String>,
}

/// Analysis of an uploaded video.
///
/// Sizes and counts come straight from the decoder and are negative when it
/// cannot tell, e.g. a frame count of -1 for streams of unknown length.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoAnalysis {
    pub width: i64,
    pub height: i64,
    pub total_frames: i64,
    pub fps: f64,
    #[serde(default)]
    pub detections: Vec<Detection>,
    /// Annotated video, relative to the media directory
    #[serde(default)]
    pub output_video: Option<String>,
}

/// Typed analysis result.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Image(ImageAnalysis),
    Video(VideoAnalysis),
}

impl AnalysisResult {
    pub fn kind(&self) -> MediaKind {
        match self {
            AnalysisResult::Image(_) => MediaKind::Image,
            AnalysisResult::Video(_) => MediaKind::Video,
        }
    }

    pub fn detections(&self) -> &[Detection] {
        match self {
            AnalysisResult::Image(analysis) => &analysis.detections,
            AnalysisResult::Video(analysis) => &analysis.detections,
        }
    }

    /// Relative path of the annotated media, if the server produced one.
    pub fn media_path(&self) -> Option<&str> {
        let path = match self {
            AnalysisResult::Image(analysis) => analysis.result_image.as_deref(),
            AnalysisResult::Video(analysis) => analysis.output_video.as_deref(),
        };
        path.filter(|path| !path.is_empty())
    }
}

impl UploadResponse {
    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self, UploadError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Resolve the envelope into a typed result.
    ///
    /// A missing or false `success` flag yields [`UploadError::ServerRejected`];
    /// a successful envelope without a usable payload is malformed.
    pub fn into_result(self) -> Result<AnalysisResult, UploadError> {
        if !self.success {
            return Err(UploadError::ServerRejected {
                message: self.error.unwrap_or_default(),
            });
        }

        let kind = match self.kind.as_deref() {
            Some("image") => MediaKind::Image,
            Some("video") => MediaKind::Video,
            Some(other) => {
                return Err(UploadError::malformed(format!("unknown type '{}'", other)));
            }
            None => return Err(UploadError::malformed("missing 'type'")),
        };
        let analysis = self
            .analysis
            .ok_or_else(|| UploadError::malformed("missing 'analysis'"))?;

        let result = match kind {
            MediaKind::Image => AnalysisResult::Image(serde_json::from_value(analysis)?),
            MediaKind::Video => AnalysisResult::Video(serde_json::from_value(analysis)?),
        };
        Ok(result)
    }
}
