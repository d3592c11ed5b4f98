//! Tables shown next to the annotated media.
//!
//! Turns an [`AnalysisResult`] into display rows: a short metadata table and
//! one row per detected class.

use indexmap::IndexMap;

use crate::constants::text;
use crate::response::{AnalysisResult, Detection, ImageAnalysis, VideoAnalysis};

/// One `label | value` row of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub label: &'static str,
    pub value: String,
}

impl MetadataRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// One entry of the detection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionRow {
    /// A class and how many times it was detected
    Class { class_name: String, count: usize },
    /// Shown instead of class rows when nothing was detected
    NoDetections,
}

impl DetectionRow {
    /// Text of the row's label.
    pub fn label(&self) -> &str {
        match self {
            DetectionRow::Class { class_name, .. } => class_name,
            DetectionRow::NoDetections => text::NO_DETECTIONS,
        }
    }

    /// Text of the badge next to the label.
    ///
    /// The badge sits in the slot styled as a confidence badge but shows the
    /// detection count.
    pub fn badge(&self) -> Option<String> {
        match self {
            DetectionRow::Class { count, .. } => {
                Some(format!("{} {}", count, text::DETECTION_COUNT_SUFFIX))
            }
            DetectionRow::NoDetections => None,
        }
    }
}

/// Everything rendered for one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    pub metadata: Vec<MetadataRow>,
    pub detections: Vec<DetectionRow>,
}

impl ResultSummary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let metadata = match result {
            AnalysisResult::Image(image) => image_metadata(image),
            AnalysisResult::Video(video) => video_metadata(video),
        };
        Self {
            metadata,
            detections: detection_rows(result.detections()),
        }
    }
}

fn image_metadata(image: &ImageAnalysis) -> Vec<MetadataRow> {
    let means = image
        .mean_values
        .iter()
        .map(|value| js_round(*value).to_string())
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        MetadataRow::new(text::IMAGE_DIMENSIONS, image.dimensions.as_str()),
        MetadataRow::new(
            text::IMAGE_FORMAT,
            image.format.as_deref().unwrap_or(text::NOT_AVAILABLE),
        ),
        MetadataRow::new(text::IMAGE_MODE, image.mode.as_str()),
        MetadataRow::new(text::IMAGE_MEAN, means),
    ]
}

fn video_metadata(video: &VideoAnalysis) -> Vec<MetadataRow> {
    vec![
        MetadataRow::new(
            text::VIDEO_DIMENSIONS,
            format!("{}x{}", video.width, video.height),
        ),
        MetadataRow::new(text::VIDEO_FRAMES, video.total_frames.to_string()),
        MetadataRow::new(text::VIDEO_FPS, video.fps.to_string()),
        MetadataRow::new(
            text::VIDEO_PROCESSING_TIME,
            processing_time(video.total_frames, video.fps),
        ),
    ]
}

/// Playback length in whole seconds, shown as the processing time estimate.
fn processing_time(total_frames: i64, fps: f64) -> String {
    if total_frames < 0 || !(fps.is_finite() && fps > 0.0) {
        return text::NOT_AVAILABLE.to_string();
    }
    format!(
        "{}{}",
        js_round(total_frames as f64 / fps),
        text::SECONDS_SUFFIX
    )
}

/// Round half toward positive infinity, like JavaScript's `Math.round`.
fn js_round(value: f64) -> i64 {
    // value - floor is exact, unlike value + 0.5
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Count detections per class, keeping the order classes were first seen.
pub fn count_by_class(detections: &[Detection]) -> IndexMap<&str, usize> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for detection in detections {
        *counts.entry(detection.class_name.as_str()).or_insert(0) += 1;
    }
    counts
}

fn detection_rows(detections: &[Detection]) -> Vec<DetectionRow> {
    let counts = count_by_class(detections);
    if counts.is_empty() {
        return vec![DetectionRow::NoDetections];
    }
    counts
        .into_iter()
        .map(|(class_name, count)| DetectionRow::Class {
            class_name: class_name.to_string(),
            count,
        })
        .collect()
}
