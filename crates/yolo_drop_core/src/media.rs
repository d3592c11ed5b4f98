//! Media classification of user-selected files.

use serde::{Deserialize, Serialize};

use crate::constants::VIDEO_SUFFIX_FALLBACK;
use crate::error::UploadError;

/// The two media kinds the detection API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a file by its reported MIME type.
    ///
    /// Browsers report AVI containers inconsistently (empty, octet-stream,
    /// sometimes a bogus type), so an `.avi` name always means video.
    /// Returns `None` for anything that is neither an image nor a video.
    pub fn classify(mime: &str, file_name: &str) -> Option<Self> {
        if file_name.to_lowercase().ends_with(VIDEO_SUFFIX_FALLBACK) || mime.starts_with("video/") {
            Some(Self::Video)
        } else if mime.starts_with("image/") {
            Some(Self::Image)
        } else {
            None
        }
    }

    /// Like [`MediaKind::classify`], but an unsupported file is an error.
    pub fn require(mime: &str, file_name: &str) -> Result<Self, UploadError> {
        Self::classify(mime, file_name).ok_or_else(|| UploadError::unsupported(file_name, mime))
    }

    /// Lowercase name used by the API and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime_types() {
        for mime in ["image/jpeg", "image/png", "image/gif", "image/webp", "image/bmp"] {
            assert_eq!(MediaKind::classify(mime, "photo"), Some(MediaKind::Image));
        }
    }

    #[test]
    fn test_video_mime_types() {
        for mime in ["video/mp4", "video/quicktime", "video/webm"] {
            assert_eq!(MediaKind::classify(mime, "clip"), Some(MediaKind::Video));
        }
    }

    #[test]
    fn test_avi_suffix_wins_over_missing_or_wrong_mime() {
        assert_eq!(MediaKind::classify("", "clip.avi"), Some(MediaKind::Video));
        assert_eq!(MediaKind::classify("", "CLIP.AVI"), Some(MediaKind::Video));
        assert_eq!(
            MediaKind::classify("application/octet-stream", "clip.Avi"),
            Some(MediaKind::Video)
        );
        assert_eq!(
            MediaKind::classify("image/x-ms-bmp", "clip.avi"),
            Some(MediaKind::Video)
        );
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(MediaKind::classify("application/pdf", "doc.pdf"), None);
        assert_eq!(MediaKind::classify("text/plain", "notes.txt"), None);
        assert_eq!(MediaKind::classify("", "archive.avi.zip"), None);
    }

    #[test]
    fn test_require_reports_name_and_type() {
        assert_eq!(MediaKind::require("video/mp4", "a.mp4").ok(), Some(MediaKind::Video));

        let err = MediaKind::require("application/pdf", "report.pdf").unwrap_err();
        assert!(matches!(
            &err,
            UploadError::UnsupportedInput { name, mime } if name == "report.pdf" && mime == "application/pdf"
        ));
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "Unsupported file 'report.pdf' (application/pdf)");
    }
}
