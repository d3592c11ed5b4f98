//! Error types for the upload lifecycle.

use thiserror::Error;

/// Errors that can occur while handling one uploaded file.
#[derive(Error, Debug)]
pub enum UploadError {
    /// File is neither an image nor a supported video
    #[error("Unsupported file '{name}' ({mime})")]
    UnsupportedInput {
        /// File name as reported by the browser
        name: String,
        /// MIME type as reported by the browser, possibly empty
        mime: String,
    },

    /// Local preview could not be produced
    #[error("Preview failed: {0}")]
    Preview(String),

    /// Request never produced a readable response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response is valid JSON but not a detection result
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Server answered with a failure flag
    #[error("Server rejected upload: {message}")]
    ServerRejected {
        /// Message reported by the server
        message: String,
    },
}

impl UploadError {
    /// Create an unsupported input error.
    pub fn unsupported(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self::UnsupportedInput {
            name: name.into(),
            mime: mime.into(),
        }
    }

    /// Create a preview error.
    pub fn preview(message: impl Into<String>) -> Self {
        Self::Preview(message.into())
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Whether the failure happened below the application protocol.
    ///
    /// These get the generic notice instead of a server-provided message.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Json(_) | Self::MalformedResponse(_)
        )
    }
}
