use std::time::Duration;

use annotext_geometry::GeometryError;
use thiserror::Error;

use crate::constants::labels;

/// Error reported by a capture collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Capture rejected: {0}")]
pub struct CaptureError(pub String);

impl CaptureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Why a capture that did run produced no usable bitmap.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureFailure {
    #[error("{0}")]
    Rejected(String),

    #[error("cross-origin image blocked the capture: {0}")]
    CrossOrigin(String),

    #[error("capture produced an empty image")]
    EmptyImage,
}

impl From<CaptureError> for CaptureFailure {
    fn from(err: CaptureError) -> Self {
        let message = err.0;
        if message.to_lowercase().contains("cross-origin") || message.contains("CORS") {
            CaptureFailure::CrossOrigin(message)
        } else {
            CaptureFailure::Rejected(message)
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExportError {
    #[error("No capture backend is available")]
    CaptureUnavailable,

    #[error("Capture timed out after {after:?}")]
    CaptureTimeout { after: Duration },

    #[error("Capture failed: {cause}")]
    CaptureFailed { cause: CaptureFailure },

    #[error("Print preview could not be opened (popup blocked)")]
    PopupBlocked,

    #[error("Failed to encode captured image: {0}")]
    EncodingFailed(String),

    #[error("Cannot lay out export: {0}")]
    Geometry(#[from] GeometryError),
}

impl ExportError {
    /// Whether this error came from the capture step, which falls back to
    /// printing the live page.
    pub fn is_capture_failure(&self) -> bool {
        !matches!(self, ExportError::PopupBlocked | ExportError::EncodingFailed(_))
    }

    /// Text of the confirmation offering a direct live print.
    pub fn fallback_prompt(&self) -> String {
        let mut prompt = String::from(labels::FALLBACK_PREFIX);
        if matches!(
            self,
            ExportError::CaptureFailed {
                cause: CaptureFailure::CrossOrigin(_)
            }
        ) {
            prompt.push_str(labels::FALLBACK_CROSS_ORIGIN);
        }
        prompt.push_str(labels::FALLBACK_QUESTION);
        prompt
    }
}
