use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    FileTooLarge,
    UnsupportedFormat,
    ClipboardWriteFailed,
}

/// Reason a selected file was rejected. The `Display` text is shown to the
/// user verbatim in an error alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File size exceeds {limit_label} limit. Please choose a smaller file.")]
    FileTooLarge {
        size_bytes: u64,
        limit_bytes: u64,
        limit_label: String,
    },
    #[error("Unsupported file format. Please use MP4, AVI, MOV, MKV, FLV, or WMV.")]
    UnsupportedFormat { mime_type: String },
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FileTooLarge { .. } => ErrorCode::FileTooLarge,
            Self::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

#[derive(Debug, Error)]
pub enum UiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("clipboard write failed: {reason}")]
    ClipboardWriteFailed { reason: String },
}

impl UiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(err) => err.code(),
            Self::ClipboardWriteFailed { .. } => ErrorCode::ClipboardWriteFailed,
        }
    }
}

/// Serializable report of a failure, for tools that print machine-readable
/// output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&UiError> for ErrorReport {
    fn from(value: &UiError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
