use shared::{
    domain::SelectedFile,
    error::{ValidationError, ValidationResult},
};

use crate::{config::UiSettings, format::format_limit_label};

pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

pub const SUPPORTED_FORMATS: &[&str] = &[
    "video/mp4",
    "video/avi",
    "video/quicktime",
    "video/x-msvideo",
    "video/x-ms-wmv",
    "video/x-flv",
    "video/x-matroska",
];

/// Extensions offered by host file pickers.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "flv", "wmv"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub supported_mime_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            supported_mime_types: SUPPORTED_FORMATS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&UiSettings> for UploadPolicy {
    fn from(settings: &UiSettings) -> Self {
        Self {
            max_file_size_bytes: settings.max_file_size_bytes,
            supported_mime_types: settings.supported_mime_types.clone(),
        }
    }
}

impl UploadPolicy {
    /// Size first, then MIME type; the first failing rule is reported.
    pub fn validate(&self, file: &SelectedFile) -> ValidationResult {
        if file.size_bytes > self.max_file_size_bytes {
            return Err(ValidationError::FileTooLarge {
                size_bytes: file.size_bytes,
                limit_bytes: self.max_file_size_bytes,
                limit_label: format_limit_label(self.max_file_size_bytes),
            });
        }

        if !self
            .supported_mime_types
            .iter()
            .any(|supported| supported == &file.mime_type)
        {
            return Err(ValidationError::UnsupportedFormat {
                mime_type: file.mime_type.clone(),
            });
        }

        Ok(())
    }
}

pub fn validate(file: &SelectedFile) -> ValidationResult {
    UploadPolicy::default().validate(file)
}
