//! Knowledge-base document uploads.
//!
//! The file content is an opaque blob; only its name and size are inspected,
//! and both checks run before any request is built.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use crate::error::ValidationError;

/// Largest accepted upload, in bytes (16MB).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Accepted file extensions, lowercase, without the dot.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// Multipart form field carrying the file.
pub const UPLOAD_FIELD: &str = "file";

/// A file selected for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Validate this document's name and size.
    ///
    /// # Errors
    ///
    /// See [`validate_upload`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_upload(&self.file_name, self.size())
    }
}

/// Check a prospective upload without needing its content.
///
/// Browsers call this with the file's reported size so oversized files are
/// rejected before they are read into memory.
///
/// # Errors
///
/// Returns [`ValidationError::FileTooLarge`] above [`MAX_UPLOAD_BYTES`] and
/// [`ValidationError::UnsupportedFileType`] for extensions outside
/// [`ALLOWED_EXTENSIONS`].
pub fn validate_upload(file_name: &str, size: u64) -> Result<(), ValidationError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge { size, max: MAX_UPLOAD_BYTES });
    }
    let extension = file_extension(file_name);
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::UnsupportedFileType(format!(".{extension}")));
    }
    Ok(())
}

fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}
