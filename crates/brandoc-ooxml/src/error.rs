//! Error types for OOXML operations

use thiserror::Error;

/// Errors that can occur while writing or post-processing a package
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Required part not found in the package
    #[error("Required part not found: {0}")]
    MissingFile(String),
}

impl From<tempfile::PersistError> for OoxmlError {
    fn from(err: tempfile::PersistError) -> Self {
        OoxmlError::Io(err.error)
    }
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
