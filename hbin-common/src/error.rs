use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HbinError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("HTTP Request Error: {0}")]
    Http(#[from] Arc<reqwest::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Semantic Versioning Error: {0}")]
    SemVer(#[from] Arc<semver::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Transport Error: {0}")]
    Transport(String),

    #[error("Checksum Mismatch: {0}")]
    ChecksumMismatch(String),

    #[error("Checksum Missing: {0}")]
    ChecksumMissing(String),

    #[error("Archive Error: {0}")]
    Archive(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),

    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("IoError: {0}")]
    IoError(String),
}

/// Coarse classification of an [`HbinError`], used by callers that only care
/// about which stage of an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Integrity,
    Archive,
    NotFound,
    Io,
    Invalid,
}

impl HbinError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HbinError::Http(_) | HbinError::Transport(_) => ErrorKind::Transport,
            HbinError::ChecksumMismatch(_) | HbinError::ChecksumMissing(_) => ErrorKind::Integrity,
            HbinError::Archive(_) => ErrorKind::Archive,
            HbinError::NotFound(_) => ErrorKind::NotFound,
            HbinError::Io(_) | HbinError::IoError(_) => ErrorKind::Io,
            HbinError::Json(_)
            | HbinError::SemVer(_)
            | HbinError::Config(_)
            | HbinError::ValidationError(_) => ErrorKind::Invalid,
        }
    }
}

impl From<std::io::Error> for HbinError {
    fn from(err: std::io::Error) -> Self {
        HbinError::Io(Arc::new(err))
    }
}

impl From<reqwest::Error> for HbinError {
    fn from(err: reqwest::Error) -> Self {
        HbinError::Http(Arc::new(err))
    }
}

impl From<serde_json::Error> for HbinError {
    fn from(err: serde_json::Error) -> Self {
        HbinError::Json(Arc::new(err))
    }
}

impl From<semver::Error> for HbinError {
    fn from(err: semver::Error) -> Self {
        HbinError::SemVer(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, HbinError>;
