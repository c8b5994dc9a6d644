//! Error types for profile-core

use std::path::PathBuf;

/// Result type for profile-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in profile-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad scope/path combination
    #[error("Invalid scope: {message}")]
    InvalidScope { message: String },

    /// A configuration file exists but cannot be parsed. The file is left
    /// untouched; it is never auto-repaired or discarded.
    #[error("Configuration at {path} is corrupt: {message}")]
    CorruptConfig { path: PathBuf, message: String },

    /// Import or export source does not exist
    #[error("Source configuration not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// One or more field-level validation failures. Carries every message
    /// so a caller can report them all at once.
    #[error("Validation failed: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    /// Duplicate profile name on create
    #[error("Profile already exists: {name}")]
    Conflict { name: String },

    /// Operation targets a nonexistent profile
    #[error("Profile not found: {name}")]
    NotFound { name: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from profile-fs
    #[error(transparent)]
    Fs(#[from] profile_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::InvalidScope {
            message: message.into(),
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}
