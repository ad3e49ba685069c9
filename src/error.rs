//! Error types for Lumen Docs
//!
//! This module defines custom error types used throughout the application.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures reported by a text-generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The backend rejected the API key. Every later call would fail the same way.
    #[error("Incorrect API key provided")]
    InvalidCredential,

    #[error("Text generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Text generation backend error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed text generation response: {0}")]
    Malformed(String),
}

impl GenerationError {
    /// Whether the failure must abort the whole generation run
    pub fn is_fatal(&self) -> bool {
        matches!(self, GenerationError::InvalidCredential)
    }
}

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid specification: {0}")]
    InvalidSpec(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
