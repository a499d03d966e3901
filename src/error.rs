//! Application error types.

use std::path::PathBuf;

use thiserror::Error;

/// Application-level errors for Taxoscope.
///
/// Missing scores and an exhausted node budget are normal traversal policy
/// and never show up here.
#[derive(Error, Debug)]
pub enum AppError {
    // I/O errors
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Input errors
    #[error("Malformed input in {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    // Scoring errors
    #[error("Cannot normalize {count} scores: every score equals {value}")]
    DegenerateRange { value: f64, count: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    // Output errors
    #[error("Render error: {0}")]
    Render(String),
}

impl AppError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a malformed-input error for a file.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        AppError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
