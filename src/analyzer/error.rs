//! Analyzer-specific error types.

use thiserror::Error;

/// Failure to turn lockfile bytes into library records.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Failed to parse {format} in {path}: {message}")]
    Parse {
        path: String,
        format: String,
        message: String,
    },

    #[error("Lockfile is not valid UTF-8: {path}")]
    NotUtf8 { path: String },
}

impl AnalyzeError {
    /// Create a Parse error.
    pub fn parse(
        path: impl Into<String>,
        format: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            format: format.into(),
            message: message.into(),
        }
    }
}
