//! Discovery-specific error types.

use crate::analyzer::AnalyzeError;
use thiserror::Error;

/// Failure to stat or read one candidate file. Never fatal to a scan.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Failed to get file info: {path}")]
    StatError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file: {path}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Remote command for {path} exited with status {exit_status}: {stderr}")]
    CommandFailed {
        path: String,
        exit_status: i32,
        stderr: String,
    },

    #[error("Unexpected permission output for {path}: {output:?}")]
    InvalidMode { path: String, output: String },

    #[error("Failed to decode file contents: {path}")]
    InvalidEncoding {
        path: String,
        #[source]
        source: base64::DecodeError,
    },
}

impl FetchError {
    /// Create a StatError from a path and IO error.
    pub fn stat_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::StatError {
            path: path.into(),
            source,
        }
    }

    /// Create a ReadError from a path and IO error.
    pub fn read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Path the failed operation was about.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path }
            | Self::StatError { path, .. }
            | Self::ReadError { path, .. }
            | Self::CommandFailed { path, .. }
            | Self::InvalidMode { path, .. }
            | Self::InvalidEncoding { path, .. } => path,
        }
    }
}

/// Fatal failure of a discovery pass.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to find lock files: `{command}` exited with status {exit_status}")]
    LockfileSearch {
        command: String,
        exit_status: i32,
        stderr: String,
    },

    #[error("Failed to analyze library: {path}")]
    Analyze {
        path: String,
        #[source]
        source: AnalyzeError,
    },
}

impl DiscoveryError {
    /// Create an Analyze error from a path and analyzer error.
    pub fn analyze(path: impl Into<String>, source: AnalyzeError) -> Self {
        Self::Analyze {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::NotFound {
            path: "/srv/yarn.lock".to_string(),
        };
        assert_eq!(err.to_string(), "File not found: /srv/yarn.lock");

        let err = FetchError::read_error(
            "/srv/yarn.lock",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to read file: /srv/yarn.lock");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_fetch_error_path() {
        let err = FetchError::CommandFailed {
            path: r"C:\app\yarn.lock".to_string(),
            exit_status: 1,
            stderr: "access denied".to_string(),
        };
        assert_eq!(err.path(), r"C:\app\yarn.lock");

        let err = FetchError::InvalidMode {
            path: "/a".to_string(),
            output: "xyz".to_string(),
        };
        assert_eq!(err.path(), "/a");
        assert!(err.to_string().contains("\"xyz\""));
    }

    #[test]
    fn test_invalid_encoding_keeps_decode_source() {
        let err = FetchError::InvalidEncoding {
            path: r"C:\app\yarn.lock".to_string(),
            source: base64::DecodeError::InvalidLength(3),
        };
        assert_eq!(err.path(), r"C:\app\yarn.lock");
        assert!(err.to_string().starts_with("Failed to decode file contents"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_lockfile_search_error_carries_command_and_status() {
        let err = DiscoveryError::LockfileSearch {
            command: "find / -type f".to_string(),
            exit_status: 2,
            stderr: String::new(),
        };
        let msg = err.to_string();
        assert!(msg.contains("find / -type f"));
        assert!(msg.contains("status 2"));
    }

    #[test]
    fn test_analyze_error_carries_path() {
        let err = DiscoveryError::analyze("/a/package-lock.json", AnalyzeError::NotUtf8 {
            path: "/a/package-lock.json".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Failed to analyze library: /a/package-lock.json"
        );
        assert!(err.source().is_some());
    }
}
