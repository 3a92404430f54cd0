use crate::analyzer::AnalyzeError;
use crate::config::ConfigError;
use crate::discovery::{DiscoveryError, FetchError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockscoutError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("Host {host} is unreachable: {message}")]
    Unreachable { host: String, message: String },

    #[error("Failed to write output: {path}")]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LockscoutError>;

/// Error message followed by its source chain, `: `-separated.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
