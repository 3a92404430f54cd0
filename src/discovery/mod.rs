//! Lockfile discovery on a remote host.
//!
//! This module handles:
//! - Dialect-specific lockfile search
//! - Canonicalization and deduplication of candidate paths
//! - Fetching file metadata and contents
//! - Handing each file to the library analyzer

pub mod error;
pub mod fetch;
pub mod locator;
pub mod orchestrator;
pub mod patterns;

pub use error::{DiscoveryError, FetchError};
pub use fetch::{FileFetcher, LocalFileFetcher, RemoteFileFetcher};
pub use locator::{LockfileLocator, parse_search_output, search_command};
pub use orchestrator::{DiscoveryOrchestrator, DiscoveryReport, SkippedFile};
pub use patterns::{LOCKFILE_NAMES, default_lockfile_names};
