//! NewType wrappers for primitive types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A path in the target dialect's native absolute form.
///
/// Only the canonicalizer constructs one, so two values compare equal exactly
/// when they name the same file under the dialect's lexical rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    pub(crate) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the underlying string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Final path element, splitting on either separator.
    pub fn file_name(&self) -> &str {
        self.0
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server name as declared in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerName(String);

impl ServerName {
    /// Create a new ServerName.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the underlying string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServerName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ServerName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ServerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA-256 digest of a lockfile, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileHash(String);

impl FileHash {
    /// Create a new FileHash from a hex string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Hash `content` with SHA-256.
    pub fn sha256(content: &[u8]) -> Self {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(content);
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Get the underlying hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FileHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for FileHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
