//! Lexical path canonicalization for remote targets.
//!
//! Paths on a scanned host cannot be handed to `std::fs::canonicalize`: the
//! host is only reachable through shell commands and its path syntax may
//! differ from the scanning machine's. This module reproduces the target's
//! rules lexically so that two spellings of the same file collapse to one
//! [`CanonicalPath`] key.
//!
//! No function here performs I/O or fails. Malformed input degrades to a
//! best-effort canonical form.

mod buffer;
pub mod posix;
pub mod windows;

use crate::types::CanonicalPath;
use std::collections::HashSet;

/// Path syntax family of a scanned host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    Posix,
    Windows,
}

impl PathStyle {
    pub fn separator(self) -> char {
        match self {
            PathStyle::Posix => posix::SEPARATOR as char,
            PathStyle::Windows => windows::SEPARATOR as char,
        }
    }

    pub fn is_absolute(self, path: &str) -> bool {
        match self {
            PathStyle::Posix => posix::is_absolute(path),
            PathStyle::Windows => windows::is_absolute(path),
        }
    }

    pub fn join(self, base: &str, elem: &str) -> String {
        match self {
            PathStyle::Posix => posix::join(base, elem),
            PathStyle::Windows => windows::join(base, elem),
        }
    }

    pub fn clean(self, path: &str) -> String {
        match self {
            PathStyle::Posix => posix::clean(path),
            PathStyle::Windows => windows::clean(path),
        }
    }

    /// Resolves `raw` against `working_directory` into the canonical key.
    ///
    /// An absolute `raw` is cleaned on its own; anything else is joined onto
    /// the working directory first.
    pub fn resolve(self, working_directory: &str, raw: &str) -> CanonicalPath {
        let resolved = match self {
            PathStyle::Posix => posix::resolve(working_directory, raw),
            PathStyle::Windows => windows::resolve(working_directory, raw),
        };
        CanonicalPath::new(resolved)
    }
}

/// A set of canonical keys, used to drop repeated spellings of one file.
#[derive(Debug, Clone, Default)]
pub struct CanonicalPathSet {
    paths: HashSet<CanonicalPath>,
}

impl CanonicalPathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the key was not present yet.
    pub fn insert(&mut self, path: &CanonicalPath) -> bool {
        if self.paths.contains(path) {
            return false;
        }
        self.paths.insert(path.clone())
    }

    pub fn contains(&self, path: &CanonicalPath) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
