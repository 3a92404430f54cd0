//! Library analysis of discovered lockfiles.
//!
//! The discovery core hands each fetched file to a [`LibraryAnalyzer`] and
//! collects the returned [`LibraryScanner`]s. [`LockfileAnalyzer`] is the
//! built-in implementation: it parses common lockfile formats offline.

mod error;
pub mod lockfile;
mod parsers;

pub use error::AnalyzeError;
pub use lockfile::LockfileAnalyzer;

use crate::discovery::patterns::matches_name;
use crate::types::{CanonicalPath, FileHash};
use serde::Serialize;
use std::fmt;

/// Package ecosystem a lockfile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Yarn,
    Pnpm,
    Cargo,
    Pip,
    Pipenv,
    Poetry,
    Uv,
    Composer,
    Bundler,
    Gomod,
    Nuget,
    Maven,
    Gradle,
    Conan,
    Pub,
    Hex,
    Swift,
    Cocoapods,
    Unknown,
}

static ECOSYSTEM_PATTERNS: &[(&str, Ecosystem)] = &[
    ("package-lock.json", Ecosystem::Npm),
    ("yarn.lock", Ecosystem::Yarn),
    ("pnpm-lock.yaml", Ecosystem::Pnpm),
    ("Gemfile.lock", Ecosystem::Bundler),
    ("*.gemspec", Ecosystem::Bundler),
    ("Cargo.lock", Ecosystem::Cargo),
    ("composer.lock", Ecosystem::Composer),
    ("composer.json", Ecosystem::Composer),
    ("requirements.txt", Ecosystem::Pip),
    ("Pipfile.lock", Ecosystem::Pipenv),
    ("poetry.lock", Ecosystem::Poetry),
    ("uv.lock", Ecosystem::Uv),
    ("packages.lock.json", Ecosystem::Nuget),
    ("packages.config", Ecosystem::Nuget),
    ("*.deps.json", Ecosystem::Nuget),
    ("*Packages.props", Ecosystem::Nuget),
    ("go.mod", Ecosystem::Gomod),
    ("go.sum", Ecosystem::Gomod),
    ("pom.xml", Ecosystem::Maven),
    ("*.jar", Ecosystem::Maven),
    ("*.war", Ecosystem::Maven),
    ("*.ear", Ecosystem::Maven),
    ("*.par", Ecosystem::Maven),
    ("*gradle.lockfile", Ecosystem::Gradle),
    ("conan.lock", Ecosystem::Conan),
    ("pubspec.lock", Ecosystem::Pub),
    ("mix.lock", Ecosystem::Hex),
    ("Package.resolved", Ecosystem::Swift),
    ("Podfile.lock", Ecosystem::Cocoapods),
];

impl Ecosystem {
    /// Ecosystem for a lockfile basename.
    pub fn from_file_name(file_name: &str) -> Self {
        ECOSYSTEM_PATTERNS
            .iter()
            .find(|(pattern, _)| matches_name(pattern, file_name))
            .map(|(_, ecosystem)| *ecosystem)
            .unwrap_or(Ecosystem::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Yarn => "yarn",
            Ecosystem::Pnpm => "pnpm",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Pip => "pip",
            Ecosystem::Pipenv => "pipenv",
            Ecosystem::Poetry => "poetry",
            Ecosystem::Uv => "uv",
            Ecosystem::Composer => "composer",
            Ecosystem::Bundler => "bundler",
            Ecosystem::Gomod => "gomod",
            Ecosystem::Nuget => "nuget",
            Ecosystem::Maven => "maven",
            Ecosystem::Gradle => "gradle",
            Ecosystem::Conan => "conan",
            Ecosystem::Pub => "pub",
            Ecosystem::Hex => "hex",
            Ecosystem::Swift => "swift",
            Ecosystem::Cocoapods => "cocoapods",
            Ecosystem::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One resolved dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Library {
    pub name: String,
    pub version: String,
}

impl Library {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Analysis result for one lockfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryScanner {
    pub lockfile_path: CanonicalPath,
    pub ecosystem: Ecosystem,
    pub libraries: Vec<Library>,
    pub sha256: FileHash,
    pub file_mode: u32,
    pub offline: bool,
}

/// Library-analysis collaborator of the discovery core.
pub trait LibraryAnalyzer: Send + Sync {
    fn analyze(
        &self,
        path: &CanonicalPath,
        content: &[u8],
        file_mode: u32,
        offline: bool,
    ) -> Result<Vec<LibraryScanner>, AnalyzeError>;
}

impl<T: LibraryAnalyzer + ?Sized> LibraryAnalyzer for &T {
    fn analyze(
        &self,
        path: &CanonicalPath,
        content: &[u8],
        file_mode: u32,
        offline: bool,
    ) -> Result<Vec<LibraryScanner>, AnalyzeError> {
        (**self).analyze(path, content, file_mode, offline)
    }
}
