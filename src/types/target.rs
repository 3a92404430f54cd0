//! Per-host scan configuration as seen by the discovery core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scan mode flags accepted in the `scan_mode` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    Fast,
    FastRoot,
    Deep,
    Offline,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScanMode::Fast => "fast",
            ScanMode::FastRoot => "fast-root",
            ScanMode::Deep => "deep",
            ScanMode::Offline => "offline",
        };
        write!(f, "{}", s)
    }
}

/// Privilege tier for remote commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privilege {
    #[default]
    Normal,
    Elevated,
}

impl Privilege {
    /// `fast-root` and `deep` scans run elevated.
    pub fn from_modes(modes: &[ScanMode]) -> Self {
        if modes
            .iter()
            .any(|m| matches!(m, ScanMode::FastRoot | ScanMode::Deep))
        {
            Privilege::Elevated
        } else {
            Privilege::Normal
        }
    }

    pub fn is_elevated(self) -> bool {
        self == Privilege::Elevated
    }
}

/// What to look for on one host.
///
/// Owned by the caller; discovery only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanTarget {
    /// Lockfile paths declared verbatim by the user.
    pub lockfiles: Vec<String>,
    /// Search the host for lockfiles.
    pub find_lock: bool,
    /// Directories to search. Empty means the dialect root.
    pub find_lock_dirs: Vec<String>,
    /// Basenames the search matches.
    pub lockfile_names: Vec<String>,
    pub privilege: Privilege,
    /// Suppress network-dependent analysis.
    pub offline: bool,
}

impl ScanTarget {
    /// Create a target with the default lockfile names and nothing to do yet.
    pub fn new() -> Self {
        Self {
            lockfile_names: crate::discovery::default_lockfile_names(),
            ..Self::default()
        }
    }

    pub fn with_lockfiles(mut self, lockfiles: Vec<String>) -> Self {
        self.lockfiles = lockfiles;
        self
    }

    pub fn with_find_lock(mut self, find_lock: bool) -> Self {
        self.find_lock = find_lock;
        self
    }

    pub fn with_find_lock_dirs(mut self, dirs: Vec<String>) -> Self {
        self.find_lock_dirs = dirs;
        self
    }

    pub fn with_lockfile_names(mut self, names: Vec<String>) -> Self {
        self.lockfile_names = names;
        self
    }

    pub fn with_privilege(mut self, privilege: Privilege) -> Self {
        self.privilege = privilege;
        self
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Apply `scan_mode` flags: privilege tier and offline.
    pub fn with_scan_modes(self, modes: &[ScanMode]) -> Self {
        let offline = modes.contains(&ScanMode::Offline);
        self.with_privilege(Privilege::from_modes(modes))
            .with_offline(offline)
    }

    /// Nothing declared and no search requested.
    pub fn has_nothing_to_scan(&self) -> bool {
        self.lockfiles.is_empty() && !self.find_lock
    }
}
