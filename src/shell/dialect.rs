use crate::canonical::PathStyle;
use crate::remote::RemoteExecutor;
use crate::types::Privilege;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Command language spoken by the remote shell.
///
/// Determined once per host and fixed for the rest of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellDialect {
    Posix,
    #[serde(rename = "cmd.exe")]
    CmdExe,
    PowerShell,
    Unknown,
}

impl ShellDialect {
    /// Path syntax used for canonicalization. `Unknown` is treated as POSIX.
    pub fn path_style(self) -> PathStyle {
        match self {
            ShellDialect::CmdExe | ShellDialect::PowerShell => PathStyle::Windows,
            ShellDialect::Posix | ShellDialect::Unknown => PathStyle::Posix,
        }
    }

    pub fn is_windows(self) -> bool {
        self.path_style() == PathStyle::Windows
    }

    /// Root searched and used as the working directory when nothing better is known.
    pub fn root(self) -> &'static str {
        if self.is_windows() { "C:\\" } else { "/" }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShellDialect::Posix => "posix",
            ShellDialect::CmdExe => "cmd.exe",
            ShellDialect::PowerShell => "powershell",
            ShellDialect::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ShellDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies the remote shell with cheap unprivileged commands.
///
/// The first conclusive answer wins. `uname` identifies a POSIX shell. Echoing
/// `$env:OS` tells the Windows shells apart: cmd.exe prints the expression
/// back verbatim, PowerShell expands it.
pub fn detect_dialect(executor: &dyn RemoteExecutor) -> ShellDialect {
    let dialect = classify(executor);
    match dialect {
        ShellDialect::Unknown => warn!(
            target_host = %executor.describe(),
            "Could not determine remote shell, falling back to POSIX commands"
        ),
        _ => debug!(target_host = %executor.describe(), dialect = %dialect, "Detected remote shell"),
    }
    dialect
}

fn classify(executor: &dyn RemoteExecutor) -> ShellDialect {
    if executor.exec("uname", Privilege::Normal).is_success() {
        return ShellDialect::Posix;
    }

    let echo = executor.exec("echo $env:OS", Privilege::Normal);
    if !echo.is_success() {
        return ShellDialect::Unknown;
    }

    match echo.stdout.trim() {
        "$env:OS" => ShellDialect::CmdExe,
        "Windows_NT" => ShellDialect::PowerShell,
        _ if executor
            .exec("Get-ChildItem env:OS", Privilege::Normal)
            .is_success() =>
        {
            ShellDialect::PowerShell
        }
        _ => ShellDialect::Unknown,
    }
}
