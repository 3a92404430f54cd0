//! Dialect-specific lockfile search.

use super::error::DiscoveryError;
use crate::remote::RemoteExecutor;
use crate::shell::ShellDialect;
use crate::types::ScanTarget;
use tracing::{debug, info, warn};

/// Names may carry `*` wildcards, so each one is matched with `-like`.
const POWERSHELL_SEARCH: &str = "Get-ChildItem -Path {roots} -Recurse -File -ErrorAction SilentlyContinue | Where-Object { $n = $_.Name; @({names}) | Where-Object { $n -like $_ } } | Select-Object -ExpandProperty FullName";

/// Builds the recursive search command for `dialect`.
///
/// Returns `None` when there are no names to search for.
pub fn search_command<S: AsRef<str>>(
    dialect: ShellDialect,
    dirs: &[S],
    names: &[S],
) -> Option<String> {
    if names.is_empty() {
        return None;
    }

    let command = match dialect {
        ShellDialect::Posix | ShellDialect::Unknown => posix_search(dirs, names),
        ShellDialect::PowerShell => powershell_search(dirs, names, false),
        ShellDialect::CmdExe => {
            let inner = powershell_search(dirs, names, true).replace('"', "\\\"");
            format!("powershell.exe -NoProfile -NonInteractive \"{inner}\"")
        }
    };
    Some(command)
}

fn posix_search<S: AsRef<str>>(dirs: &[S], names: &[S]) -> String {
    let roots = if dirs.is_empty() {
        ShellDialect::Posix.root().to_string()
    } else {
        join(dirs, " ", |d| d.to_string())
    };
    let filter = join(names, " -o ", |n| format!("-name \"{n}\""));
    format!(r#"find {roots} -type f -and \( {filter} \) 2>&1 | grep -v "find: ""#)
}

/// `double_trailing_backslash` keeps a quoted `C:\dir\` from escaping its
/// closing quote once the whole command is wrapped for cmd.exe.
fn powershell_search<S: AsRef<str>>(
    dirs: &[S],
    names: &[S],
    double_trailing_backslash: bool,
) -> String {
    let roots = if dirs.is_empty() {
        ShellDialect::PowerShell.root().to_string()
    } else {
        join(dirs, ",", |d| {
            if double_trailing_backslash && d.ends_with('\\') {
                format!("\"{d}\\\"")
            } else {
                format!("\"{d}\"")
            }
        })
    };
    let names = join(names, ", ", |n| format!("\"{n}\""));
    POWERSHELL_SEARCH
        .replace("{roots}", &roots)
        .replace("{names}", &names)
}

fn join<S: AsRef<str>>(items: &[S], sep: &str, f: impl Fn(&str) -> String) -> String {
    items
        .iter()
        .map(|s| f(s.as_ref()))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Split search output into raw paths, tolerating CRLF and dropping blank lines.
pub fn parse_search_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collects candidate lockfile paths for one host.
pub struct LockfileLocator<'a> {
    executor: &'a dyn RemoteExecutor,
}

impl<'a> LockfileLocator<'a> {
    pub fn new(executor: &'a dyn RemoteExecutor) -> Self {
        Self { executor }
    }

    /// Declared lockfiles verbatim, followed by search results when
    /// `find_lock` is set. Paths are returned raw; resolving them against
    /// `working_directory` is left to the caller.
    pub fn locate(
        &self,
        target: &ScanTarget,
        dialect: ShellDialect,
        working_directory: &str,
    ) -> Result<Vec<String>, DiscoveryError> {
        let mut paths = target.lockfiles.clone();
        if !target.find_lock {
            return Ok(paths);
        }

        if target.lockfile_names.is_empty() {
            warn!("No lockfile names configured, skipping lockfile search");
            return Ok(paths);
        }

        if target.find_lock_dirs.is_empty() {
            info!(
                root = dialect.root(),
                "find_lock_dirs is not set, searching the whole filesystem; this may increase CPU load on the host"
            );
        }

        let Some(command) =
            search_command(dialect, &target.find_lock_dirs, &target.lockfile_names)
        else {
            return Ok(paths);
        };

        info!(
            dirs = ?target.find_lock_dirs,
            working_directory,
            "Finding lockfiles"
        );
        let result = self.executor.exec(&command, target.privilege);
        if result.exit_status != 0 && result.exit_status != 1 {
            return Err(DiscoveryError::LockfileSearch {
                command,
                exit_status: result.exit_status,
                stderr: result.stderr,
            });
        }

        let found = parse_search_output(&result.stdout);
        debug!(count = found.len(), "Lockfile search finished");
        paths.extend(found);
        Ok(paths)
    }
}
