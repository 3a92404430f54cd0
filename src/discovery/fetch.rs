//! Reading candidate files.

use super::error::FetchError;
use crate::remote::{ExecResult, RemoteExecutor};
use base64::Engine;
use crate::shell::ShellDialect;
use crate::types::{CanonicalPath, Privilege};

/// Permission bits reported for files on Windows hosts.
pub const WINDOWS_FILE_MODE: u32 = 0o644;

/// Filesystem-read access to a scanned host.
pub trait FileFetcher: Send + Sync {
    /// Permission bits of `path`, masked to `0o777`.
    fn stat(&self, path: &CanonicalPath) -> Result<u32, FetchError>;

    fn read_all(&self, path: &CanonicalPath) -> Result<Vec<u8>, FetchError>;
}

impl<T: FileFetcher + ?Sized> FileFetcher for &T {
    fn stat(&self, path: &CanonicalPath) -> Result<u32, FetchError> {
        (**self).stat(path)
    }

    fn read_all(&self, path: &CanonicalPath) -> Result<Vec<u8>, FetchError> {
        (**self).read_all(path)
    }
}

impl<T: FileFetcher + ?Sized> FileFetcher for Box<T> {
    fn stat(&self, path: &CanonicalPath) -> Result<u32, FetchError> {
        (**self).stat(path)
    }

    fn read_all(&self, path: &CanonicalPath) -> Result<Vec<u8>, FetchError> {
        (**self).read_all(path)
    }
}

/// Reads files from the scanning machine's own filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileFetcher;

impl LocalFileFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl FileFetcher for LocalFileFetcher {
    fn stat(&self, path: &CanonicalPath) -> Result<u32, FetchError> {
        let metadata = std::fs::metadata(path.as_str())
            .map_err(|e| FetchError::stat_error(path.as_str(), e))?;
        Ok(permission_bits(&metadata))
    }

    fn read_all(&self, path: &CanonicalPath) -> Result<Vec<u8>, FetchError> {
        std::fs::read(path.as_str()).map_err(|e| FetchError::read_error(path.as_str(), e))
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &std::fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        WINDOWS_FILE_MODE
    }
}

/// Reads files through shell commands on the host.
pub struct RemoteFileFetcher<'a> {
    executor: &'a dyn RemoteExecutor,
    dialect: ShellDialect,
    privilege: Privilege,
}

impl<'a> RemoteFileFetcher<'a> {
    pub fn new(executor: &'a dyn RemoteExecutor, dialect: ShellDialect) -> Self {
        Self {
            executor,
            dialect,
            privilege: Privilege::Normal,
        }
    }

    pub fn with_privilege(mut self, privilege: Privilege) -> Self {
        self.privilege = privilege;
        self
    }

    fn stat_command(&self, path: &str) -> String {
        match self.dialect {
            ShellDialect::Posix | ShellDialect::Unknown => {
                // GNU coreutils first, then BSD/macOS.
                let quoted = posix_quote(path);
                format!("stat -c %a {quoted} 2>/dev/null || stat -f %Lp {quoted}")
            }
            ShellDialect::PowerShell => {
                format!("Test-Path -LiteralPath \"{path}\" -PathType Leaf")
            }
            ShellDialect::CmdExe => format!("if exist \"{path}\" (echo True)"),
        }
    }

    /// Windows shells re-encode text they print, so file bytes travel as base64.
    fn read_command(&self, path: &str) -> String {
        match self.dialect {
            ShellDialect::Posix | ShellDialect::Unknown => format!("cat {}", posix_quote(path)),
            ShellDialect::PowerShell => powershell_read(path),
            ShellDialect::CmdExe => {
                format!(
                    "powershell.exe -NoProfile -NonInteractive \"{}\"",
                    powershell_read(path)
                )
            }
        }
    }

    fn run(&self, path: &str, command: &str) -> Result<ExecResult, FetchError> {
        let result = self.executor.exec(command, self.privilege);
        if !result.is_success() {
            return Err(FetchError::CommandFailed {
                path: path.to_string(),
                exit_status: result.exit_status,
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(result)
    }
}

impl FileFetcher for RemoteFileFetcher<'_> {
    fn stat(&self, path: &CanonicalPath) -> Result<u32, FetchError> {
        let result = self.run(path.as_str(), &self.stat_command(path.as_str()))?;
        let output = result.stdout.trim();

        if self.dialect.is_windows() {
            return if output == "True" {
                Ok(WINDOWS_FILE_MODE)
            } else {
                Err(FetchError::NotFound {
                    path: path.to_string(),
                })
            };
        }

        u32::from_str_radix(output, 8)
            .map(|mode| mode & 0o777)
            .map_err(|_| FetchError::InvalidMode {
                path: path.to_string(),
                output: output.to_string(),
            })
    }

    fn read_all(&self, path: &CanonicalPath) -> Result<Vec<u8>, FetchError> {
        let result = self.run(path.as_str(), &self.read_command(path.as_str()))?;
        if !self.dialect.is_windows() {
            return Ok(result.raw_stdout);
        }

        base64::engine::general_purpose::STANDARD
            .decode(result.stdout.trim())
            .map_err(|e| FetchError::InvalidEncoding {
                path: path.to_string(),
                source: e,
            })
    }
}

/// PowerShell expression printing the file's bytes as one base64 line.
fn powershell_read(path: &str) -> String {
    format!(
        "[Convert]::ToBase64String([IO.File]::ReadAllBytes('{}'))",
        path.replace('\'', "''")
    )
}

/// Single-quote `s` for a POSIX shell.
pub fn posix_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::PathStyle;
    use crate::remote::ExecResult;
    use crate::test_utils::fixtures::ScriptedExecutor;
    use tempfile::TempDir;

    fn posix_path(p: &str) -> CanonicalPath {
        PathStyle::Posix.resolve("/", p)
    }

    fn windows_path(p: &str) -> CanonicalPath {
        PathStyle::Windows.resolve("C:\\", p)
    }

    #[test]
    fn test_posix_quote() {
        assert_eq!(posix_quote("/srv/app/yarn.lock"), "'/srv/app/yarn.lock'");
        assert_eq!(posix_quote("/srv/it's/Cargo.lock"), r"'/srv/it'\''s/Cargo.lock'");
    }

    #[test]
    fn test_remote_posix_stat_parses_octal() {
        let executor = ScriptedExecutor::new().on("stat -c %a", ExecResult::success("640\n"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::Posix);

        assert_eq!(fetcher.stat(&posix_path("/srv/yarn.lock")).unwrap(), 0o640);
        assert_eq!(
            executor.calls(),
            vec!["stat -c %a '/srv/yarn.lock' 2>/dev/null || stat -f %Lp '/srv/yarn.lock'"]
        );
    }

    #[test]
    fn test_remote_posix_stat_accepts_bsd_output() {
        // `stat -f %Lp` prints the permission bits without a leading zero.
        let executor = ScriptedExecutor::new().on("stat ", ExecResult::success("600\n"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::Posix);

        assert_eq!(fetcher.stat(&posix_path("/Users/dev/app/Cargo.lock")).unwrap(), 0o600);
        assert!(executor.calls()[0].contains("|| stat -f %Lp '/Users/dev/app/Cargo.lock'"));
    }

    #[cfg(unix)]
    #[test]
    fn test_remote_stat_through_local_shell() {
        use crate::remote::LocalExecutor;
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Gemfile.lock");
        std::fs::write(&file, "GEM\n").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o604)).unwrap();

        let executor = LocalExecutor::new();
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::Posix);
        let path = posix_path(&file.to_string_lossy());
        assert_eq!(fetcher.stat(&path).unwrap(), 0o604);
    }

    #[test]
    fn test_remote_posix_stat_rejects_garbage() {
        let executor = ScriptedExecutor::new().on("stat -c %a", ExecResult::success("rw-r--r--"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::Posix);

        let err = fetcher.stat(&posix_path("/a")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidMode { .. }));
    }

    #[test]
    fn test_remote_posix_read() {
        let executor = ScriptedExecutor::new().on("cat ", ExecResult::success("{}"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::Unknown)
            .with_privilege(Privilege::Elevated);

        assert_eq!(fetcher.read_all(&posix_path("/a/b")).unwrap(), b"{}");
        assert_eq!(
            executor.calls_with_privilege(),
            vec![("cat '/a/b'".to_string(), Privilege::Elevated)]
        );
    }

    #[test]
    fn test_remote_posix_read_keeps_binary_bytes() {
        let bytes = vec![0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe, 0x80, 0x00];
        let executor =
            ScriptedExecutor::new().on("cat ", ExecResult::from_bytes(bytes.clone(), "", 0));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::Posix);

        assert_eq!(fetcher.read_all(&posix_path("/opt/app.jar")).unwrap(), bytes);
    }

    #[cfg(unix)]
    #[test]
    fn test_remote_read_through_local_shell_is_byte_exact() {
        use crate::remote::LocalExecutor;

        let bytes = vec![0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe, 0x80, 0x00];
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.jar");
        std::fs::write(&file, &bytes).unwrap();

        let executor = LocalExecutor::new();
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::Posix);
        let path = posix_path(&file.to_string_lossy());
        assert_eq!(fetcher.read_all(&path).unwrap(), bytes);
    }

    #[test]
    fn test_remote_command_failure_carries_path() {
        let executor = ScriptedExecutor::new().on("cat ", ExecResult::failure(1, "Permission denied\n"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::Posix);

        match fetcher.read_all(&posix_path("/root/Cargo.lock")).unwrap_err() {
            FetchError::CommandFailed {
                path,
                exit_status,
                stderr,
            } => {
                assert_eq!(path, "/root/Cargo.lock");
                assert_eq!(exit_status, 1);
                assert_eq!(stderr, "Permission denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_remote_powershell_commands() {
        let executor = ScriptedExecutor::new()
            .on("Test-Path", ExecResult::success("True\r\n"))
            .on("[Convert]", ExecResult::success("bG9jaw==\r\n"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::PowerShell);
        let path = windows_path(r"app\yarn.lock");

        assert_eq!(fetcher.stat(&path).unwrap(), WINDOWS_FILE_MODE);
        assert_eq!(fetcher.read_all(&path).unwrap(), b"lock");
        assert_eq!(
            executor.calls(),
            vec![
                r#"Test-Path -LiteralPath "C:\app\yarn.lock" -PathType Leaf"#,
                r"[Convert]::ToBase64String([IO.File]::ReadAllBytes('C:\app\yarn.lock'))",
            ]
        );
    }

    #[test]
    fn test_remote_powershell_read_decodes_binary() {
        // UTF-16LE BOM, then "{" and a lone 0x80.
        let executor =
            ScriptedExecutor::new().on("[Convert]", ExecResult::success("//57AIA=\r\n"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::PowerShell);

        assert_eq!(
            fetcher.read_all(&windows_path(r"C:\app\packages.lock.json")).unwrap(),
            vec![0xff, 0xfe, 0x7b, 0x00, 0x80]
        );
    }

    #[test]
    fn test_remote_powershell_read_quotes_apostrophe() {
        let executor = ScriptedExecutor::new().on("[Convert]", ExecResult::success(""));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::PowerShell);

        assert!(fetcher.read_all(&windows_path(r"C:\it's\go.sum")).unwrap().is_empty());
        assert_eq!(
            executor.calls(),
            vec![r"[Convert]::ToBase64String([IO.File]::ReadAllBytes('C:\it''s\go.sum'))"]
        );
    }

    #[test]
    fn test_remote_powershell_read_rejects_bad_encoding() {
        let executor =
            ScriptedExecutor::new().on("[Convert]", ExecResult::success("not base64!"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::PowerShell);

        let err = fetcher.read_all(&windows_path(r"C:\app\yarn.lock")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_remote_powershell_missing_file() {
        let executor = ScriptedExecutor::new().on("Test-Path", ExecResult::success("False\r\n"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::PowerShell);

        let err = fetcher.stat(&windows_path("missing.lock")).unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[test]
    fn test_remote_cmd_exe_commands() {
        let executor = ScriptedExecutor::new()
            .on("if exist", ExecResult::success("True\r\n"))
            .on("powershell.exe", ExecResult::success("eA==\r\n"));
        let fetcher = RemoteFileFetcher::new(&executor, ShellDialect::CmdExe);
        let path = windows_path(r"C:\app\go.sum");

        assert_eq!(fetcher.stat(&path).unwrap(), WINDOWS_FILE_MODE);
        assert_eq!(fetcher.read_all(&path).unwrap(), b"x");
        assert_eq!(
            executor.calls(),
            vec![
                r#"if exist "C:\app\go.sum" (echo True)"#,
                r#"powershell.exe -NoProfile -NonInteractive "[Convert]::ToBase64String([IO.File]::ReadAllBytes('C:\app\go.sum'))""#,
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_local_fetcher_reads_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Cargo.lock");
        std::fs::write(&file, "version = 3\n").unwrap();
        let path = posix_path(&file.to_string_lossy());

        let fetcher = LocalFileFetcher::new();
        assert_eq!(fetcher.read_all(&path).unwrap(), b"version = 3\n");
        assert!(fetcher.stat(&path).unwrap() <= 0o777);
    }

    #[cfg(unix)]
    #[test]
    fn test_local_fetcher_reports_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("yarn.lock");
        std::fs::write(&file, "").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o640)).unwrap();

        let path = posix_path(&file.to_string_lossy());
        assert_eq!(LocalFileFetcher::new().stat(&path).unwrap(), 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_local_fetcher_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = posix_path(&dir.path().join("nope.lock").to_string_lossy());

        let err = LocalFileFetcher::new().stat(&path).unwrap_err();
        assert!(matches!(err, FetchError::StatError { .. }));
    }
}
