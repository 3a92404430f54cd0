use super::{DEFAULT_CONNECT_TIMEOUT_SECS, ExecResult, RemoteExecutor};
use crate::types::Privilege;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs commands on a remote host through the system `ssh` client.
///
/// Authentication is key based only: `BatchMode=yes` makes ssh fail instead of
/// prompting, which surfaces as a failed command.
#[derive(Debug, Clone)]
pub struct SshExecutor {
    host: String,
    port: String,
    user: String,
    key_path: Option<PathBuf>,
    connect_timeout_secs: u64,
    /// Target runs a Windows shell, where `sudo` does not exist
    windows: bool,
}

impl SshExecutor {
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: "22".to_string(),
            user: user.into(),
            key_path: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            windows: false,
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    pub fn with_key_path(mut self, key_path: Option<PathBuf>) -> Self {
        self.key_path = key_path;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_windows(mut self, windows: bool) -> Self {
        self.windows = windows;
        self
    }

    fn remote_command(&self, command: &str, privilege: Privilege) -> String {
        if privilege.is_elevated() && self.user != "root" && !self.windows {
            format!("sudo -S {}", command)
        } else {
            command.to_string()
        }
    }

    fn build_command(&self, command: &str, privilege: Privilege) -> Command {
        let connect_timeout = format!("ConnectTimeout={}", self.connect_timeout_secs);
        let mut cmd = Command::new("ssh");
        cmd.args([
            "-o",
            "BatchMode=yes",
            "-o",
            "StrictHostKeyChecking=accept-new",
            "-o",
            connect_timeout.as_str(),
            "-p",
            self.port.as_str(),
        ]);
        if let Some(ref key) = self.key_path {
            cmd.arg("-i").arg(key);
        }
        cmd.arg(format!("{}@{}", self.user, self.host));
        cmd.arg(self.remote_command(command, privilege));
        cmd
    }
}

impl RemoteExecutor for SshExecutor {
    fn exec(&self, command: &str, privilege: Privilege) -> ExecResult {
        let mut cmd = self.build_command(command, privilege);
        cmd.stdin(Stdio::null());

        match cmd.output() {
            Ok(output) => ExecResult::from(output),
            Err(e) => {
                debug!(host = %self.host, error = %e, "Failed to spawn ssh");
                ExecResult::transport_failure(&e)
            }
        }
    }

    fn describe(&self) -> String {
        format!("{}@{}:{}", self.user, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_build_command_defaults() {
        let executor = SshExecutor::new("10.0.0.5", "scanner");
        let cmd = executor.build_command("uname", Privilege::Normal);

        assert_eq!(cmd.get_program(), "ssh");
        assert_eq!(
            args(&cmd),
            vec![
                "-o",
                "BatchMode=yes",
                "-o",
                "StrictHostKeyChecking=accept-new",
                "-o",
                "ConnectTimeout=10",
                "-p",
                "22",
                "scanner@10.0.0.5",
                "uname",
            ]
        );
    }

    #[test]
    fn test_build_command_with_key_and_port() {
        let executor = SshExecutor::new("web1", "ops")
            .with_port("2222")
            .with_key_path(Some(PathBuf::from("/keys/id_ed25519")))
            .with_connect_timeout(3);
        let args = args(&executor.build_command("pwd", Privilege::Normal));

        assert!(args.windows(2).any(|w| w == ["-p", "2222"]));
        assert!(args.windows(2).any(|w| w == ["-i", "/keys/id_ed25519"]));
        assert!(args.contains(&"ConnectTimeout=3".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("pwd"));
    }

    #[test]
    fn test_elevated_prefixes_sudo() {
        let executor = SshExecutor::new("web1", "ops");
        assert_eq!(
            executor.remote_command("find /", Privilege::Elevated),
            "sudo -S find /"
        );
        assert_eq!(executor.remote_command("find /", Privilege::Normal), "find /");
    }

    #[test]
    fn test_elevated_skips_sudo_for_root_and_windows() {
        let root = SshExecutor::new("web1", "root");
        assert_eq!(root.remote_command("find /", Privilege::Elevated), "find /");

        let windows = SshExecutor::new("win1", "Administrator").with_windows(true);
        assert_eq!(
            windows.remote_command("Get-Location", Privilege::Elevated),
            "Get-Location"
        );
    }

    #[test]
    fn test_describe() {
        let executor = SshExecutor::new("web1", "ops").with_port("2022");
        assert_eq!(executor.describe(), "ops@web1:2022");
    }
}
