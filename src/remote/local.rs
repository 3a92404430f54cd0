use super::{ExecResult, RemoteExecutor};
use crate::types::Privilege;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs commands on the scanning machine itself.
///
/// Useful for scanning the local host with the same code path as a remote one.
#[derive(Debug, Clone)]
pub struct LocalExecutor {
    /// Skip `sudo` because we already are root
    is_root: bool,
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalExecutor {
    pub fn new() -> Self {
        Self {
            is_root: current_user_is_root(),
        }
    }

    /// Override root detection
    pub fn with_root(mut self, is_root: bool) -> Self {
        self.is_root = is_root;
        self
    }

    fn build_command(&self, command: &str, privilege: Privilege) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            return cmd;
        }

        if privilege.is_elevated() && !self.is_root {
            let mut cmd = Command::new("sudo");
            cmd.args(["-S", "sh", "-c", command]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        }
    }
}

impl RemoteExecutor for LocalExecutor {
    fn exec(&self, command: &str, privilege: Privilege) -> ExecResult {
        let mut cmd = self.build_command(command, privilege);
        // sudo -S must not hang waiting for a password
        cmd.stdin(Stdio::null());

        match cmd.output() {
            Ok(output) => ExecResult::from(output),
            Err(e) => {
                debug!(command, error = %e, "Failed to spawn local shell");
                ExecResult::transport_failure(&e)
            }
        }
    }

    fn describe(&self) -> String {
        "localhost".to_string()
    }
}

fn current_user_is_root() -> bool {
    if cfg!(windows) {
        return false;
    }
    Command::new("id")
        .arg("-u")
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).trim() == "0")
        .unwrap_or(false)
}
