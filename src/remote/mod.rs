//! Remote command execution
//!
//! The discovery core talks to a host only through [`RemoteExecutor`]. Two
//! transports are provided:
//!
//! - [`LocalExecutor`] runs commands through the local shell
//! - [`SshExecutor`] runs commands through the system `ssh` client
//!
//! A transport failure is reported as an [`ExecResult`] with exit status `-1`
//! and the error text in `stderr`, so callers treat it like any failed command.

pub mod local;
pub mod ssh;

pub use local::LocalExecutor;
pub use ssh::SshExecutor;

use crate::types::Privilege;
use std::process::Output;

/// Exit status used when the command could not be run at all.
pub const TRANSPORT_FAILURE_STATUS: i32 = -1;

/// Default SSH connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Outcome of one remote command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// `raw_stdout` decoded as UTF-8, invalid sequences replaced.
    pub stdout: String,
    /// Exact bytes the command wrote to stdout.
    pub raw_stdout: Vec<u8>,
    pub stderr: String,
    pub exit_status: i32,
}

impl ExecResult {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_status: i32) -> Self {
        let stdout = stdout.into();
        Self {
            raw_stdout: stdout.clone().into_bytes(),
            stdout,
            stderr: stderr.into(),
            exit_status,
        }
    }

    pub fn from_bytes(stdout: Vec<u8>, stderr: impl Into<String>, exit_status: i32) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            raw_stdout: stdout,
            stderr: stderr.into(),
            exit_status,
        }
    }

    pub fn success(stdout: impl Into<String>) -> Self {
        Self::new(stdout, "", 0)
    }

    pub fn failure(exit_status: i32, stderr: impl Into<String>) -> Self {
        Self::new("", stderr, exit_status)
    }

    pub fn transport_failure(error: &std::io::Error) -> Self {
        Self::failure(TRANSPORT_FAILURE_STATUS, error.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.exit_status == 0
    }
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self::from_bytes(
            output.stdout,
            String::from_utf8_lossy(&output.stderr).into_owned(),
            // Killed by a signal.
            output.status.code().unwrap_or(TRANSPORT_FAILURE_STATUS),
        )
    }
}

/// Command-execution channel to one host.
pub trait RemoteExecutor: Send + Sync {
    fn exec(&self, command: &str, privilege: Privilege) -> ExecResult;

    /// Human-readable target, used in log fields.
    fn describe(&self) -> String;
}

impl<T: RemoteExecutor + ?Sized> RemoteExecutor for &T {
    fn exec(&self, command: &str, privilege: Privilege) -> ExecResult {
        (**self).exec(command, privilege)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: RemoteExecutor + ?Sized> RemoteExecutor for Box<T> {
    fn exec(&self, command: &str, privilege: Privilege) -> ExecResult {
        (**self).exec(command, privilege)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: RemoteExecutor + ?Sized> RemoteExecutor for std::sync::Arc<T> {
    fn exec(&self, command: &str, privilege: Privilege) -> ExecResult {
        (**self).exec(command, privilege)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
