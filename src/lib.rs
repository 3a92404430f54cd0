pub mod analyzer;
pub mod canonical;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod remote;
pub mod reporter;
pub mod run;
pub mod scanner;
pub mod shell;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use analyzer::{LibraryAnalyzer, LibraryScanner, LockfileAnalyzer};
pub use canonical::PathStyle;
pub use cli::{Cli, OutputFormat};
pub use config::{Config, ServerInfo};
pub use discovery::{DiscoveryOrchestrator, DiscoveryReport};
pub use error::{LockscoutError, Result};
pub use remote::{ExecResult, LocalExecutor, RemoteExecutor, SshExecutor};
pub use reporter::{Reporter, json::JsonReporter, terminal::TerminalReporter};
pub use scanner::{HostScanResult, OsScanner, PseudoScanner};
pub use shell::ShellDialect;
pub use types::{CanonicalPath, Privilege, ScanMode, ScanTarget};
