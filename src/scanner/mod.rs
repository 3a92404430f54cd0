//! Per-host scanning behind the OS-scanner capability interface.

pub mod pseudo;

pub use pseudo::PseudoScanner;

use crate::analyzer::LockfileAnalyzer;
use crate::config::{SERVER_TYPE_PSEUDO, ServerInfo};
use crate::discovery::DiscoveryReport;
use crate::error::{Result, error_chain};
use crate::types::ServerName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// Operating-system family reported by a scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub name: String,
}

impl Platform {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Placeholder for hosts whose OS is never inspected.
    pub fn other() -> Self {
        Self::new("other")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// What one host's scan produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostScanResult {
    pub server_name: ServerName,
    pub host: String,
    pub platform: Option<Platform>,
    /// `None` when the host had nothing to scan or the pass failed.
    pub report: Option<DiscoveryReport>,
    /// Message of the fatal error that ended the pass.
    pub error: Option<String>,
    pub scanned_at: DateTime<Utc>,
}

impl HostScanResult {
    pub fn new(server_name: ServerName, host: impl Into<String>) -> Self {
        Self {
            server_name,
            host: host.into(),
            platform: None,
            report: None,
            error: None,
            scanned_at: Utc::now(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Capability interface shared by every OS-scanner variant.
///
/// Callers run the steps in declaration order, once per host.
pub trait OsScanner: Send {
    fn check_reachability(&mut self) -> Result<()>;
    fn detect_platform(&mut self) -> Platform;
    fn scan_packages(&mut self) -> Result<()>;
    fn scan_libraries(&mut self) -> Result<()>;
    fn post_scan(&mut self) -> Result<()>;
    fn result(&self) -> &HostScanResult;
    fn into_result(self: Box<Self>) -> HostScanResult;
}

/// Selects the scanner variant for a server's configured type.
pub fn detect_os_scanner(server: &ServerInfo) -> Option<Box<dyn OsScanner>> {
    match server.server_type.as_str() {
        SERVER_TYPE_PSEUDO => Some(Box::new(PseudoScanner::new(
            server.clone(),
            server.executor(),
            Box::new(LockfileAnalyzer::new()),
        ))),
        _ => None,
    }
}

/// Runs every scanner step and folds a fatal error into the result.
pub fn run_scanner(mut scanner: Box<dyn OsScanner>) -> HostScanResult {
    if let Err(e) = scanner.check_reachability() {
        let message = error_chain(&e);
        return scanner.into_result().with_error(message);
    }
    let platform = scanner.detect_platform();
    info!(
        server = %scanner.result().server_name,
        platform = %platform,
        "Detected platform"
    );

    let outcome = scanner
        .scan_packages()
        .and_then(|()| scanner.scan_libraries())
        .and_then(|()| scanner.post_scan());

    match outcome {
        Ok(()) => scanner.into_result(),
        Err(e) => {
            let message = error_chain(&e);
            warn!(
                server = %scanner.result().server_name,
                error = %message,
                "Scan failed"
            );
            scanner.into_result().with_error(message)
        }
    }
}

/// Scans one configured server end to end.
pub fn scan_server(server: &ServerInfo) -> HostScanResult {
    match detect_os_scanner(server) {
        Some(scanner) => run_scanner(scanner),
        None => {
            warn!(
                server = %server.name,
                server_type = %server.server_type,
                "Unsupported server type"
            );
            HostScanResult::new(server.name.clone(), server.host.clone())
                .with_error(format!("Unsupported server type: {}", server.server_type))
        }
    }
}
