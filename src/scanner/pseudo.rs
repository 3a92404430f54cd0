//! Scanner for hosts whose operating system is never inspected.
//!
//! Only language-specific lockfiles are collected; OS packages are left alone.

use super::{HostScanResult, OsScanner, Platform};
use crate::analyzer::LibraryAnalyzer;
use crate::config::ServerInfo;
use crate::discovery::{DiscoveryOrchestrator, FileFetcher};
use crate::error::{LockscoutError, Result};
use crate::remote::{RemoteExecutor, TRANSPORT_FAILURE_STATUS};
use crate::types::Privilege;
use tracing::{debug, info_span, warn};

/// Command every supported shell answers.
const IDENTITY_COMMAND: &str = "echo lockscout";

pub struct PseudoScanner {
    server: ServerInfo,
    executor: Box<dyn RemoteExecutor>,
    analyzer: Box<dyn LibraryAnalyzer>,
    fetcher: Option<Box<dyn FileFetcher>>,
    result: HostScanResult,
}

impl PseudoScanner {
    pub fn new(
        server: ServerInfo,
        executor: Box<dyn RemoteExecutor>,
        analyzer: Box<dyn LibraryAnalyzer>,
    ) -> Self {
        let result = HostScanResult::new(server.name.clone(), executor.describe());
        Self {
            server,
            executor,
            analyzer,
            fetcher: None,
            result,
        }
    }

    /// Read files through `fetcher` instead of the host's shell.
    pub fn with_fetcher(mut self, fetcher: Box<dyn FileFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }
}

impl OsScanner for PseudoScanner {
    /// Fails only when the transport itself could not run the command.
    /// Any exit status from the host's shell means the host answered.
    fn check_reachability(&mut self) -> Result<()> {
        let output = self.executor.exec(IDENTITY_COMMAND, Privilege::Normal);
        if output.exit_status == TRANSPORT_FAILURE_STATUS {
            return Err(LockscoutError::Unreachable {
                host: self.result.host.clone(),
                message: output.stderr.trim().to_string(),
            });
        }
        if !output.is_success() {
            warn!(
                host = %self.result.host,
                exit_status = output.exit_status,
                stderr = %output.stderr.trim(),
                "Identity command failed"
            );
        }
        Ok(())
    }

    fn detect_platform(&mut self) -> Platform {
        let platform = Platform::other();
        self.result.platform = Some(platform.clone());
        platform
    }

    fn scan_packages(&mut self) -> Result<()> {
        debug!(server = %self.server.name, "Pseudo host, skipping OS package scan");
        Ok(())
    }

    fn scan_libraries(&mut self) -> Result<()> {
        let target = self.server.scan_target();
        let span = info_span!(
            "discovery",
            server = %self.server.name,
            target_host = %self.result.host
        );

        let mut orchestrator =
            DiscoveryOrchestrator::new(self.executor.as_ref(), self.analyzer.as_ref())
                .with_span(span);
        if let Some(fetcher) = &self.fetcher {
            orchestrator = orchestrator.with_fetcher(fetcher.as_ref());
        }

        let existing = self
            .result
            .report
            .as_ref()
            .map(|report| report.libraries.as_slice())
            .unwrap_or_default();

        if let Some(report) = orchestrator.discover(&target, existing)? {
            self.result.report = Some(report);
        }
        Ok(())
    }

    fn post_scan(&mut self) -> Result<()> {
        Ok(())
    }

    fn result(&self) -> &HostScanResult {
        &self.result
    }

    fn into_result(self: Box<Self>) -> HostScanResult {
        self.result
    }
}
