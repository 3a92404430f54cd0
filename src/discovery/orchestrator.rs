//! One discovery pass over one host.

use super::error::{DiscoveryError, FetchError};
use super::fetch::{FileFetcher, RemoteFileFetcher};
use super::locator::LockfileLocator;
use crate::analyzer::{LibraryAnalyzer, LibraryScanner};
use crate::canonical::CanonicalPathSet;
use crate::error::error_chain;
use crate::remote::RemoteExecutor;
use crate::shell::{ShellDialect, detect_dialect, resolve_working_directory};
use crate::types::{CanonicalPath, ScanTarget};
use serde::Serialize;
use tracing::{Span, debug, info, info_span, warn};

/// A candidate that could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: CanonicalPath,
    pub reason: String,
}

/// Outcome of a discovery pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    pub dialect: ShellDialect,
    pub working_directory: String,
    pub libraries: Vec<LibraryScanner>,
    pub skipped: Vec<SkippedFile>,
    /// Candidates dropped because their canonical path was already seen.
    pub duplicates: usize,
}

impl DiscoveryReport {
    fn new(dialect: ShellDialect, working_directory: String) -> Self {
        Self {
            dialect,
            working_directory,
            libraries: Vec::new(),
            skipped: Vec::new(),
            duplicates: 0,
        }
    }

    pub fn library_count(&self) -> usize {
        self.libraries.iter().map(|s| s.libraries.len()).sum()
    }
}

/// Discovers, canonicalizes, fetches and analyzes the lockfiles of one host.
///
/// Holds no mutable state, so one orchestrator per host can run concurrently
/// with others. Every event of a pass is emitted inside the orchestrator's span.
pub struct DiscoveryOrchestrator<'a> {
    executor: &'a dyn RemoteExecutor,
    analyzer: &'a dyn LibraryAnalyzer,
    /// Reads through `executor` in the detected dialect when unset
    fetcher: Option<&'a dyn FileFetcher>,
    span: Span,
}

impl<'a> DiscoveryOrchestrator<'a> {
    pub fn new(executor: &'a dyn RemoteExecutor, analyzer: &'a dyn LibraryAnalyzer) -> Self {
        let span = info_span!("discovery", target_host = %executor.describe());
        Self {
            executor,
            analyzer,
            fetcher: None,
            span,
        }
    }

    pub fn with_fetcher(mut self, fetcher: &'a dyn FileFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Runs a pass unless there is nothing to do.
    ///
    /// Returns `Ok(None)` without touching the host when `existing` already
    /// holds results or the target declares no lockfiles and no search.
    pub fn discover(
        &self,
        target: &ScanTarget,
        existing: &[LibraryScanner],
    ) -> Result<Option<DiscoveryReport>, DiscoveryError> {
        let _enter = self.span.enter();

        if !existing.is_empty() {
            debug!("Library results already present, skipping discovery");
            return Ok(None);
        }
        if target.has_nothing_to_scan() {
            debug!("No lockfiles declared and search disabled");
            return Ok(None);
        }

        let dialect = detect_dialect(self.executor);
        let working_directory = resolve_working_directory(self.executor, dialect);
        info!(dialect = %dialect, "Scanning language-specific packages");

        let candidates =
            LockfileLocator::new(self.executor).locate(target, dialect, &working_directory)?;

        let remote;
        let fetcher: &dyn FileFetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => {
                remote = RemoteFileFetcher::new(self.executor, dialect)
                    .with_privilege(target.privilege);
                &remote
            }
        };

        let style = dialect.path_style();
        let mut seen = CanonicalPathSet::new();
        let mut report = DiscoveryReport::new(dialect, working_directory);

        for raw in candidates.iter().filter(|p| !p.is_empty()) {
            let path = style.resolve(&report.working_directory, raw);
            if !seen.insert(&path) {
                debug!(path = %path, raw = %raw, "Skipping duplicate lockfile");
                report.duplicates += 1;
                continue;
            }

            let (file_mode, content) = match fetch(fetcher, &path) {
                Ok(fetched) => fetched,
                Err(e) => {
                    let reason = error_chain(&e);
                    warn!(path = %path, error = %reason, "Failed to fetch lockfile, skipping");
                    report.skipped.push(SkippedFile { path, reason });
                    continue;
                }
            };

            let scanners = self
                .analyzer
                .analyze(&path, &content, file_mode, target.offline)
                .map_err(|e| DiscoveryError::analyze(path.as_str(), e))?;
            report.libraries.extend(scanners);
        }

        info!(
            lockfiles = report.libraries.len(),
            skipped = report.skipped.len(),
            duplicates = report.duplicates,
            "Discovery finished"
        );
        Ok(Some(report))
    }
}

fn fetch(fetcher: &dyn FileFetcher, path: &CanonicalPath) -> Result<(u32, Vec<u8>), FetchError> {
    let file_mode = fetcher.stat(path)?;
    let content = fetcher.read_all(path)?;
    Ok((file_mode, content))
}
