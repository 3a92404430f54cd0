pub mod json;
pub mod terminal;

use crate::scanner::HostScanResult;
use serde::Serialize;

pub trait Reporter {
    fn report(&self, results: &[HostScanResult]) -> String;
}

/// Totals across every scanned host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub hosts: usize,
    pub failed_hosts: usize,
    pub lockfiles: usize,
    pub libraries: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn from_results(results: &[HostScanResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.hosts += 1;
            if result.is_failure() {
                summary.failed_hosts += 1;
            }
            if let Some(report) = &result.report {
                summary.lockfiles += report.libraries.len();
                summary.libraries += report.library_count();
                summary.skipped += report.skipped.len();
            }
            summary
        })
    }

    pub fn passed(&self) -> bool {
        self.failed_hosts == 0
    }
}
