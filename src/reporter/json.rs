use crate::reporter::{Reporter, Summary};
use crate::scanner::HostScanResult;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    summary: Summary,
    hosts: &'a [HostScanResult],
}

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, results: &[HostScanResult]) -> String {
        let report = JsonReport {
            version: env!("CARGO_PKG_VERSION"),
            summary: Summary::from_results(results),
            hosts: results,
        };
        serde_json::to_string_pretty(&report)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize result: {}"}}"#, e))
    }
}
