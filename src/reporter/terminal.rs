use crate::analyzer::LibraryScanner;
use crate::discovery::DiscoveryReport;
use crate::reporter::{Reporter, Summary};
use crate::scanner::HostScanResult;
use colored::Colorize;

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn format_lockfile(&self, scanner: &LibraryScanner) -> String {
        let mut output = format!(
            "  {} {} ({} libraries, mode {:o})\n",
            format!("[{}]", scanner.ecosystem).cyan(),
            scanner.lockfile_path,
            scanner.libraries.len(),
            scanner.file_mode
        );

        if self.verbose {
            output.push_str(&format!("    sha256: {}\n", scanner.sha256.as_str().dimmed()));
            for library in &scanner.libraries {
                output.push_str(&format!("    {} {}\n", library.name, library.version.dimmed()));
            }
        }

        output
    }

    fn format_report(&self, report: &DiscoveryReport) -> String {
        let mut output = format!(
            "  shell: {}, working directory: {}\n",
            report.dialect, report.working_directory
        );

        if report.libraries.is_empty() {
            output.push_str(&format!("  {}\n", "No lockfiles found.".green()));
        }
        for scanner in &report.libraries {
            output.push_str(&self.format_lockfile(scanner));
        }
        for skipped in &report.skipped {
            output.push_str(&format!(
                "  {} {}: {}\n",
                "[SKIPPED]".yellow(),
                skipped.path,
                skipped.reason
            ));
        }
        if self.verbose && report.duplicates > 0 {
            output.push_str(&format!(
                "  {} duplicate path(s) ignored\n",
                report.duplicates
            ));
        }

        output
    }

    fn format_host(&self, result: &HostScanResult) -> String {
        let platform = result
            .platform
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("unknown");
        let mut output = format!(
            "{} ({}, {})\n",
            result.server_name.as_str().bold(),
            result.host,
            platform
        );

        match (&result.error, &result.report) {
            (Some(error), _) => {
                output.push_str(&format!("  {} {}\n", "[ERROR]".red().bold(), error));
            }
            (None, Some(report)) => output.push_str(&self.format_report(report)),
            (None, None) => output.push_str(&format!("  {}\n", "Nothing to scan.".dimmed())),
        }

        output
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, results: &[HostScanResult]) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!(
                "lockscout v{} - Agentless lockfile discovery",
                env!("CARGO_PKG_VERSION")
            )
            .bold()
        ));

        for result in results {
            output.push_str(&self.format_host(result));
            output.push('\n');
        }

        output.push_str(&format!("{}\n", "━".repeat(50)));

        let summary = Summary::from_results(results);
        output.push_str(&format!(
            "Summary: {} host(s), {} failed, {} lockfile(s), {} libraries, {} skipped\n",
            summary.hosts,
            summary.failed_hosts.to_string().red().bold(),
            summary.lockfiles,
            summary.libraries,
            summary.skipped.to_string().yellow()
        ));

        if summary.passed() {
            output.push_str(&format!("{}\n", "Result: PASS".green().bold()));
        } else {
            output.push_str(&format!("{}\n", "Result: FAIL".red().bold()));
        }

        output
    }
}
