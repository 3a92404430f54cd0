//! Scan execution for the command-line front end.

use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, ServerInfo};
use crate::error::{LockscoutError, Result};
use crate::reporter::{Reporter, Summary, json::JsonReporter, terminal::TerminalReporter};
use crate::scanner::{HostScanResult, scan_server};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit code when every host scanned cleanly.
pub const EXIT_OK: u8 = 0;
/// Exit code when at least one host's discovery pass failed.
pub const EXIT_SCAN_FAILED: u8 = 1;
/// Exit code for configuration and usage errors.
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Scans every server in parallel. Results keep the input order.
pub fn scan_servers(servers: &[ServerInfo]) -> Vec<HostScanResult> {
    servers.par_iter().map(scan_server).collect()
}

/// Resolves the servers the CLI asked for.
pub fn load_servers(cli: &Cli, cwd: &Path) -> Result<Vec<ServerInfo>> {
    let (config, path) = Config::load(cli.config.as_deref(), cwd)?;
    info!(path = %path.display(), "Loaded config");
    Ok(config.select_servers(&cli.servers)?)
}

pub fn format_results(cli: &Cli, results: &[HostScanResult]) -> String {
    match cli.format {
        OutputFormat::Terminal => TerminalReporter::new(cli.verbose).report(results),
        OutputFormat::Json => JsonReporter::new().report(results),
    }
}

fn write_output(path: &Path, output: &str) -> Result<()> {
    fs::write(path, output).map_err(|e| LockscoutError::WriteOutput {
        path: path.display().to_string(),
        source: e,
    })
}

/// Runs the CLI and maps the outcome to a process exit code.
pub fn run(cli: &Cli, cwd: &Path) -> ExitCode {
    let servers = match load_servers(cli, cwd) {
        Ok(servers) => servers,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    if servers.is_empty() {
        eprintln!("No servers configured");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    info!(servers = servers.len(), "Starting scan");
    let results = scan_servers(&servers);
    let output = format_results(cli, &results);

    if let Some(ref output_path) = cli.output {
        if let Err(e) = write_output(output_path, &output) {
            eprintln!("Error: {}", crate::error::error_chain(&e));
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
        eprintln!("Output written to {}", output_path.display());
    } else {
        println!("{}", output);
    }

    let summary = Summary::from_results(&results);
    debug!(
        hosts = summary.hosts,
        failed = summary.failed_hosts,
        lockfiles = summary.lockfiles,
        "Scan completed"
    );

    if summary.passed() {
        ExitCode::from(EXIT_OK)
    } else {
        ExitCode::from(EXIT_SCAN_FAILED)
    }
}
