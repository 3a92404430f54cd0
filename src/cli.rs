use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "lockscout",
    version,
    about = "Agentless lockfile discovery for remote hosts",
    long_about = "lockscout finds dependency lockfiles on local or SSH-reachable hosts, without installing an agent, and lists the libraries they pin."
)]
pub struct Cli {
    /// Config file (default: ./lockscout.{toml,yaml,yml,json}, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only scan the named servers (repeatable)
    #[arg(short, long = "server", value_name = "NAME")]
    pub servers: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
