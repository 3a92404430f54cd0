use clap::Parser;
use lockscout::{Cli, logging, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet);

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Error: cannot determine current directory: {}", e);
            return ExitCode::from(run::EXIT_CONFIG_ERROR);
        }
    };

    run::run(&cli, &cwd)
}
