//! Scour CLI - data-quality detection and cleaning for tabular files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber; `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze { file, json, config } => commands::analyze::run(file, json, config),

        Commands::Clean {
            file,
            output,
            format,
            log,
            config,
        } => commands::clean::run(file, output, format, log, config),

        Commands::Summary { file, json, config } => commands::summary::run(file, json, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
