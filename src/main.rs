mod cli;
mod commands;
mod error;
mod render;

use crate::cli::{Cli, Command};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const CRATES: &[&str] = &[
    "metagame",
    "metagame_cache",
    "metagame_cluster",
    "metagame_collect",
    "metagame_config",
    "metagame_model",
    "metagame_source",
    "metagame_storage",
];

/// `RUST_LOG` if set, otherwise warnings from everything and `level` from
/// our own crates.
fn filter(verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let directives: Vec<String> = CRATES.iter().map(|krate| format!("{krate}={level}")).collect();
    EnvFilter::new(format!("warn,{}", directives.join(",")))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Command::Report(args) => commands::report(config, args).await,
        Command::Stats(args) => commands::stats(config, args).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:?}");
            ExitCode::FAILURE
        },
    }
}
