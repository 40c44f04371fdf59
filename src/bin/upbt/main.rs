//! upbt CLI - A build driver for Unreal Engine plugins

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("upbt=debug")
    } else if cli.quiet {
        EnvFilter::new("upbt=error")
    } else {
        EnvFilter::new("upbt=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    let flags = cli.output_flags();
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, flags),
        Commands::Engines(args) => commands::engines::execute(args, flags),
        Commands::Config(args) => commands::config::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
