//! Keydrill - Password strength checker and brute-force recovery demo

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keydrill::cli::{commands, Cli, Commands, OutputFormat};
use keydrill::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if !config.general.color {
        colored::control::set_override(false);
    }

    // Initialize logging; RUST_LOG wins over the config level
    let level = if cli.verbose {
        "debug"
    } else {
        config.general.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("keydrill={level}")))?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(filter)
        .init();

    let output = cli.output.unwrap_or(OutputFormat::Human);

    match &cli.command {
        Commands::Crack(args) => commands::run_crack(args, &config, output)?,
        Commands::Check(args) => commands::run_check(args, &config, output)?,
        Commands::Hash(args) => commands::run_hash(args)?,
        Commands::Config(args) => commands::run_config(args, &config)?,
    }

    Ok(())
}
