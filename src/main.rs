// ABOUTME: Entry point for the medic CLI application.
// ABOUTME: Parses arguments, sets up logging and dispatches to command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use medic::config;
use medic::error::Result;
use medic::output::Output;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, then the verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output.into());

    match run(cli, &mut output).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output.error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Run the selected command. `Ok(false)` means a clean run with a failing
/// result (error outcome, unhealthy probe).
async fn run(cli: Cli, output: &mut Output) -> Result<bool> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Alert { payload } => {
            Ok(commands::alert(config_path, &payload, cli.force, output).await)
        }
        Commands::Check => commands::check(config_path, cli.force, output).await,
        Commands::Restart => commands::restart(config_path, cli.force, output).await,
        Commands::Probe { url } => commands::probe(config_path, url, output).await,
        Commands::Init {
            resource_group,
            container_group,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(
                &cwd,
                resource_group.as_deref(),
                container_group.as_deref(),
                cli.force,
            )?;
            output.progress(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(true)
        }
    }
}
