// file: src/main.rs
// version: 1.0.0
// guid: c5d6e7f8-0819-42a3-b4c5-5c6d7e8f9017

//! Host Admin Agent - Main entry point

use anyhow::Context;
use clap::Parser;
use host_admin_agent::{
    cli::{
        args::{Cli, Commands},
        commands::{module_command, ssh_command, AppContext},
    },
    config::loader::ConfigLoader,
    logging::logger,
    system,
};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if cli.json_logs || config.logging.json {
        logger::init_json_logger(&config.logging.level)?;
    } else {
        logger::init_logger(cli.verbose, cli.quiet, &config.logging.level)?;
    }

    if !system::is_root() {
        warn!("Not running as root - system files may not be writable");
    }

    let ctx = AppContext::new(config);
    match cli.command {
        Commands::Module(command) => module_command(&ctx, command).await?,
        Commands::Ssh(command) => ssh_command(&ctx, command).await?,
    }

    Ok(())
}
