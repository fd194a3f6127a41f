//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod check;
mod run;

pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;
use wms_client::WmsClient;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Verify the server is reachable and running
    Check,
    /// Register a workflow and forward log events read from stdin
    Run(RunArgs),
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = WmsClient::new(config.host.as_str(), config.token.clone())?
        .with_strict_mode(config.strict);

    match command {
        Commands::Check => check::handle_check(&client).await,
        Commands::Run(args) => run::handle_run(client, args).await,
    }
}
