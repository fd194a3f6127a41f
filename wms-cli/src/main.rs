//! WMS Monitor CLI
//!
//! Command-line boundary for the WMS monitoring client. This is the only
//! place where a monitoring failure turns into a process exit.

mod commands;
mod config;
mod input;

use clap::{ArgAction, Parser};
use colored::*;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wms_client::MonitorError;

#[derive(Parser)]
#[command(name = "wms-monitor")]
#[command(about = "Report workflow progress to a WMS monitoring server", long_about = None)]
struct Cli {
    /// Address of the WMS server
    #[arg(long, env = "WMS_MONITOR_HOST")]
    host: String,

    /// Bearer token for the server
    #[arg(long, env = "WMS_MONITOR_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Treat unrecognized response codes as fatal
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config {
        host: cli.host,
        token: cli.token,
        strict: cli.strict,
    };

    if let Err(e) = config.validate() {
        eprintln!("{} {:#}", "Invalid configuration:".red().bold(), e);
        std::process::exit(2);
    }

    if let Err(e) = handle_command(cli.command, &config).await {
        eprintln!("{}", format!("{:#}", e).red());
        let exit_code = e
            .downcast_ref::<MonitorError>()
            .map(MonitorError::exit_code)
            .unwrap_or(1);
        std::process::exit(exit_code);
    }
}

/// Logs go to stderr so stdout stays free for command output
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "wms_monitor=info,wms_client=info",
        1 => "wms_monitor=debug,wms_client=debug",
        _ => "wms_monitor=trace,wms_client=trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
