//! Run command handler
//!
//! Establishes a monitoring session and forwards every log event the
//! workflow engine writes to stdin.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Args;
use colored::*;
use tracing::info;
use wms_client::{WmsClient, WorkflowMonitor};
use wms_core::domain::session::{RunMetadata, RunParameters, WORKFLOW_NAME_PARAM};

use crate::input::forward_events;

/// Arguments of the `run` command
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Display name of the workflow
    #[arg(long)]
    pub workflow_name: Option<String>,

    /// Command line that launched the workflow
    #[arg(long)]
    pub command: Option<String>,

    /// Working directory of the workflow (defaults to the current directory)
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Named run parameter (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

impl RunArgs {
    pub fn metadata(&self) -> RunMetadata {
        RunMetadata::new(self.command.clone(), self.directory.clone())
    }

    /// Run parameters, with the workflow name under its own key
    pub fn parameters(&self) -> RunParameters {
        let mut params: RunParameters = self.params.iter().cloned().collect();
        if let Some(name) = &self.workflow_name {
            params.insert(WORKFLOW_NAME_PARAM.to_string(), name.clone());
        }
        params
    }
}

/// Parse a `KEY=VALUE` pair
fn parse_key_val(input: &str) -> Result<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{}'", input))?;

    if key.is_empty() {
        return Err(anyhow!("parameter key cannot be empty in '{}'", input));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Register the workflow, then forward stdin events until EOF
pub async fn handle_run(client: WmsClient, args: RunArgs) -> Result<()> {
    let monitor = WorkflowMonitor::start(client, &args.metadata(), &args.parameters()).await?;

    eprintln!(
        "{} {}",
        "Monitoring workflow".green().bold(),
        monitor.session().workflow_id
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let forwarded = forward_events(stdin, &monitor).await?;

    info!("Forwarded {} log event(s)", forwarded);
    Ok(())
}
