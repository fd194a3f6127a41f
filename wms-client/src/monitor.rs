//! Host-facing monitoring provider
//!
//! Ties the client calls together in the order the server expects them:
//! service verification, then workflow registration, then one status update
//! per log event. A [`WorkflowMonitor`] only exists once a session does, so no
//! event can be sent before registration has succeeded.

use async_trait::async_trait;
use tracing::info;
use wms_core::domain::event::LogEvent;
use wms_core::domain::session::{RunMetadata, RunParameters, WorkflowSession};

use crate::WmsClient;
use crate::error::Result;

/// Receiver of log events emitted by a workflow engine
#[async_trait]
pub trait LogHandler: Send + Sync {
    /// Handles one log event
    ///
    /// # Arguments
    /// * `event` - The log event to handle
    async fn handle(&self, event: LogEvent) -> Result<()>;
}

/// An established monitoring session with a WMS server
#[derive(Debug, Clone)]
pub struct WorkflowMonitor {
    client: WmsClient,
    session: WorkflowSession,
}

impl WorkflowMonitor {
    /// Verify the server and register the workflow
    ///
    /// # Arguments
    /// * `client` - Client for the monitoring server
    /// * `metadata` - Command and directory of the run
    /// * `params` - Named run parameters, including the workflow name
    pub async fn start(
        client: WmsClient,
        metadata: &RunMetadata,
        params: &RunParameters,
    ) -> Result<Self> {
        client.verify_service().await?;
        let session = client.create_or_retrieve_workflow(metadata, params).await?;

        info!(
            "Session established: workflow_id={}, server={}",
            session.workflow_id, session.server_address
        );

        Ok(Self { client, session })
    }

    pub fn session(&self) -> &WorkflowSession {
        &self.session
    }

    /// Send a log event to the server
    pub async fn log_handler(&self, event: &LogEvent) -> Result<()> {
        self.client.report_status(&self.session, event).await
    }
}

#[async_trait]
impl LogHandler for WorkflowMonitor {
    async fn handle(&self, event: LogEvent) -> Result<()> {
        self.log_handler(&event).await
    }
}
