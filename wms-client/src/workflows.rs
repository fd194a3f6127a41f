//! Workflow registration endpoints

use reqwest::Method;
use tracing::{debug, info};
use wms_core::domain::session::{RunMetadata, RunParameters, WorkflowSession};
use wms_core::dto::workflow::{CreatedWorkflow, CreateWorkflowForm};

use crate::error::{MonitorError, Result};
use crate::{CREATE_WORKFLOW_ENDPOINT, WmsClient, workflow_endpoint};

impl WmsClient {
    // =============================================================================
    // Workflow Registration
    // =============================================================================

    /// Create a workflow on the server, or re-bind to an existing one
    ///
    /// Sends the run's command and working directory to `/create_workflow`
    /// (with `params` as query string), then pushes `params` to
    /// `/api/workflow/<id>` so the server shows the right display metadata.
    ///
    /// # Arguments
    /// * `metadata` - Command and directory of the run
    /// * `params` - Named run parameters, including the workflow name
    ///
    /// # Returns
    /// The session bound to the server-issued workflow id
    pub async fn create_or_retrieve_workflow(
        &self,
        metadata: &RunMetadata,
        params: &RunParameters,
    ) -> Result<WorkflowSession> {
        let workdir = metadata
            .working_directory()
            .map_err(MonitorError::WorkingDirectory)?;

        let form = CreateWorkflowForm {
            command: metadata.command.clone(),
            workdir: workdir.display().to_string(),
        };

        let url = self.endpoint_url(CREATE_WORKFLOW_ENDPOINT);
        debug!("Creating workflow (workdir: {})", form.workdir);

        let response = self
            .request(Method::GET, &url)
            .query(params)
            .form(&form)
            .send()
            .await?;

        self.classifier
            .classify(response.status().as_u16(), CREATE_WORKFLOW_ENDPOINT)?;

        let created: CreatedWorkflow = response
            .json()
            .await
            .map_err(|e| MonitorError::malformed(CREATE_WORKFLOW_ENDPOINT, e.to_string()))?;

        let id = created.id.ok_or_else(|| {
            MonitorError::malformed(CREATE_WORKFLOW_ENDPOINT, "response has no `id` field")
        })?;

        self.update_workflow(&id, params).await?;

        info!("Monitoring workflow {} on {}", id, self.base_url);
        Ok(WorkflowSession::new(
            self.base_url.clone(),
            id,
            self.token.clone(),
        ))
    }

    /// Update the server-side display metadata of workflow `id`
    ///
    /// # Arguments
    /// * `id` - The workflow id issued by the server
    /// * `params` - Named run parameters, sent as a JSON body
    pub async fn update_workflow(&self, id: &str, params: &RunParameters) -> Result<()> {
        let endpoint = workflow_endpoint(id);
        let url = self.workflow_url(id)?;

        let response = self.request(Method::PUT, url).json(params).send().await?;

        self.classifier
            .classify(response.status().as_u16(), &endpoint)?;

        Ok(())
    }
}
