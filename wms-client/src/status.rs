//! Status update endpoint

use chrono::{DateTime, Local, TimeZone};
use reqwest::Method;
use tracing::debug;
use wms_core::domain::event::LogEvent;
use wms_core::domain::session::WorkflowSession;
use wms_core::dto::workflow::StatusUpdateForm;

use crate::error::Result;
use crate::{UPDATE_STATUS_ENDPOINT, WmsClient};

/// Formats a time the way C's `asctime` does, e.g. `Sun Oct 18 09:05:01 2026`
pub fn asctime<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%a %b %e %H:%M:%S %Y").to_string()
}

impl WmsClient {
    /// Send one log event to the server under `session`
    ///
    /// # Arguments
    /// * `session` - The active workflow session
    /// * `event` - The log event; normalized before sending
    pub async fn report_status(&self, session: &WorkflowSession, event: &LogEvent) -> Result<()> {
        let form = StatusUpdateForm {
            msg: event.normalize()?,
            timestamp: asctime(&Local::now()),
            id: session.workflow_id.clone(),
        };

        let url = format!("{}{}", session.server_address, UPDATE_STATUS_ENDPOINT);
        debug!("Reporting status for workflow {}", session.workflow_id);

        let response = self.request(Method::POST, &url).form(&form).send().await?;

        self.classifier
            .classify(response.status().as_u16(), UPDATE_STATUS_ENDPOINT)?;

        Ok(())
    }
}
