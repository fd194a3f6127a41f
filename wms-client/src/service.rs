//! Service info endpoint

use reqwest::{Method, StatusCode};
use tracing::{debug, info};
use wms_core::dto::service::ServiceInfo;

use crate::error::{MonitorError, Result};
use crate::{SERVICE_INFO_ENDPOINT, WmsClient};

impl WmsClient {
    /// Verify the server is reachable and in `running` state
    ///
    /// This is fail-fast: a non-200 answer is [`MonitorError::Unreachable`],
    /// and any reported state other than `running` is
    /// [`MonitorError::NotReady`].
    ///
    /// # Returns
    /// The decoded service info
    pub async fn verify_service(&self) -> Result<ServiceInfo> {
        let url = self.endpoint_url(SERVICE_INFO_ENDPOINT);
        debug!("Checking service info at {}", url);

        let response = self.request(Method::GET, &url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(MonitorError::Unreachable {
                address: self.base_url.clone(),
                status: status.as_u16(),
            });
        }

        let info: ServiceInfo = response
            .json()
            .await
            .map_err(|e| MonitorError::malformed(SERVICE_INFO_ENDPOINT, e.to_string()))?;

        if !info.is_running() {
            return Err(MonitorError::NotReady {
                address: self.base_url.clone(),
                state: info.status.clone().unwrap_or_else(|| "unknown".to_string()),
            });
        }

        info!("Server {} is running", self.base_url);
        Ok(info)
    }
}
