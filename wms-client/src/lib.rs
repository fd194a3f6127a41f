//! WMS HTTP Client
//!
//! Reports the lifecycle and log events of a running workflow to a WMS
//! monitoring server.
//!
//! A session runs in three steps: verify the server is up and running,
//! create (or re-bind to) a workflow on it, then send one status update per
//! log event. Every failure is returned as a [`MonitorError`]; nothing in this
//! crate terminates the process.
//!
//! # Example
//!
//! ```no_run
//! use wms_client::{WmsClient, WorkflowMonitor};
//! use wms_core::domain::event::{JobHandle, LogEvent};
//! use wms_core::domain::session::{RunMetadata, RunParameters};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = WmsClient::new("http://localhost:5000", None)?;
//!     let monitor =
//!         WorkflowMonitor::start(client, &RunMetadata::default(), &RunParameters::new()).await?;
//!
//!     monitor
//!         .log_handler(&LogEvent::new().with_job(JobHandle::new("align")))
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod error;
mod monitor;
mod service;
mod status;
mod workflows;

// Re-export commonly used types
pub use classify::ResponseClassifier;
pub use error::{MonitorError, Result};
pub use monitor::{LogHandler, WorkflowMonitor};
pub use status::asctime;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, IntoUrl, Method, RequestBuilder, Url};

/// Endpoint that reports server health
pub const SERVICE_INFO_ENDPOINT: &str = "/api/service-info";
/// Endpoint that creates or re-binds a workflow
pub const CREATE_WORKFLOW_ENDPOINT: &str = "/create_workflow";
/// Endpoint that receives log events
pub const UPDATE_STATUS_ENDPOINT: &str = "/update_workflow_status";

/// Endpoint that updates the metadata of workflow `id`, as named in diagnostics
pub fn workflow_endpoint(id: &str) -> String {
    format!("/api/workflow/{}", id)
}

/// HTTP client for the WMS monitoring API
///
/// Every request goes through [`WmsClient::headers`], so the bearer token is
/// attached uniformly when one is configured.
#[derive(Debug, Clone)]
pub struct WmsClient {
    /// Base URL of the server (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Token as configured
    token: Option<String>,
    /// Pre-built `Authorization` header value
    authorization: Option<HeaderValue>,
    classifier: ResponseClassifier,
}

impl WmsClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the server (e.g., "http://localhost:5000")
    /// * `token` - Bearer token, if the server requires authorization
    ///
    /// # Errors
    /// [`MonitorError::InvalidToken`] if the token cannot be sent as a header.
    ///
    /// # Example
    /// ```
    /// use wms_client::WmsClient;
    ///
    /// let client = WmsClient::new("http://localhost:5000/", None).unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the server
    /// * `token` - Bearer token, if any
    /// * `client` - A configured reqwest Client
    pub fn with_client(
        base_url: impl Into<String>,
        token: Option<String>,
        client: Client,
    ) -> Result<Self> {
        let token = token.filter(|t| !t.is_empty());
        let authorization = token
            .as_deref()
            .map(|t| {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", t))
                    .map_err(|_| MonitorError::InvalidToken)?;
                value.set_sensitive(true);
                Ok::<_, MonitorError>(value)
            })
            .transpose()?;

        let base_url = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token,
            authorization,
            classifier: ResponseClassifier::default(),
        })
    }

    /// Make unrecognized status codes fatal
    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.classifier = ResponseClassifier::new(strict_mode);
        self
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn classifier(&self) -> &ResponseClassifier {
        &self.classifier
    }

    /// Authentication headers, or `None` when no token is configured
    pub fn headers(&self) -> Option<HeaderMap> {
        self.authorization.as_ref().map(|value| {
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value.clone());
            headers
        })
    }

    // =============================================================================
    // Request Builders
    // =============================================================================

    /// Start a request to `url` with the authentication headers applied
    fn request<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.headers() {
            Some(headers) => builder.headers(headers),
            None => builder,
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// URL of workflow `id`, with the id encoded as a single path segment
    fn workflow_url(&self, id: &str) -> Result<Url> {
        let invalid = || MonitorError::InvalidAddress {
            address: self.base_url.clone(),
        };

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["api", "workflow", id]);
        Ok(url)
    }
}
