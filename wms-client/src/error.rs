//! Error types for the monitoring client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Failures that end a monitoring session
///
/// None of these are recovered locally; the caller decides how to stop.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Service info did not answer with 200
    #[error("Problem with server: {address} (status {status})")]
    Unreachable {
        /// Server base address
        address: String,
        /// HTTP status code returned by the server
        status: u16,
    },

    /// Server answered but is not accepting monitoring traffic
    #[error("The status of the server {address} is not in 'running' mode (reported: {state})")]
    NotReady {
        /// Server base address
        address: String,
        /// State the server reported
        state: String,
    },

    /// 404
    #[error("The wms {endpoint} endpoint was not found")]
    EndpointNotFound { endpoint: String },

    /// 401
    #[error(
        "Authorization is required for {endpoint}: set WMS_MONITOR_TOKEN in the environment"
    )]
    Unauthorized { endpoint: String },

    /// 403
    #[error("Permission is denied to {endpoint}.")]
    Forbidden { endpoint: String },

    /// 500
    #[error("There was a server error when trying to access {endpoint}")]
    ServerFault { endpoint: String },

    /// Any other status, only raised in strict mode
    #[error("The {endpoint} response code {status} is not recognized.")]
    Unrecognized { endpoint: String, status: u16 },

    /// A success response whose body could not be used
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// Token contains characters that cannot be sent in a header
    #[error("WMS_MONITOR_TOKEN is not a valid header value")]
    InvalidToken,

    /// Server address cannot be used as a base URL
    #[error("Invalid server address: {address}")]
    InvalidAddress { address: String },

    /// The working directory of the run could not be resolved
    #[error("Failed to resolve working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    /// Transport-level failure (connection refused, DNS, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Log event could not be serialized
    #[error("Failed to serialize log event: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MonitorError {
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Exit code the process should terminate with
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidToken | Self::InvalidAddress { .. } => 2,
            _ => 1,
        }
    }

    /// Check if this error came from classifying a response status
    pub fn is_classified(&self) -> bool {
        matches!(
            self,
            Self::EndpointNotFound { .. }
                | Self::Unauthorized { .. }
                | Self::Forbidden { .. }
                | Self::ServerFault { .. }
                | Self::Unrecognized { .. }
        )
    }
}
