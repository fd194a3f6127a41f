//! Service info DTOs

use serde::{Deserialize, Serialize};

/// State a server reports when it accepts monitoring traffic
pub const RUNNING_STATUS: &str = "running";

/// Body of `GET /api/service-info`
///
/// Only `status` is interpreted; other members are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub status: Option<String>,
}

impl ServiceInfo {
    pub fn is_running(&self) -> bool {
        self.status.as_deref() == Some(RUNNING_STATUS)
    }
}
