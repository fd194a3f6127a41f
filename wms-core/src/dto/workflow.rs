//! Workflow DTOs

use serde::{Deserialize, Serialize};

/// Form body of `GET /create_workflow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWorkflowForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub workdir: String,
}

/// Body returned by `GET /create_workflow`
///
/// `id` is optional here so a body without it can be reported as malformed
/// instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedWorkflow {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: Option<String>,
}

/// Form body of `POST /update_workflow_status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateForm {
    /// Normalized log event, serialized as JSON
    pub msg: String,
    pub timestamp: String,
    pub id: String,
}

/// Servers may hand out numeric or string identifiers
fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
