//! Session domain types

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Server-issued identity of one monitored run
///
/// Created once during registration and read for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSession {
    pub server_address: String,
    pub workflow_id: String,
    pub auth_token: Option<String>,
}

impl WorkflowSession {
    pub fn new(
        server_address: impl Into<String>,
        workflow_id: impl Into<String>,
        auth_token: Option<String>,
    ) -> Self {
        Self {
            server_address: server_address.into(),
            workflow_id: workflow_id.into(),
            auth_token,
        }
    }
}

/// Host-supplied facts about the run being monitored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunMetadata {
    /// Command line that launched the run, if the host knows it
    pub command: Option<String>,
    /// Directory the run executes in; falls back to the process working directory
    pub directory: Option<PathBuf>,
}

impl RunMetadata {
    pub fn new(command: Option<String>, directory: Option<PathBuf>) -> Self {
        Self { command, directory }
    }

    /// Resolves the working directory reported to the server
    ///
    /// An explicit directory is made absolute against the current directory
    /// and `.`/`..` components are resolved lexically; without one the current
    /// directory itself is used.
    pub fn working_directory(&self) -> std::io::Result<PathBuf> {
        match self.directory.as_deref() {
            Some(dir) if !dir.as_os_str().is_empty() => absolute(dir),
            _ => std::env::current_dir(),
        }
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically
fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    let path = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // popping past the root is a no-op
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Named parameters of a run (including its display name)
///
/// Sent as the query string on workflow creation and as the JSON body of the
/// workflow update. Ordered so the encoded forms are stable.
pub type RunParameters = BTreeMap<String, String>;

/// Parameter key carrying the workflow display name
pub const WORKFLOW_NAME_PARAM: &str = "name";
