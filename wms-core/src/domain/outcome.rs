//! Response outcome domain types

use std::fmt;

/// Outcome of a monitoring request, derived purely from its HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Success,
    NotFound,
    Unauthorized,
    Forbidden,
    ServerError,
    Unrecognized(u16),
}

impl ResponseOutcome {
    /// Maps a status code to its outcome
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => Self::Success,
            404 => Self::NotFound,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            500 => Self::ServerError,
            other => Self::Unrecognized(other),
        }
    }
}

impl fmt::Display for ResponseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NotFound => write!(f, "not found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::ServerError => write!(f, "server error"),
            Self::Unrecognized(status) => write!(f, "unrecognized ({status})"),
        }
    }
}
