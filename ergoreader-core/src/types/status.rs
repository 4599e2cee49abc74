//! Catalog load status

use serde::{Deserialize, Serialize};

/// Session-wide status of the remote catalog load
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,

    Loading,

    /// Carries the user-facing message
    Error(String),

    Success,
}

impl LoadStatus {
    /// User-facing message for the error state
    pub fn message(&self) -> Option<&str> {
        match self {
            LoadStatus::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
