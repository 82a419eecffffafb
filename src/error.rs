//! Error types for the profile pipeline

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("No user id in secure storage")]
    NotAuthenticated,

    #[error("Secure storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Server returned HTTP {0}")]
    Status(u16),

    #[error("Malformed profile response: {0}")]
    Decode(String),
}

impl ProfileError {
    /// Short machine-friendly cause, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            ProfileError::NotAuthenticated => "not_authenticated",
            ProfileError::Storage(_) => "storage",
            ProfileError::Transport(_) => "transport",
            ProfileError::Timeout(_) => "timeout",
            ProfileError::Status(_) => "status",
            ProfileError::Decode(_) => "decode",
        }
    }
}

impl From<rusqlite::Error> for ProfileError {
    fn from(e: rusqlite::Error) -> Self {
        ProfileError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::Decode(e.to_string())
    }
}
