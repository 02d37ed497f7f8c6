//! Response types for the HTTP surface

use serde::{Deserialize, Serialize};

/// Generic `{message}` body returned by upload and delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    /// Build from anything stringy
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of a successful `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The LLM's answer text
    pub response: String,
}

/// Body of `GET /sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    /// Known session names
    pub sessions: Vec<String>,
}
