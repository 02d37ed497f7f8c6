//! Request types for the HTTP surface

use serde::{Deserialize, Serialize};

/// Body of `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// Target session
    pub session_name: String,
    /// The new user message
    pub user_input: String,
}

/// Query parameters of `DELETE /delete_session`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteSessionParams {
    /// Session to delete
    #[serde(default)]
    pub session_name: String,
}
