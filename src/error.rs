//! Error types for the chat backend

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for chat backend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Chat backend errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation error (missing fields, bad counts, bad names)
    #[error("{0}")]
    Validation(String),

    /// File parsing error
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Session name already taken
    #[error("Session name already exists: {0}")]
    SessionExists(String),

    /// Session does not exist (ask against unknown/deleted session)
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Session not found (delete of unknown session)
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector database error
    #[error("Vector database error: {0}")]
    VectorDb(String),

    /// LLM error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Session store error
    #[error("Session store error: {0}")]
    SessionStore(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a vector db error
    pub fn vector_db(message: impl Into<String>) -> Self {
        Self::VectorDb(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::FileParse { .. } => StatusCode::BAD_REQUEST,
            Error::SessionExists(_) => StatusCode::BAD_REQUEST,
            Error::InvalidSession(_) => StatusCode::BAD_REQUEST,
            Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Error::Embedding(_) => StatusCode::BAD_GATEWAY,
            Error::VectorDb(_) => StatusCode::BAD_GATEWAY,
            Error::Llm(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::SessionStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::SessionStore(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = match &self {
            Error::Config(_) => "config_error",
            Error::Validation(_) => "validation_error",
            Error::FileParse { .. } => "parse_error",
            Error::SessionExists(_) => "session_exists",
            Error::InvalidSession(_) => "invalid_session",
            Error::SessionNotFound(_) => "not_found",
            Error::Embedding(_) => "embedding_error",
            Error::VectorDb(_) => "vector_db_error",
            Error::Llm(_) => "llm_error",
            Error::SessionStore(_) => "session_store_error",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
            Error::Http(_) => "http_error",
            Error::Internal(_) => "internal_error",
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err = Error::validation("Upload between 1 and 3 PDFs");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_session_maps_to_404() {
        let err = Error::SessionNotFound("demo".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_session_maps_to_400() {
        let err = Error::InvalidSession("demo".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_external_failures_are_gateway_errors() {
        assert_eq!(
            Error::embedding("timeout").status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(Error::vector_db("down").status(), StatusCode::BAD_GATEWAY);
        assert_eq!(Error::llm("overloaded").status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
