//! HTTP routes for the chat backend

pub mod ask;
pub mod sessions;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::server::state::AppState;

/// Build the four public routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload_pdfs",
            post(upload::upload_pdfs).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/ask", post(ask::ask))
        .route("/sessions", get(sessions::list_sessions))
        .route("/delete_session", delete(sessions::delete_session))
}
