//! Session listing and deletion endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{DeleteSessionParams, MessageResponse, SessionListResponse};

/// GET /sessions - list all session names
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<SessionListResponse>> {
    let sessions = state.sessions().list()?;
    Ok(Json(SessionListResponse { sessions }))
}

/// DELETE /delete_session?session_name=... - remove a session and its vectors
pub async fn delete_session(
    State(state): State<AppState>,
    Query(params): Query<DeleteSessionParams>,
) -> Result<Json<MessageResponse>> {
    // An absent name is just an unknown session: delete("") is a 404.
    let session_name = params.session_name.trim();
    state.sessions().delete(session_name)?;

    // The session record is gone either way; a failed collection drop is
    // logged rather than surfaced.
    if let Err(e) = state.vector_store().drop_collection(session_name).await {
        tracing::warn!(
            "Failed to drop vector collection for session '{}': {}",
            session_name,
            e
        );
    }

    tracing::info!("Deleted session '{}'", session_name);

    Ok(Json(MessageResponse::new(format!(
        "Session '{}' deleted",
        session_name
    ))))
}
