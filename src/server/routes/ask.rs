//! Question answering endpoint: retrieval-augmented chat over a session

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse, Turn};

/// POST /ask - answer a question against a session's indexed documents
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let session_name = request.session_name.trim();
    let user_input = request.user_input.trim();

    if session_name.is_empty() {
        return Err(Error::validation("Session name is required"));
    }
    if user_input.is_empty() {
        return Err(Error::validation("Question must not be empty"));
    }

    // Rejects unknown sessions before any provider call
    let mut history = state.sessions().history(session_name)?;

    tracing::info!("Answering question in session '{}'", session_name);

    let query_embedding = state.embedding_provider().embed(user_input).await?;
    let results = state
        .vector_store()
        .search(
            session_name,
            &query_embedding,
            state.config().vector_db.top_k,
        )
        .await?;

    tracing::debug!("Retrieved {} context chunks", results.len());

    let context = PromptBuilder::build_context(&results);
    let messages = PromptBuilder::build_messages(&history, &context, user_input);
    let answer = state.llm_provider().chat(&messages).await?;

    history.push(Turn::user(user_input));
    history.push(Turn::ai(&answer));
    state.sessions().update_history(session_name, history)?;

    Ok(Json(AskResponse { response: answer }))
}
