//! PDF upload endpoint: creates a session and indexes its documents

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::path::Path;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::ingestion::{PdfParser, TextChunker};
use crate::server::state::AppState;
use crate::storage::SessionDb;
use crate::types::{validate_session_name, Chunk, ChunkSource, MessageResponse};

/// An uploaded file, buffered in memory
struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

/// POST /upload_pdfs - upload 1-3 PDFs and create a named session
pub async fn upload_pdfs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>> {
    let mut session_name: Option<String> = None;
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "session_name" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::internal(format!("Failed to read session name: {}", e)))?;
                session_name = Some(value);
            }
            "pdfs" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("file_{}.pdf", Uuid::new_v4()));
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::internal(format!("Failed to read file: {}", e)))?;
                files.push(UploadedFile {
                    filename,
                    data: data.to_vec(),
                });
            }
            other => {
                tracing::debug!("Ignoring unexpected multipart field: {}", other);
            }
        }
    }

    let session_name = validate_upload(
        session_name,
        files.len(),
        state.sessions(),
        state.config().uploads.max_files,
    )?;

    tracing::info!(
        "Uploading {} file(s) into new session '{}'",
        files.len(),
        session_name
    );

    let chunking = &state.config().chunking;
    let chunker = TextChunker::new(
        chunking.chunk_size,
        chunking.chunk_overlap,
        chunking.min_chunk_size,
    );

    // Parse and chunk every file before touching any external store; a
    // single unparsable file aborts the whole upload.
    let mut chunks: Vec<Chunk> = Vec::new();
    for file in &files {
        save_upload(&state, file).await?;

        let parsed = PdfParser::parse(&file.filename, &file.data)?;
        let source = ChunkSource {
            filename: file.filename.clone(),
            page_count: parsed.total_pages,
        };
        let file_chunks = chunker.chunk(&session_name, &parsed.content, &source);
        tracing::info!(
            "Parsed '{}': {} pages, {} chunks",
            file.filename,
            parsed.total_pages.unwrap_or(1),
            file_chunks.len()
        );
        chunks.extend(file_chunks);
    }

    // Embed all chunk text in one batch
    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let embeddings = state.embedding_provider().embed_batch(&texts).await?;
    for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
        chunk.embedding = embedding;
    }

    // Persist vectors under the session's collection
    state.vector_store().ensure_collection(&session_name).await?;
    state
        .vector_store()
        .insert_chunks(&session_name, &chunks)
        .await?;

    // Record the session with empty history
    state.sessions().create(&session_name)?;

    tracing::info!(
        "Session '{}' created with {} chunks",
        session_name,
        chunks.len()
    );

    Ok(Json(MessageResponse::new(format!(
        "Session '{}' created successfully",
        session_name
    ))))
}

/// Validate an upload request once all multipart fields are collected.
///
/// Checks, in order: name present, name policy, name not already taken,
/// file count within bounds. Returns the accepted session name.
fn validate_upload(
    session_name: Option<String>,
    file_count: usize,
    sessions: &SessionDb,
    max_files: usize,
) -> Result<String> {
    let session_name = session_name.ok_or_else(|| Error::validation("Session name is required"))?;
    validate_session_name(&session_name)?;

    if sessions.exists(&session_name)? {
        return Err(Error::SessionExists(session_name));
    }

    if file_count == 0 || file_count > max_files {
        return Err(Error::validation(format!(
            "Upload between 1 and {} PDFs",
            max_files
        )));
    }

    Ok(session_name)
}

/// Save an uploaded file to the upload directory under a sanitized,
/// UUID-prefixed name
async fn save_upload(state: &AppState, file: &UploadedFile) -> Result<()> {
    let safe_name = sanitize_filename(&file.filename);
    let path = state
        .config()
        .uploads
        .dir
        .join(format!("{}_{}", Uuid::new_v4(), safe_name));
    tokio::fs::write(&path, &file.data).await?;
    Ok(())
}

/// Strip path components and replace suspect characters.
///
/// Only the basename survives, with anything outside `[A-Za-z0-9._-]`
/// replaced by `_`.
fn sanitize_filename(filename: &str) -> String {
    let basename = Path::new(filename)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload.pdf");

    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(|c| c == '.' || c == '_').is_empty() {
        "upload.pdf".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_upload_requires_session_name() {
        let db = SessionDb::in_memory().unwrap();
        let err = validate_upload(None, 1, &db, 3).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_upload_rejects_bad_session_name() {
        let db = SessionDb::in_memory().unwrap();
        let err = validate_upload(name("has space"), 1, &db, 3).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_upload_rejects_duplicate_session_name() {
        let db = SessionDb::in_memory().unwrap();
        db.create("demo").unwrap();

        let err = validate_upload(name("demo"), 1, &db, 3).unwrap_err();
        assert!(matches!(err, Error::SessionExists(_)));
    }

    #[test]
    fn test_upload_rejects_zero_files() {
        let db = SessionDb::in_memory().unwrap();
        let err = validate_upload(name("demo"), 0, &db, 3).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_upload_rejects_too_many_files() {
        let db = SessionDb::in_memory().unwrap();
        let err = validate_upload(name("demo"), 4, &db, 3).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_upload_accepts_bounds() {
        let db = SessionDb::in_memory().unwrap();
        assert_eq!(validate_upload(name("demo"), 1, &db, 3).unwrap(), "demo");
        assert_eq!(validate_upload(name("demo"), 3, &db, 3).unwrap(), "demo");
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/tmp/report.pdf"), "report.pdf");
    }

    #[test]
    fn test_sanitize_replaces_suspect_chars() {
        assert_eq!(sanitize_filename("my report (v2).pdf"), "my_report__v2_.pdf");
    }

    #[test]
    fn test_sanitize_rejects_empty_basenames() {
        assert_eq!(sanitize_filename("..."), "upload.pdf");
        assert_eq!(sanitize_filename("___"), "upload.pdf");
    }
}
