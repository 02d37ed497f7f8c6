//! Document chunk types with source tracking

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a chunk came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSource {
    /// Original (client-supplied) filename
    pub filename: String,
    /// Total pages in the source PDF, when known
    pub page_count: Option<u32>,
}

/// A text segment extracted from an uploaded document.
///
/// Created once at upload, stored in the vector index under the owning
/// session's collection, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier (doubles as the vector point id)
    pub id: Uuid,
    /// Owning session name
    pub session_name: String,
    /// Text payload
    pub content: String,
    /// Embedding vector (empty until embedded)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,
    /// Source provenance
    pub source: ChunkSource,
    /// Position of this chunk within its source document
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk with a fresh id and no embedding
    pub fn new(
        session_name: impl Into<String>,
        content: impl Into<String>,
        source: ChunkSource,
        chunk_index: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_name: session_name.into(),
            content: content.into(),
            embedding: Vec::new(),
            source,
            chunk_index,
        }
    }
}
