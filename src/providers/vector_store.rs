//! Vector store provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Chunk;

/// Search result from the vector store
#[derive(Debug, Clone)]
pub struct VectorSearchResult {
    /// The matched chunk (embedding not round-tripped)
    pub chunk: Chunk,
    /// Similarity score, higher is more similar
    pub similarity: f32,
}

/// Trait for vector storage and similarity search, namespaced by collection.
///
/// The collection name is the session name; it is validated against the
/// session naming policy before it ever reaches an implementation.
///
/// Implementation: `QdrantStore` (Qdrant REST API).
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Create the collection if it does not exist yet
    async fn ensure_collection(&self, collection: &str) -> Result<()>;

    /// Insert chunks (with embeddings already attached) into a collection
    async fn insert_chunks(&self, collection: &str, chunks: &[Chunk]) -> Result<()>;

    /// Return the `top_k` chunks nearest to `query_embedding`
    async fn search(
        &self,
        collection: &str,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<VectorSearchResult>>;

    /// Drop a collection and all vectors in it
    async fn drop_collection(&self, collection: &str) -> Result<()>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
