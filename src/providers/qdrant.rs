//! Qdrant vector store client (REST API)
//!
//! One collection per session; the collection name is the session name.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::types::{Chunk, ChunkSource};

use super::vector_store::{VectorSearchResult, VectorStoreProvider};

/// Qdrant REST client
pub struct QdrantStore {
    client: Client,
    config: VectorDbConfig,
    /// Vector dimensionality used when creating collections
    dimensions: usize,
}

#[derive(Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

#[derive(Serialize)]
struct UpsertPointsRequest<'a> {
    points: &'a [Point],
}

#[derive(Serialize)]
struct Point {
    id: String,
    vector: Vec<f32>,
    payload: PointPayload,
}

#[derive(Serialize, Deserialize)]
struct PointPayload {
    session_name: String,
    content: String,
    filename: String,
    page_count: Option<u32>,
    chunk_index: u32,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    id: serde_json::Value,
    score: f32,
    payload: Option<PointPayload>,
}

impl QdrantStore {
    /// Create a new client
    pub fn new(config: &VectorDbConfig, dimensions: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::vector_db(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
            dimensions,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{}", self.config.url, collection)
    }

    /// Attach the api key header when one is configured
    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }

    fn chunk_to_point(chunk: &Chunk) -> Point {
        Point {
            id: chunk.id.to_string(),
            vector: chunk.embedding.clone(),
            payload: PointPayload {
                session_name: chunk.session_name.clone(),
                content: chunk.content.clone(),
                filename: chunk.source.filename.clone(),
                page_count: chunk.source.page_count,
                chunk_index: chunk.chunk_index,
            },
        }
    }

    fn point_to_chunk(id: Uuid, payload: PointPayload) -> Chunk {
        Chunk {
            id,
            session_name: payload.session_name,
            content: payload.content,
            embedding: Vec::new(),
            source: ChunkSource {
                filename: payload.filename,
                page_count: payload.page_count,
            },
            chunk_index: payload.chunk_index,
        }
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantStore {
    async fn ensure_collection(&self, collection: &str) -> Result<()> {
        // Existence probe first; PUT on an existing collection is an error.
        let response = self
            .request(self.client.get(self.collection_url(collection)))
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Collection lookup failed: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }

        let request = CreateCollectionRequest {
            vectors: VectorParams {
                size: self.dimensions,
                distance: "Cosine",
            },
        };

        let response = self
            .request(self.client.put(self.collection_url(collection)))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Collection create failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Collection create failed ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn insert_chunks(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let url = format!("{}/points?wait=true", self.collection_url(collection));
        let points: Vec<Point> = chunks.iter().map(Self::chunk_to_point).collect();

        // Batch upserts (max 100 points per request)
        for batch in points.chunks(100) {
            let request = UpsertPointsRequest { points: batch };

            let response = self
                .request(self.client.put(&url))
                .json(&request)
                .send()
                .await
                .map_err(|e| Error::vector_db(format!("Upsert failed: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::vector_db(format!(
                    "Upsert failed ({}): {}",
                    status, body
                )));
            }
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<VectorSearchResult>> {
        let url = format!("{}/points/search", self.collection_url(collection));

        let request = SearchRequest {
            vector: query_embedding,
            limit: top_k,
            with_payload: true,
        };

        let response = self
            .request(self.client.post(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Search failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Search failed ({}): {}",
                status, body
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse search response: {}", e)))?;

        let mut results = Vec::with_capacity(parsed.result.len());
        for point in parsed.result {
            let id = match point.id.as_str().and_then(|s| Uuid::parse_str(s).ok()) {
                Some(id) => id,
                None => {
                    tracing::warn!("Skipping point with non-uuid id: {}", point.id);
                    continue;
                }
            };
            let Some(payload) = point.payload else {
                tracing::warn!("Skipping point {} without payload", id);
                continue;
            };
            results.push(VectorSearchResult {
                chunk: Self::point_to_chunk(id, payload),
                similarity: point.score,
            });
        }

        Ok(results)
    }

    async fn drop_collection(&self, collection: &str) -> Result<()> {
        let response = self
            .request(self.client.delete(self.collection_url(collection)))
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Collection delete failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Collection delete failed ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/collections", self.config.url);
        match self.request(self.client.get(&url)).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}
