//! Application state for the chat server

use std::sync::Arc;

use crate::config::ChatConfig;
use crate::error::Result;
use crate::providers::{
    EmbeddingProvider, GeminiEmbedder, GroqLlm, LlmProvider, QdrantStore, VectorStoreProvider,
};
use crate::storage::SessionDb;

/// Shared application state.
///
/// External clients are constructed once at startup and reused across all
/// requests; handlers receive them through this state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ChatConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    llm_provider: Arc<dyn LlmProvider>,
    vector_store: Arc<dyn VectorStoreProvider>,
    sessions: Arc<SessionDb>,
}

impl AppState {
    /// Create application state with the real provider clients
    pub fn new(config: ChatConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let embedding_provider = Arc::new(GeminiEmbedder::new(&config.embeddings)?);
        tracing::info!(
            "Embedding client initialized (model: {})",
            config.embeddings.model
        );

        let llm_provider = Arc::new(GroqLlm::new(&config.llm)?);
        tracing::info!("LLM client initialized (model: {})", config.llm.model);

        let vector_store = Arc::new(QdrantStore::new(
            &config.vector_db,
            config.embeddings.dimensions,
        )?);
        tracing::info!("Vector store client initialized ({})", config.vector_db.url);

        let sessions = Arc::new(SessionDb::new(&config.sessions.db_path)?);
        tracing::info!(
            "Session store opened at {}",
            config.sessions.db_path.display()
        );

        std::fs::create_dir_all(&config.uploads.dir)?;

        Ok(Self::with_providers(
            config,
            embedding_provider,
            llm_provider,
            vector_store,
            sessions,
        ))
    }

    /// Create application state from pre-built providers (fakes in tests)
    pub fn with_providers(
        config: ChatConfig,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        llm_provider: Arc<dyn LlmProvider>,
        vector_store: Arc<dyn VectorStoreProvider>,
        sessions: Arc<SessionDb>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                embedding_provider,
                llm_provider,
                vector_store,
                sessions,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &ChatConfig {
        &self.inner.config
    }

    /// Get embedding provider
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedding_provider
    }

    /// Get LLM provider
    pub fn llm_provider(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm_provider
    }

    /// Get vector store provider
    pub fn vector_store(&self) -> &Arc<dyn VectorStoreProvider> {
        &self.inner.vector_store
    }

    /// Get session store
    pub fn sessions(&self) -> &Arc<SessionDb> {
        &self.inner.sessions
    }
}
