//! Provider abstractions for embeddings, LLM, and vector storage
//!
//! Clients are constructed once at startup and injected into the server
//! state as trait objects, so tests can substitute fakes.

pub mod embedding;
pub mod gemini;
pub mod groq;
pub mod llm;
pub mod qdrant;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use gemini::GeminiEmbedder;
pub use groq::GroqLlm;
pub use llm::{ChatMessage, ChatRole, LlmProvider};
pub use qdrant::QdrantStore;
pub use vector_store::{VectorSearchResult, VectorStoreProvider};
