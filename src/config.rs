//! Configuration for the chat backend

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Embedding API configuration
    pub embeddings: EmbeddingConfig,
    /// LLM API configuration
    pub llm: LlmConfig,
    /// Vector database configuration
    pub vector_db: VectorDbConfig,
    /// Session store configuration
    pub sessions: SessionStoreConfig,
    /// Upload handling configuration
    pub uploads: UploadConfig,
}

impl ChatConfig {
    /// Build configuration from defaults overlaid with environment variables.
    ///
    /// Recognized variables: `PORT`, `DOCCHAT_HOST`, `QDRANT_URL`,
    /// `GROQ_API_KEY`, `GROQ_MODEL`, `GOOGLE_API_KEY`, `DOCCHAT_SESSION_DB`,
    /// `DOCCHAT_UPLOAD_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = env::var("DOCCHAT_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }
        if let Ok(url) = env::var("QDRANT_URL") {
            config.vector_db.url = url;
        }
        if let Ok(key) = env::var("GROQ_API_KEY") {
            config.llm.api_key = key;
        }
        if let Ok(model) = env::var("GROQ_MODEL") {
            config.llm.model = model;
        }
        if let Ok(key) = env::var("GOOGLE_API_KEY") {
            config.embeddings.api_key = key;
        }
        if let Ok(path) = env::var("DOCCHAT_SESSION_DB") {
            config.sessions.db_path = PathBuf::from(path);
        }
        if let Ok(dir) = env::var("DOCCHAT_UPLOAD_DIR") {
            config.uploads.dir = PathBuf::from(dir);
        }

        config
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between chunks in characters
    pub chunk_overlap: usize,
    /// Minimum chunk size (skip smaller chunks)
    pub min_chunk_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 200,
            chunk_overlap: 50,
            min_chunk_size: 20,
        }
    }
}

/// Embedding API configuration (Google Generative Language API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// API base URL
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Embedding dimensions (768 for text-embedding-004)
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            model: "text-embedding-004".to_string(),
            dimensions: 768,
            timeout_secs: 30,
        }
    }
}

/// LLM API configuration (Groq chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API base URL
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Generation model name
    pub model: String,
    /// Temperature for generation (0.0 = deterministic)
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}

/// Vector database configuration (Qdrant REST)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Qdrant base URL
    pub url: String,
    /// Optional API key
    pub api_key: Option<String>,
    /// Number of chunks retrieved per question
    pub top_k: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6333".to_string(),
            api_key: None,
            top_k: 5,
            timeout_secs: 30,
        }
    }
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStoreConfig {
    /// Path to the sqlite database file
    pub db_path: PathBuf,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        let db_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docchat")
            .join("sessions.db");
        Self { db_path }
    }
}

/// Upload handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded files are saved to
    pub dir: PathBuf,
    /// Maximum number of files per upload
    pub max_files: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_files: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.chunking.chunk_size, 200);
        assert_eq!(config.chunking.chunk_overlap, 50);
        assert_eq!(config.vector_db.top_k, 5);
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.uploads.max_files, 3);
    }

    #[test]
    fn test_env_overlay() {
        // Env mutation is process-wide; keep the variable name test-unique.
        std::env::set_var("GROQ_MODEL", "llama-3.1-8b-instant");
        let config = ChatConfig::from_env();
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        std::env::remove_var("GROQ_MODEL");
    }
}
