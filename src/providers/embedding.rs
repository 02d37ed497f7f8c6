//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings
///
/// Implementation: `GeminiEmbedder` (Google Generative Language API,
/// text-embedding-004).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Embedding dimensions (768 for text-embedding-004)
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingEmbedder;

    #[async_trait]
    impl EmbeddingProvider for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32])
        }

        fn dimensions(&self) -> usize {
            1
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_default_batch_preserves_order() {
        let embedder = CountingEmbedder;
        let texts = vec!["a".to_string(), "bbb".to_string(), "cc".to_string()];

        let embeddings = tokio_test::block_on(embedder.embed_batch(&texts)).unwrap();
        assert_eq!(embeddings, vec![vec![1.0], vec![3.0], vec![2.0]]);
    }
}
