//! docchat server binary
//!
//! Run with: cargo run --bin docchat-server

use docchat::{config::ChatConfig, server::ChatServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docchat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ChatConfig::from_env();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Vector store: {}", config.vector_db.url);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);

    let server = ChatServer::new(config)?;

    tracing::info!("Listening on http://{}", server.address());
    tracing::info!("Endpoints:");
    tracing::info!("  POST   /upload_pdfs    - Create a session from PDFs");
    tracing::info!("  POST   /ask            - Ask a question in a session");
    tracing::info!("  GET    /sessions       - List sessions");
    tracing::info!("  DELETE /delete_session - Delete a session");

    server.start().await?;

    Ok(())
}
