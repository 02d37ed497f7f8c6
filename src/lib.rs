//! docchat: document chat backend with per-session retrieval
//!
//! Users upload a handful of PDFs into a named session; the documents are
//! chunked, embedded, and indexed into a per-session vector collection.
//! Questions against a session are answered by retrieving the closest
//! chunks and handing them to an LLM together with the recent
//! conversation history.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

pub use config::ChatConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, ChunkSource},
    query::AskRequest,
    response::{AskResponse, MessageResponse},
    session::History,
};
