//! Core types for the chat backend

pub mod document;
pub mod query;
pub mod response;
pub mod session;

pub use document::{Chunk, ChunkSource};
pub use query::{AskRequest, DeleteSessionParams};
pub use response::{AskResponse, MessageResponse, SessionListResponse};
pub use session::{validate_session_name, History, Role, Turn, HISTORY_CAP};
