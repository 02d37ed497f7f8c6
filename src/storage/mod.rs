//! Persistent storage

mod sessions;

pub use sessions::SessionDb;
