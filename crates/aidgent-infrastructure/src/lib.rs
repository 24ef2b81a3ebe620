//! Persistence layer for the Aidgent client.

pub mod json_session_index_repository;
pub mod memory_session_index_repository;
pub mod paths;

pub use crate::json_session_index_repository::JsonSessionIndexRepository;
pub use crate::memory_session_index_repository::MemorySessionIndexRepository;
pub use crate::paths::AidgentPaths;
