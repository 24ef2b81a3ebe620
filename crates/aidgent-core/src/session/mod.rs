//! Session domain types.

pub mod message;
pub mod meta;
pub mod repository;
pub mod soap;
pub mod transcript;

pub use message::{ChatMessage, MessageRole};
pub use meta::{SessionMeta, SessionMetaPatch, SessionStatus};
pub use repository::SessionIndexRepository;
pub use soap::SoapNote;
pub use transcript::Transcript;
