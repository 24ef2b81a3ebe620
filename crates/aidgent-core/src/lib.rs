//! Domain layer for the Aidgent triage chat client.
//!
//! Contains the canonical data model (session index records, chat
//! messages, transcripts, SOAP notes), the one-way status latches, and
//! the repository trait the rest of the workspace is built against.

pub mod error;
pub mod intent;
pub mod redflag;
pub mod session;
pub mod time;

// Re-export common error type
pub use error::{AidgentError, Result};
pub use intent::Intent;
pub use redflag::RedFlagLatch;
