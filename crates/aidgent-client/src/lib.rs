//! HTTP boundary for the Aidgent triage backend.
//!
//! Decodes the backend's heterogeneous payloads into the canonical domain
//! shapes and derives the compact status summary used by the session list.

pub mod api;
pub mod config;
pub mod http;
pub mod normalize;
pub mod wire;

pub use api::TriageApi;
pub use config::ClientConfig;
pub use http::HttpTriageClient;
pub use normalize::ServerSessionStatus;
