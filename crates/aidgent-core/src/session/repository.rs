//! Session index repository trait.
//!
//! Defines the interface for the device-local session index.

use super::meta::{SessionMeta, SessionMetaPatch};
use anyhow::Result;
use async_trait::async_trait;

/// An abstract repository for the device-local session index.
///
/// This trait decouples the turn and reconciliation logic from the
/// concrete storage mechanism (a JSON file in production, an in-memory
/// vector in tests). It is always injected explicitly - never reached
/// through an ambient singleton - so both consumers stay independently
/// testable.
///
/// # Implementation Notes
///
/// Implementations must guarantee at most one record per `id` for any
/// sequence of operations. Mutations follow a read-whole / mutate /
/// write-whole discipline; no finer-grained locking is required.
#[async_trait]
pub trait SessionIndexRepository: Send + Sync {
    /// Lists all records, sorted descending by `updated_at`.
    ///
    /// The stored order is not mutated by listing.
    async fn list(&self) -> Result<Vec<SessionMeta>>;

    /// Idempotent upsert by id.
    ///
    /// Any existing record with the same id is removed before the new
    /// record is inserted at the front of underlying storage.
    async fn add(&self, meta: SessionMeta) -> Result<()>;

    /// Deletes the record with that id if present; no-op otherwise.
    ///
    /// Removal is local-only and has no effect on server-held state.
    async fn remove(&self, id: &str) -> Result<()>;

    /// Sets `updated_at` to the current time if a record with `id`
    /// exists; silent no-op otherwise. Never creates a record.
    async fn touch(&self, id: &str) -> Result<()>;

    /// Merges the given patch into the existing record if present;
    /// silent no-op if absent.
    async fn update(&self, id: &str, patch: SessionMetaPatch) -> Result<()>;
}
