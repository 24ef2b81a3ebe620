//! Orchestration layer for the Aidgent client.
//!
//! Coordinates the backend API and the local session index: turn
//! exchanges with their side-effect propagation, batch reconciliation of
//! session metadata, and the session list's create/list/remove flows.

pub mod reconcile;
pub mod service;
pub mod texts;
pub mod turn;

pub use reconcile::{ReconcileReport, SessionMetaReconciler};
pub use service::SessionIndexService;
pub use turn::{SendOutcome, TurnController};
