//! Shared type definitions for the bfield event manager.
//!
//! This crate is the single source of truth for the domain types used across
//! the bfield workspace: the `Event` record, its identifier, the draft
//! payload accepted by create/update, and the JSON:API document types the
//! HTTP layer serves.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for event identifiers
//! - [`event`] -- The `Event` record and the `EventDraft` write payload
//! - [`api`] -- JSON:API envelope types (`{data: {id, type, attributes}}`)

pub mod api;
pub mod event;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use api::{EventAttributes, EventDocument, EventResource};
pub use event::{Event, EventDraft};
pub use ids::EventId;
