//! Data layer for the bfield event manager (`SQLite` via [`sqlx`]).
//!
//! A single `events` table backs the whole system. The store exposes plain
//! find/create/update/list operations; there are no cross-resource
//! transactions and no application-level locking. Concurrent writes to the
//! same row are serialized by `SQLite` itself and resolve last-write-wins.
//!
//! # Modules
//!
//! - [`sqlite`] -- Connection pool configuration and schema bootstrap
//! - [`event_store`] -- CRUD operations on the `events` table
//! - [`error`] -- Shared error types

pub mod error;
pub mod event_store;
pub mod sqlite;

// Re-export primary types for convenience.
pub use error::DbError;
pub use event_store::{EventRow, EventStore};
pub use sqlite::{Database, SqliteConfig};
