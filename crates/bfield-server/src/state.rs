//! Shared application state for the HTTP server.
//!
//! [`AppState`] carries the database handle and the template environment.
//! It is wrapped in [`Arc`](std::sync::Arc) and injected into every
//! handler via Axum's `State` extractor -- there is no process-global
//! connection state anywhere in the application.

use bfield_db::{Database, EventStore};

use crate::error::AppError;
use crate::views::Views;

/// Shared state for the Axum application.
#[derive(Debug)]
pub struct AppState {
    /// Connection pool handle to the event database.
    pub db: Database,
    /// Compiled HTML templates.
    pub views: Views,
}

impl AppState {
    /// Build the application state around an open database handle.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Template`] if the embedded templates fail to
    /// parse.
    pub fn new(db: Database) -> Result<Self, AppError> {
        Ok(Self {
            db,
            views: Views::new()?,
        })
    }

    /// An event store bound to this state's connection pool.
    pub const fn store(&self) -> EventStore<'_> {
        EventStore::new(self.db.pool())
    }
}
