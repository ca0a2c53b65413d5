//! Hypermedia HTTP server for the bfield event manager.
//!
//! This crate provides an Axum application serving a single `Event`
//! resource with:
//!
//! - **Server-rendered HTML** pages (list, single card, create/edit forms)
//!   with partial-page fragments for htmx-driven requests
//! - **JSON:API representation** of the same endpoints, selected by the
//!   request's `Accept` header
//! - **Conditional-caching validators** (`ETag` / `Last-Modified`) derived
//!   from each record's identity, last-write time, and the app version
//!
//! # Architecture
//!
//! Handlers receive an explicitly injected [`AppState`] carrying the
//! database handle and the template environment; there is no global
//! connection state. Content negotiation is an enumerated match over the
//! `Accept` header producing a tagged HTML or JSON response, and
//! htmx-originated requests (detected via the `HX-Request` header) get
//! fragments and header-based redirect instructions instead of full pages
//! and 3xx responses.
//!
//! [`AppState`]: state::AppState

pub mod caching;
pub mod config;
pub mod error;
pub mod handlers;
pub mod negotiate;
pub mod router;
pub mod server;
pub mod state;
pub mod views;

// Re-export primary types for convenience.
pub use config::AppConfig;
pub use error::AppError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;

/// Application version string folded into every cache fingerprint.
///
/// Bumping the crate version invalidates all previously issued validators,
/// so deploys never serve stale cached representations.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
