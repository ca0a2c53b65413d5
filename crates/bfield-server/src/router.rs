//! Axum router construction for the event application.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the application.
///
/// The router includes:
/// - `GET /` -- home page
/// - `GET /events` / `POST /events` -- collection listing and create
/// - `GET /events/new` -- creation form
/// - `GET /events/{id}` / `PUT /events/{id}` -- single event read and update
/// - `POST /events/{id}` -- update via the `_method=put` override
/// - `GET /events/{id}/edit` -- edit form
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/events",
            get(handlers::list_events).post(handlers::create_event),
        )
        .route("/events/new", get(handlers::new_form))
        .route(
            "/events/{id}",
            get(handlers::show_event)
                .put(handlers::update_event)
                .post(handlers::update_via_post),
        )
        .route("/events/{id}/edit", get(handlers::edit_form))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
