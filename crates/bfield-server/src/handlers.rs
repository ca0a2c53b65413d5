//! HTTP endpoint handlers for the event resource.
//!
//! All handlers work against the store handle carried by the shared
//! [`AppState`]; nothing here touches global state. Representation
//! selection, fragment rendering, and the htmx redirect contract live in
//! [`negotiate`](crate::negotiate); validators in
//! [`caching`](crate::caching).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Home page (`ETag` = app version) |
//! | `GET` | `/events` | List events, HTML or JSON |
//! | `GET` | `/events/new` | Creation form |
//! | `GET` | `/events/:id` | Single event, HTML or JSON |
//! | `GET` | `/events/:id/edit` | Edit form |
//! | `POST` | `/events` | Create |
//! | `PUT` | `/events/:id` | Update |
//! | `POST` | `/events/:id` | Update via `_method=put` override |

use std::sync::Arc;

use axum::RequestExt;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use bfield_types::{EventDocument, EventDraft, EventId};
use minijinja::context;

use crate::caching::CacheValidators;
use crate::error::AppError;
use crate::negotiate::{Representation, hx_redirect, is_partial};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Submitted payload
// ---------------------------------------------------------------------------

/// Field values submitted to a state-changing endpoint.
///
/// The same shape deserializes from an HTML form body, a JSON body, and
/// the query string. Sources are merged per field with the body taking
/// precedence, so the htmx demo button can post `/events?name=..&place=..`
/// with an empty body.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SubmittedEvent {
    /// Display name.
    pub name: Option<String>,
    /// Optional place.
    pub place: Option<String>,
    /// Optional thing.
    pub thing: Option<String>,
    /// Method-override field for transports that cannot issue PUT.
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

impl SubmittedEvent {
    /// Merge another payload in as a fallback for missing fields.
    fn merged_over(self, fallback: Self) -> Self {
        Self {
            name: self.name.or(fallback.name),
            place: self.place.or(fallback.place),
            thing: self.thing.or(fallback.thing),
            method: self.method.or(fallback.method),
        }
    }

    /// Convert into the store's write payload.
    fn into_draft(self) -> EventDraft {
        EventDraft::new(self.name, self.place, self.thing)
    }
}

/// Deserialize the request body into a [`SubmittedEvent`].
///
/// `application/json` bodies go through the JSON deserializer, form
/// bodies through the urlencoded one; any other (or absent) body yields
/// an empty payload so query-string-only submissions still work.
async fn submitted_body(request: Request) -> Result<SubmittedEvent, AppError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    if content_type.starts_with("application/json") {
        let Json(payload) = request
            .extract::<Json<SubmittedEvent>, _>()
            .await
            .map_err(|e| AppError::Validation(format!("malformed JSON body: {e}")))?;
        Ok(payload)
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(payload) = request
            .extract::<Form<SubmittedEvent>, _>()
            .await
            .map_err(|e| AppError::Validation(format!("malformed form body: {e}")))?;
        Ok(payload)
    } else {
        Ok(SubmittedEvent::default())
    }
}

// ---------------------------------------------------------------------------
// GET / -- home page
// ---------------------------------------------------------------------------

/// Serve the home page. The `ETag` is pinned to the app version since the
/// page content only changes on deploy.
#[allow(clippy::unused_async)] // Axum handlers must be async
pub async fn home(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let validators = CacheValidators::for_version();
    let html = state.views.page("home.html", context! {}, is_partial(&headers))?;
    Ok((validators.headers(), Html(html)).into_response())
}

// ---------------------------------------------------------------------------
// GET /events -- list
// ---------------------------------------------------------------------------

/// List all events, most recently updated first.
///
/// The most recently updated member stands in for the collection when
/// computing cache validators; an empty collection falls back to a
/// wall-clock fingerprint. JSON negotiation returns an array of
/// single-resource envelopes.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let store = state.store();

    let latest = store.latest().await?;
    let validators = CacheValidators::for_collection(latest.as_ref());

    let events = store.list().await?;

    match Representation::from_headers(&headers) {
        Representation::Json => Ok((
            validators.headers(),
            Json(EventDocument::collection(&events)),
        )
            .into_response()),
        Representation::Html => {
            let html = state.views.page(
                "events.html",
                context! { count => events.len(), events },
                is_partial(&headers),
            )?;
            Ok((validators.headers(), Html(html)).into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// GET /events/new -- creation form
// ---------------------------------------------------------------------------

/// Serve the event creation form.
#[allow(clippy::unused_async)] // Axum handlers must be async
pub async fn new_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let html = state.views.page("new.html", context! {}, is_partial(&headers))?;
    Ok(Html(html).into_response())
}

// ---------------------------------------------------------------------------
// GET /events/:id -- single event
// ---------------------------------------------------------------------------

/// Serve one event as an HTML card page or a JSON:API envelope, with
/// validators derived from the record.
pub async fn show_event(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    let event = state.store().find(id).await?;
    let validators = CacheValidators::for_event(&event);

    match Representation::from_headers(&headers) {
        Representation::Json => Ok((
            validators.headers(),
            Json(EventDocument::from_event(&event)),
        )
            .into_response()),
        Representation::Html => {
            let html = state
                .views
                .page("event.html", context! { event }, is_partial(&headers))?;
            Ok((validators.headers(), Html(html)).into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// GET /events/:id/edit -- edit form
// ---------------------------------------------------------------------------

/// Serve the prefilled edit form for one event.
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    let event = state.store().find(id).await?;
    let validators = CacheValidators::for_event(&event);

    let html = state
        .views
        .page("edit.html", context! { event }, is_partial(&headers))?;
    Ok((validators.headers(), Html(html)).into_response())
}

// ---------------------------------------------------------------------------
// POST /events -- create
// ---------------------------------------------------------------------------

/// Create an event from form, JSON, or query-string fields.
///
/// HTML-negotiated requests answer with the htmx-aware redirect to the
/// collection; JSON-negotiated requests receive the envelope of the
/// created record.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubmittedEvent>,
    headers: HeaderMap,
    request: Request,
) -> Result<Response, AppError> {
    let payload = submitted_body(request).await?.merged_over(query);
    let event = state.store().create(&payload.into_draft()).await?;

    match Representation::from_headers(&headers) {
        Representation::Json => Ok(Json(EventDocument::from_event(&event)).into_response()),
        Representation::Html => Ok(hx_redirect(is_partial(&headers), "/events")),
    }
}

// ---------------------------------------------------------------------------
// PUT /events/:id -- update (plus POST method override)
// ---------------------------------------------------------------------------

/// Update an event's fields by direct replacement.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Query(query): Query<SubmittedEvent>,
    headers: HeaderMap,
    request: Request,
) -> Result<Response, AppError> {
    let payload = submitted_body(request).await?.merged_over(query);
    perform_update(&state, &id_str, payload, &headers).await
}

/// Accept a `POST` with a `_method=put` field as an update, for
/// transports (HTML forms) that cannot issue PUT directly. A plain POST
/// to the member path names no operation and is a lookup failure.
pub async fn update_via_post(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Query(query): Query<SubmittedEvent>,
    headers: HeaderMap,
    request: Request,
) -> Result<Response, AppError> {
    let payload = submitted_body(request).await?.merged_over(query);

    let overridden = payload
        .method
        .as_deref()
        .is_some_and(|m| m.eq_ignore_ascii_case("put"));
    if !overridden {
        return Err(AppError::NotFound(String::from("no such operation")));
    }

    perform_update(&state, &id_str, payload, &headers).await
}

/// Shared update path: write through the store, then answer per the
/// partial-update contract (HTML) or with the envelope (JSON).
async fn perform_update(
    state: &AppState,
    id_str: &str,
    payload: SubmittedEvent,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let id = parse_id(id_str)?;
    let event = state.store().update(id, &payload.into_draft()).await?;

    match Representation::from_headers(headers) {
        Representation::Json => Ok(Json(EventDocument::from_event(&event)).into_response()),
        Representation::Html => Ok(hx_redirect(is_partial(headers), "/events")),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an event id from the request path.
///
/// A path segment that is not a well-formed id cannot name any record, so
/// it surfaces as the same generic lookup failure as an unknown id.
fn parse_id(s: &str) -> Result<EventId, AppError> {
    s.parse::<EventId>().map_err(|e| {
        tracing::debug!(error = %e, id = s, "unparseable event id");
        AppError::NotFound(format!("event {s}"))
    })
}
