//! CRUD operations on the `events` table.
//!
//! The store owns identity and timestamps: ids are UUID v7 values minted at
//! insert, `created_at` is set once, and `updated_at` is rewritten on every
//! save. Timestamps are stored as fixed-width RFC 3339 text (microsecond
//! precision, `Z` suffix) so lexicographic ordering in SQL matches
//! chronological ordering.
//!
//! The presence validation on `name` runs here, before any SQL is issued;
//! a draft with a blank name never reaches the database.

use bfield_types::{Event, EventDraft, EventId};
use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use sqlx::SqlitePool;

use crate::error::DbError;

/// Operations on the `events` table.
#[derive(Debug)]
pub struct EventStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventStore<'a> {
    /// Create a new event store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new event from a draft.
    ///
    /// Assigns a fresh id and sets both timestamps to now.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Validation`] when the draft's name is missing or
    /// blank, or [`DbError::Sqlite`] if the insert fails.
    pub async fn create(&self, draft: &EventDraft) -> Result<Event, DbError> {
        let name = draft
            .validated_name()
            .map_err(|msg| DbError::Validation(msg.to_owned()))?
            .to_owned();

        let now = now_micros();
        let event = Event {
            id: EventId::new(),
            name,
            place: draft.place.clone(),
            thing: draft.thing.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r"INSERT INTO events (id, name, place, thing, created_at, updated_at)
              VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(event.id.to_string())
        .bind(&event.name)
        .bind(&event.place)
        .bind(&event.thing)
        .bind(timestamp_to_db(event.created_at))
        .bind(timestamp_to_db(event.updated_at))
        .execute(self.pool)
        .await?;

        tracing::debug!(id = %event.id, "Created event");
        Ok(event)
    }

    /// Fetch a single event by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] for an unknown id, or
    /// [`DbError::Sqlite`] if the query fails.
    pub async fn find(&self, id: EventId) -> Result<Event, DbError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"SELECT id, name, place, thing, created_at, updated_at
              FROM events
              WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("event {id}")))?;

        row.try_into()
    }

    /// List all events, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn list(&self) -> Result<Vec<Event>, DbError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r"SELECT id, name, place, thing, created_at, updated_at
              FROM events
              ORDER BY updated_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Event::try_from).collect()
    }

    /// Fetch the most recently updated event, if any.
    ///
    /// Stands in for the whole collection when computing cache validators.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn latest(&self) -> Result<Option<Event>, DbError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"SELECT id, name, place, thing, created_at, updated_at
              FROM events
              ORDER BY updated_at DESC
              LIMIT 1",
        )
        .fetch_optional(self.pool)
        .await?;

        row.map(Event::try_from).transpose()
    }

    /// Replace the fields of an existing event and advance `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Validation`] on a blank name,
    /// [`DbError::NotFound`] for an unknown id, or [`DbError::Sqlite`]
    /// if the write fails.
    pub async fn update(&self, id: EventId, draft: &EventDraft) -> Result<Event, DbError> {
        let name = draft
            .validated_name()
            .map_err(|msg| DbError::Validation(msg.to_owned()))?
            .to_owned();

        let updated_at = now_micros();

        let result = sqlx::query(
            r"UPDATE events
              SET name = $1, place = $2, thing = $3, updated_at = $4
              WHERE id = $5",
        )
        .bind(&name)
        .bind(&draft.place)
        .bind(&draft.thing)
        .bind(timestamp_to_db(updated_at))
        .bind(id.to_string())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("event {id}")));
        }

        tracing::debug!(id = %id, "Updated event");
        self.find(id).await
    }

    /// Count persisted events.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn count(&self) -> Result<i64, DbError> {
        let count: (i64,) = sqlx::query_as(r"SELECT COUNT(*) FROM events")
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }

    /// Remove every event. Exists for the test harness only.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the delete fails.
    pub async fn delete_all(&self) -> Result<(), DbError> {
        sqlx::query(r"DELETE FROM events").execute(self.pool).await?;
        tracing::debug!("Deleted all events");
        Ok(())
    }
}

/// A row from the `events` table.
///
/// Uses runtime (string) types rather than compile-time checked types to
/// avoid requiring a live database during builds; conversion into the
/// domain [`Event`] surfaces any corruption explicitly.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Event id as its canonical UUID string.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional place.
    pub place: Option<String>,
    /// Optional thing.
    pub thing: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-write timestamp.
    pub updated_at: String,
}

impl TryFrom<EventRow> for Event {
    type Error = DbError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let id: EventId = row
            .id
            .parse()
            .map_err(|e| DbError::Corrupt(format!("bad id {:?}: {e}", row.id)))?;

        Ok(Self {
            id,
            name: row.name,
            place: row.place,
            thing: row.thing,
            created_at: timestamp_from_db(&row.created_at)?,
            updated_at: timestamp_from_db(&row.updated_at)?,
        })
    }
}

/// Current time truncated to the microsecond precision the database
/// stores, so a created event compares equal to its re-read row.
fn now_micros() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

/// Render a timestamp in the fixed-width form stored in `SQLite`.
fn timestamp_to_db(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp back into UTC.
fn timestamp_from_db(raw: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::Corrupt(format!("bad timestamp {raw:?}: {e}")))
}
