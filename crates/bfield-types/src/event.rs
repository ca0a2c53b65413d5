//! The `Event` record and the write payload accepted by create/update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EventId;

/// A single event record as persisted by the store.
///
/// `name` is the only required field; `place` and `thing` are free-form
/// optional strings. Both timestamps are assigned by the store: `created_at`
/// once at insert, `updated_at` on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Display name. Non-empty at persist time (store-enforced).
    pub name: String,
    /// Where the event happens, if known.
    pub place: Option<String>,
    /// What the event is about, if known.
    pub thing: Option<String>,
    /// When the record was first persisted.
    pub created_at: DateTime<Utc>,
    /// When the record was last written. Drives the cache validators.
    pub updated_at: DateTime<Utc>,
}

/// Field values submitted to create or update an event.
///
/// Drafts arrive from HTML forms, JSON bodies, or query-string parameters;
/// the transport layer merges those sources before the draft reaches the
/// store. A draft carries no identity or timestamps -- the store owns both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Display name. Required; rejected when empty after trimming.
    pub name: Option<String>,
    /// Optional place.
    pub place: Option<String>,
    /// Optional thing.
    pub thing: Option<String>,
}

impl EventDraft {
    /// Build a draft from owned field values.
    pub const fn new(name: Option<String>, place: Option<String>, thing: Option<String>) -> Self {
        Self { name, place, thing }
    }

    /// Return the trimmed name when the draft is valid to persist.
    ///
    /// A missing or whitespace-only name rejects the whole save.
    ///
    /// # Errors
    ///
    /// Returns the human-readable validation message when `name` is
    /// missing or empty after trimming.
    pub fn validated_name(&self) -> Result<&str, &'static str> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err("name can't be blank"),
        }
    }
}
