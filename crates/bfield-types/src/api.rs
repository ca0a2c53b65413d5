//! JSON:API document types for the HTTP representation of events.
//!
//! A single event serializes to the envelope
//! `{"data": {"id": "...", "type": "event", "attributes": {...}}}` and a
//! collection serializes as a JSON array of such envelopes, each member
//! wrapped independently.
//!
//! The attribute set is exactly `name`, `place`, `created_at`. Neither
//! `thing` nor `updated_at` is exposed through the JSON representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// The JSON:API resource type string for events.
pub const RESOURCE_TYPE: &str = "event";

/// Top-level JSON:API envelope for a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDocument {
    /// The primary data of the document.
    pub data: EventResource,
}

/// The resource object inside an [`EventDocument`].
///
/// Carries exactly the keys `id`, `type`, and `attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResource {
    /// Resource identifier, the event id rendered as a string.
    pub id: String,
    /// Resource type, always [`RESOURCE_TYPE`].
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The serialized attribute set.
    pub attributes: EventAttributes,
}

/// The attributes exposed through the JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttributes {
    /// Display name.
    pub name: String,
    /// Optional place.
    pub place: Option<String>,
    /// When the record was first persisted.
    pub created_at: DateTime<Utc>,
}

impl EventDocument {
    /// Wrap an event in its JSON:API envelope.
    pub fn from_event(event: &Event) -> Self {
        Self {
            data: EventResource {
                id: event.id.to_string(),
                resource_type: RESOURCE_TYPE.to_owned(),
                attributes: EventAttributes {
                    name: event.name.clone(),
                    place: event.place.clone(),
                    created_at: event.created_at,
                },
            },
        }
    }

    /// Serialize a collection as an array of single-resource envelopes.
    pub fn collection(events: &[Event]) -> Vec<Self> {
        events.iter().map(Self::from_event).collect()
    }
}

impl From<&Event> for EventDocument {
    fn from(event: &Event) -> Self {
        Self::from_event(event)
    }
}
