//! Conditional-caching validators for resource responses.
//!
//! Every cacheable response carries an `ETag` and, when a record backs it,
//! a `Last-Modified` header. The `ETag` token is a content fingerprint:
//! `sha256(id ++ updated_at ++ app_version)` hex-encoded. The fingerprint
//! is recomputed on every read and never persisted.
//!
//! Handlers always return a full body even when the incoming request's
//! validators match -- the validators exist so intermediary caches can
//! revalidate, not for in-process 304 short-circuiting.

use axum::http::{HeaderMap, HeaderValue, header};
use bfield_types::{Event, EventId};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::APP_VERSION;

/// Compute the content fingerprint for a resource.
///
/// Hashes the id, the last-write timestamp (RFC 3339), and
/// [`APP_VERSION`], so the token changes when the record changes and when
/// the application is redeployed under a new version.
pub fn fingerprint(id: EventId, updated_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.to_string().as_bytes());
    hasher.update(updated_at.to_rfc3339().as_bytes());
    hasher.update(APP_VERSION.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// The validator pair attached to a cacheable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheValidators {
    /// Unquoted `ETag` token.
    pub etag: String,
    /// `Last-Modified` value, when a record backs the response.
    pub last_modified: Option<DateTime<Utc>>,
}

impl CacheValidators {
    /// Validators for a single event: fingerprint `ETag` plus the record's
    /// `updated_at` as `Last-Modified`.
    pub fn for_event(event: &Event) -> Self {
        Self {
            etag: fingerprint(event.id, event.updated_at),
            last_modified: Some(event.updated_at),
        }
    }

    /// Validators for the collection listing.
    ///
    /// The single most-recently-updated member stands in for the whole
    /// collection. An empty collection falls back to fingerprinting the
    /// current wall-clock time, so the token differs on every request and
    /// an empty listing is effectively uncacheable. No `Last-Modified` is
    /// emitted in that case.
    pub fn for_collection(latest: Option<&Event>) -> Self {
        latest.map_or_else(
            || {
                let now = Utc::now();
                let mut hasher = Sha256::new();
                hasher.update(now.to_rfc3339().as_bytes());
                hasher.update(APP_VERSION.as_bytes());
                Self {
                    etag: format!("{:x}", hasher.finalize()),
                    last_modified: None,
                }
            },
            Self::for_event,
        )
    }

    /// Validators for version-pinned pages (the home page): the bare app
    /// version is the `ETag` and no `Last-Modified` is emitted.
    pub fn for_version() -> Self {
        Self {
            etag: APP_VERSION.to_owned(),
            last_modified: None,
        }
    }

    /// Render the validators as response headers.
    ///
    /// The `ETag` token is quoted per RFC 9110; `Last-Modified` uses the
    /// fixed-length httpdate form.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(value) = HeaderValue::from_str(&format!("\"{}\"", self.etag)) {
            headers.insert(header::ETAG, value);
        }

        if let Some(ts) = self.last_modified
            && let Ok(value) = HeaderValue::from_str(&httpdate(ts))
        {
            headers.insert(header::LAST_MODIFIED, value);
        }

        headers
    }
}

/// Format a timestamp in the RFC 9110 `IMF-fixdate` form.
fn httpdate(ts: DateTime<Utc>) -> String {
    ts.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::TimeZone;

    use super::*;

    fn sample_event() -> Event {
        Event {
            id: EventId::new(),
            name: String::from("jason"),
            place: None,
            thing: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let event = sample_event();
        assert_eq!(
            fingerprint(event.id, event.updated_at),
            fingerprint(event.id, event.updated_at)
        );
    }

    #[test]
    fn fingerprint_changes_with_identity_and_time() {
        let event = sample_event();
        let other_id = EventId::new();
        assert_ne!(
            fingerprint(event.id, event.updated_at),
            fingerprint(other_id, event.updated_at)
        );

        let later = event.updated_at + chrono::Duration::seconds(1);
        assert_ne!(
            fingerprint(event.id, event.updated_at),
            fingerprint(event.id, later)
        );
    }

    #[test]
    fn event_validators_carry_last_modified() {
        let event = sample_event();
        let validators = CacheValidators::for_event(&event);
        assert_eq!(validators.last_modified, Some(event.updated_at));
        assert_eq!(validators.etag.len(), 64); // hex-encoded sha256
    }

    #[test]
    fn collection_validators_use_latest_member() {
        let event = sample_event();
        let validators = CacheValidators::for_collection(Some(&event));
        assert_eq!(validators, CacheValidators::for_event(&event));
    }

    #[test]
    fn empty_collection_validators_have_no_last_modified() {
        let validators = CacheValidators::for_collection(None);
        assert!(validators.last_modified.is_none());
        assert_eq!(validators.etag.len(), 64);
    }

    #[test]
    fn version_validators_expose_the_app_version() {
        let validators = CacheValidators::for_version();
        assert_eq!(validators.etag, APP_VERSION);
        assert!(validators.last_modified.is_none());
    }

    #[test]
    fn headers_quote_the_etag_and_format_httpdate() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let validators = CacheValidators {
            etag: String::from("abc123"),
            last_modified: Some(ts),
        };
        let headers = validators.headers();
        assert_eq!(headers.get(header::ETAG).unwrap(), "\"abc123\"");
        assert_eq!(
            headers.get(header::LAST_MODIFIED).unwrap(),
            "Fri, 02 Jan 2026 03:04:05 GMT"
        );
    }
}
