//! Content negotiation and the hypermedia partial-update contract.
//!
//! Negotiation is an explicit enumerated match over the `Accept` header:
//! requests asking for JSON get the JSON:API representation, everything
//! else (including absent or unrecognized media types) falls through to
//! HTML.
//!
//! Requests originating from an htmx partial-update trigger carry the
//! `HX-Request` header. Those requests receive inner HTML fragments
//! instead of full pages, and state-changing operations answer them with
//! a `200` + `HX-Redirect` header instead of a 3xx so the client-side
//! engine can perform the navigation itself.

use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect, Response};

/// Request header set by htmx on every request it issues.
pub const HX_REQUEST: &str = "hx-request";

/// Response header instructing htmx to perform a full client-side redirect.
pub const HX_REDIRECT: &str = "hx-redirect";

/// The representation selected for a resource response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Server-rendered HTML (full page or fragment).
    Html,
    /// JSON:API envelope.
    Json,
}

impl Representation {
    /// Select a representation from the request's `Accept` header.
    ///
    /// Only an explicit ask for JSON (`application/json` or the JSON:API
    /// media type) selects [`Representation::Json`]; anything else falls
    /// through to HTML, including a missing or unparseable header.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let accept = headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if accept.contains("application/json") || accept.contains("application/vnd.api+json") {
            Self::Json
        } else {
            Self::Html
        }
    }
}

/// Whether the request was flagged as a hypermedia partial-update trigger.
pub fn is_partial(headers: &HeaderMap) -> bool {
    headers.contains_key(HX_REQUEST)
}

/// Redirect after a state-changing operation, htmx-aware.
///
/// Partial-update requests get `200` with an empty body and an
/// `HX-Redirect` header naming the target; plain navigations get a
/// standard `303 See Other`.
pub fn hx_redirect(partial: bool, path: &str) -> Response {
    if partial {
        ([(HX_REDIRECT, path.to_owned())], String::new()).into_response()
    } else {
        Redirect::to(path).into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::{HeaderValue, StatusCode};

    use super::*;

    fn headers_with_accept(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn json_accept_selects_json() {
        let headers = headers_with_accept("application/json");
        assert_eq!(Representation::from_headers(&headers), Representation::Json);

        let headers = headers_with_accept("application/vnd.api+json");
        assert_eq!(Representation::from_headers(&headers), Representation::Json);
    }

    #[test]
    fn html_and_unknown_accepts_fall_through_to_html() {
        let headers = headers_with_accept("text/html,application/xhtml+xml");
        assert_eq!(Representation::from_headers(&headers), Representation::Html);

        let headers = headers_with_accept("image/avif");
        assert_eq!(Representation::from_headers(&headers), Representation::Html);

        assert_eq!(
            Representation::from_headers(&HeaderMap::new()),
            Representation::Html
        );
    }

    #[test]
    fn partial_detection_reads_the_hx_header() {
        let mut headers = HeaderMap::new();
        assert!(!is_partial(&headers));
        headers.insert(HX_REQUEST, HeaderValue::from_static("true"));
        assert!(is_partial(&headers));
    }

    #[test]
    fn partial_redirect_is_a_header_instruction() {
        let response = hx_redirect(true, "/events");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(HX_REDIRECT).unwrap(), "/events");
    }

    #[test]
    fn full_redirect_is_a_standard_see_other() {
        let response = hx_redirect(false, "/events");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/events"
        );
    }
}
