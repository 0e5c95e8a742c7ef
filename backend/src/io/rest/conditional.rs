//! Conditional request headers.
//!
//! `Last-Modified`, `If-Modified-Since` and `If-Unmodified-Since` carry local
//! date-times in the same format as every other timestamp of the API (see
//! [`shared::TIMESTAMP_FORMAT`]) rather than RFC 7231 HTTP dates. Clients are
//! expected to echo back the exact value they received.

use axum::http::{header, HeaderMap, HeaderName};
use chrono::NaiveDateTime;

use crate::domain::{DomainError, DomainResult};

/// Read an optional timestamp header; a present but unparsable value is a
/// client error
pub fn timestamp_header(
    headers: &HeaderMap,
    name: &HeaderName,
) -> DomainResult<Option<NaiveDateTime>> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    let text = value
        .to_str()
        .map_err(|_| DomainError::Validation(format!("Invalid {} header", name)))?;

    shared::parse_timestamp(text)
        .map(Some)
        .map_err(|e| {
            DomainError::Validation(format!("Invalid {} header '{}': {}", name, text, e))
        })
}

pub fn if_modified_since(headers: &HeaderMap) -> DomainResult<Option<NaiveDateTime>> {
    timestamp_header(headers, &header::IF_MODIFIED_SINCE)
}

pub fn if_unmodified_since(headers: &HeaderMap) -> DomainResult<Option<NaiveDateTime>> {
    timestamp_header(headers, &header::IF_UNMODIFIED_SINCE)
}

/// Response header part carrying `Last-Modified`
pub fn last_modified(timestamp: &NaiveDateTime) -> [(HeaderName, String); 1] {
    [(header::LAST_MODIFIED, shared::format_timestamp(timestamp))]
}
