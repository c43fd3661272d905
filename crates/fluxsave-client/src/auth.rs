//! Request signing via static credential headers
//!
//! The API authenticates every request with two headers, one per credential.
//! No per-request signature is computed.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::Secret;
use crate::{ClientError, Result};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the API secret
pub const API_SECRET_HEADER: &str = "x-api-secret";

/// Build the header set for an outgoing request.
///
/// Returns a new map extending `existing` with both credential headers; the
/// caller's map is never mutated. Deterministic, no network access.
pub fn signed_headers(
    api_key: &Secret,
    api_secret: &Secret,
    existing: &HeaderMap,
) -> Result<HeaderMap> {
    let mut headers = existing.clone();
    headers.insert(
        HeaderName::from_static(API_KEY_HEADER),
        credential_value(api_key)?,
    );
    headers.insert(
        HeaderName::from_static(API_SECRET_HEADER),
        credential_value(api_secret)?,
    );
    Ok(headers)
}

fn credential_value(secret: &Secret) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(secret.expose()).map_err(|_| {
        // Deliberately omits the credential text
        ClientError::Config("credential contains characters not valid in a header".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}
