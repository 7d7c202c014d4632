//! Device fingerprint extraction.
//!
//! The fingerprint is generated and persisted by the client (once per browser
//! storage context) and presented on every request in the `X-Device-Id`
//! header. The server never allocates fingerprints and enforces no uniqueness
//! beyond last-write-wins on the device-session row.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Header carrying the client's device fingerprint.
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// The device fingerprint presented by the caller, if any.
///
/// Never rejects: a missing or blank header becomes `None`, which the gate
/// treats as "fingerprint unavailable" (fatal to evaluation, forced logout).
#[derive(Debug, Clone)]
pub struct DeviceFingerprint(pub Option<String>);

impl<S> FromRequestParts<S> for DeviceFingerprint
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(DeviceFingerprint(fingerprint_from_parts(parts)))
    }
}

/// Read and normalize the fingerprint header. Blank values count as absent.
pub fn fingerprint_from_parts(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(DEVICE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
