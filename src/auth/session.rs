//! Session lifecycle over the raw `Cookie` header.
//!
//! Requests re-derive their session on every call: pull the
//! `iding-session` pair out of the header, then verify the token it
//! carries. Nothing is stored server-side.

use serde_json::{Map, Value};

use super::token::{self, SessionClaims};
use super::SESSION_COOKIE_NAME;

/// Issue a session token for the given claims.
///
/// # Errors
///
/// Returns an error if the claims cannot be encoded as JSON.
pub fn issue_session(
    secret: &[u8],
    claims: Map<String, Value>,
    now: i64,
) -> Result<String, token::Error> {
    token::issue(secret, claims, now)
}

/// Find the session cookie in a raw `Cookie` header.
#[must_use]
pub fn extract_session_token(cookie_header: &str) -> Option<String> {
    for pair in cookie_header.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME {
            return Some(value.trim().to_string());
        }
    }
    None
}

/// Verify the session carried by a request's `Cookie` header.
///
/// An absent header, an absent cookie, and an invalid token all yield
/// `None`.
#[must_use]
pub fn verify_session(
    secret: &[u8],
    cookie_header: Option<&str>,
    now: i64,
) -> Option<SessionClaims> {
    let token = extract_session_token(cookie_header?)?;
    token::verify(secret, &token, now)
}
