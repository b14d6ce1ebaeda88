//! Signed, expiring session tokens.
//!
//! Wire format: three dot-joined base64url segments — header, claims,
//! HMAC-SHA256 signature over the first two. The header is literally
//! `{"alg":"HS256","typ":"JWT"}`. Tokens are value types: verifying never
//! mutates them, and the clock is always caller-supplied.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use super::codec::{base64url_decode, base64url_encode, DecodeError};
use super::SESSION_TTL_SECONDS;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl TokenHeader {
    fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Claims carried by a session token: the issuer-owned expiry plus
/// whatever the caller supplied at issue time, round-tripped unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Absolute expiry, seconds since the Unix epoch.
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64(#[from] DecodeError),
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

/// Issue a signed session token expiring [`SESSION_TTL_SECONDS`] from
/// `now`.
///
/// Caller claims are carried verbatim, with one exception: `exp` belongs
/// to the issuer. A caller-supplied `exp` is dropped so callers cannot
/// extend their own lifetime.
///
/// # Errors
///
/// Returns an error if the header or claims cannot be encoded as JSON.
pub fn issue(secret: &[u8], extra: Map<String, Value>, now: i64) -> Result<String, Error> {
    let mut extra = extra;
    extra.remove("exp");
    let claims = SessionClaims {
        exp: now + SESSION_TTL_SECONDS,
        extra,
    };
    let header_b64 = base64url_encode(&serde_json::to_vec(&TokenHeader::hs256())?);
    let claims_b64 = base64url_encode(&serde_json::to_vec(&claims)?);
    let signing_input = format!("{header_b64}.{claims_b64}");
    let signature = sign(secret, signing_input.as_bytes());
    Ok(format!(
        "{signing_input}.{}",
        base64url_encode(&signature)
    ))
}

/// Verify a session token against `secret` at time `now`.
///
/// Every failure — malformed input, bad signature, expiry — collapses to
/// `None`; across the trust boundary, forgery and expiry are
/// indistinguishable. The rejection reason is only visible at debug log
/// level.
#[must_use]
pub fn verify(secret: &[u8], token: &str, now: i64) -> Option<SessionClaims> {
    match try_verify(secret, token, now) {
        Ok(claims) => Some(claims),
        Err(err) => {
            debug!("session token rejected: {err}");
            None
        }
    }
}

fn try_verify(secret: &[u8], token: &str, now: i64) -> Result<SessionClaims, Error> {
    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(Error::TokenFormat)?;
    let claims_b64 = parts.next().ok_or(Error::TokenFormat)?;
    let sig_b64 = parts.next().ok_or(Error::TokenFormat)?;
    if parts.next().is_some() {
        return Err(Error::TokenFormat);
    }

    // The signature authenticates header and claims together; the header's
    // contents are not consulted beyond that.
    let signature = base64url_decode(sig_b64)?;
    let signing_input = format!("{header_b64}.{claims_b64}");
    let mut mac = mac(secret);
    mac.update(signing_input.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| Error::InvalidSignature)?;

    let claims: SessionClaims = serde_json::from_slice(&base64url_decode(claims_b64)?)?;
    if claims.exp <= now {
        return Err(Error::Expired);
    }
    Ok(claims)
}

fn sign(secret: &[u8], bytes: &[u8]) -> Vec<u8> {
    let mut mac = mac(secret);
    mac.update(bytes);
    mac.finalize().into_bytes().to_vec()
}

fn mac(secret: &[u8]) -> HmacSha256 {
    // Hmac accepts keys of any length.
    HmacSha256::new_from_slice(secret).expect("hmac accepts any key length")
}
