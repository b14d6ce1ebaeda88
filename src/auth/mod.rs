//! Credential and session authentication.
//!
//! Flow Overview: a login request supplies an identifier and a secret.
//! The verifier looks up the stored credential record, delegates to the
//! password module, and on success the token module mints a session token
//! which the cookie module wraps for transport. On subsequent requests the
//! session module pulls the token back out of the `Cookie` header and the
//! token module checks signature and expiry.

pub mod codec;
pub mod cookie;
pub mod password;
pub mod principal;
pub mod session;
pub mod token;
pub mod verifier;

/// Name of the session cookie on the wire.
pub const SESSION_COOKIE_NAME: &str = "iding-session";

/// Session lifetime in seconds. Both the token's `exp` and the cookie's
/// `Max-Age` consult this constant; the cookie and the token it carries
/// must expire in lockstep.
pub const SESSION_TTL_SECONDS: i64 = 86_400;
