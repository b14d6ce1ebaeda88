//! # iding-auth (Credential & Session Authentication)
//!
//! `iding-auth` authenticates the two kinds of principals of the iding
//! hosted email service — console users (admin/staff) and mailbox owners —
//! and establishes tamper-evident, time-bounded sessions.
//!
//! ## Sessions
//!
//! Sessions are stateless: an HMAC-SHA256 signed token in the JWT wire
//! shape carries the claims, and the `iding-session` cookie carries the
//! token. The issuer owns the expiry; the cookie's `Max-Age` and the
//! token's `exp` consult the same constant so they expire in lockstep.
//! The clock is always caller-supplied, never read inside the crypto
//! functions.
//!
//! ## Passwords
//!
//! - **Current records:** `pbkdf2$sha256$<iterations>$<salt>$<hash>`,
//!   self-describing so the iteration count can evolve without a
//!   migration step. Stored counts are clamped into a sane bound before
//!   derivation.
//! - **Legacy records:** bare hex SHA-256 digests, verified but never
//!   written.
//!
//! Format negotiation dispatches on the stored record's shape, never on
//! anything the caller declares.
//!
//! ## Trust boundary
//!
//! Credential judgments are a uniform non-match: malformed input, a bad
//! signature, a wrong password, and an expired token are indistinguishable
//! to callers. Only credential-store faults surface as errors.

pub mod auth;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
