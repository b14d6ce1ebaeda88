//! Password hashing and verification with format negotiation.
//!
//! Two record formats coexist in the credential store:
//!
//! - current: `pbkdf2$sha256$<iterations>$<salt-b64>$<hash-b64>`
//! - legacy: a bare lowercase hex SHA-256 digest, from records created
//!   before the salted format existed
//!
//! The stored record's shape is authoritative; verification never trusts a
//! caller-declared version. New hashes are only ever written in the
//! current format.

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

use super::codec::{base64_decode, base64_encode};

/// Iteration count written into new records.
const PBKDF2_ITERATIONS: u32 = 150_000;
/// Bounds applied to iteration counts read back from stored records.
const PBKDF2_ITERATIONS_MIN: u32 = 50_000;
const PBKDF2_ITERATIONS_MAX: u32 = 500_000;
const PBKDF2_SALT_BYTES: usize = 16;
const PBKDF2_HASH_BYTES: usize = 32;
const PBKDF2_FORMAT_PREFIX: &str = "pbkdf2$sha256$";

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to generate salt")]
    Rng,
}

/// A stored password record, parsed once into its format variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordRecord {
    /// Current format with self-described derivation parameters.
    Pbkdf2 {
        iterations: u32,
        salt: Vec<u8>,
        hash: Vec<u8>,
    },
    /// Unsalted SHA-256 hex digest, retained for pre-existing records.
    LegacySha256 { digest_hex: String },
}

impl PasswordRecord {
    /// Parse a stored record into its format variant.
    ///
    /// A record that carries the current-format prefix and field count but
    /// unusable fields (non-numeric iterations, undecodable or empty salt
    /// or digest) returns `None` and can never match. Anything else is
    /// treated as a legacy digest, including prefixed records with the
    /// wrong field count, which historical data contains.
    #[must_use]
    pub fn parse(stored: &str) -> Option<Self> {
        let stored = stored.trim();
        if stored.starts_with(PBKDF2_FORMAT_PREFIX) {
            let parts: Vec<&str> = stored.split('$').collect();
            if parts.len() == 5 {
                let iterations = parts[2].parse::<u32>().ok()?;
                let salt = base64_decode(parts[3]).ok()?;
                let hash = base64_decode(parts[4]).ok()?;
                if salt.is_empty() || hash.is_empty() {
                    return None;
                }
                return Some(Self::Pbkdf2 {
                    iterations,
                    salt,
                    hash,
                });
            }
        }
        Some(Self::LegacySha256 {
            digest_hex: stored.to_lowercase(),
        })
    }
}

/// Hash a password into a current-format record.
///
/// Each call draws a fresh random salt, so two records for the same
/// password differ while both verify.
///
/// # Errors
///
/// Returns [`Error::Rng`] when the OS entropy source fails.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let mut salt = [0u8; PBKDF2_SALT_BYTES];
    OsRng.try_fill_bytes(&mut salt).map_err(|_| Error::Rng)?;
    let derived = derive(password, &salt, PBKDF2_ITERATIONS, PBKDF2_HASH_BYTES);
    Ok(format!(
        "{PBKDF2_FORMAT_PREFIX}{PBKDF2_ITERATIONS}${}${}",
        base64_encode(&salt),
        base64_encode(&derived)
    ))
}

/// Verify a password against a stored record.
///
/// Every rejection path returns the same `false`; callers cannot tell
/// which stage failed.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.trim().is_empty() {
        return false;
    }
    match PasswordRecord::parse(stored) {
        Some(PasswordRecord::Pbkdf2 {
            iterations,
            salt,
            hash,
        }) => {
            // Never trust a stored iteration count unbounded.
            let iterations = iterations.clamp(PBKDF2_ITERATIONS_MIN, PBKDF2_ITERATIONS_MAX);
            let derived = derive(password, &salt, iterations, hash.len());
            constant_time_eq(&derived, &hash)
        }
        Some(PasswordRecord::LegacySha256 { digest_hex }) => {
            let computed = sha256_hex(password);
            constant_time_eq(computed.as_bytes(), digest_hex.as_bytes())
        }
        None => false,
    }
}

fn derive(password: &str, salt: &[u8], iterations: u32, length: usize) -> Vec<u8> {
    let mut out = vec![0u8; length];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Equal-length constant-time comparison. Unequal lengths are an immediate
/// non-match and never reach the byte loop.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let record = hash_password("correct horse battery staple").expect("hashing");
        assert!(record.starts_with(PBKDF2_FORMAT_PREFIX));
        assert!(verify_password("correct horse battery staple", &record));
        assert!(!verify_password("wrong horse", &record));
    }

    #[test]
    fn salt_randomness_yields_distinct_records() {
        let first = hash_password("secret").expect("hashing");
        let second = hash_password("secret").expect("hashing");
        assert_ne!(first, second);
        assert!(verify_password("secret", &first));
        assert!(verify_password("secret", &second));
    }

    #[test]
    fn parse_classifies_record_shapes() {
        let record = hash_password("pw").expect("hashing");
        assert!(matches!(
            PasswordRecord::parse(&record),
            Some(PasswordRecord::Pbkdf2 { .. })
        ));

        let legacy = sha256_hex("pw");
        assert!(matches!(
            PasswordRecord::parse(&legacy),
            Some(PasswordRecord::LegacySha256 { .. })
        ));

        // Prefixed but wrong field count: historical data, legacy treatment.
        assert!(matches!(
            PasswordRecord::parse("pbkdf2$sha256$150000$c2FsdA=="),
            Some(PasswordRecord::LegacySha256 { .. })
        ));
    }

    #[test]
    fn parse_rejects_unusable_current_records() {
        assert_eq!(PasswordRecord::parse("pbkdf2$sha256$abc$c2FsdA==$aGFzaA=="), None);
        assert_eq!(PasswordRecord::parse("pbkdf2$sha256$150000$!!$aGFzaA=="), None);
        assert_eq!(PasswordRecord::parse("pbkdf2$sha256$150000$$aGFzaA=="), None);
        assert_eq!(PasswordRecord::parse("pbkdf2$sha256$150000$c2FsdA==$"), None);
    }

    #[test]
    fn unusable_current_records_never_match() {
        assert!(!verify_password("pw", "pbkdf2$sha256$abc$c2FsdA==$aGFzaA=="));
        assert!(!verify_password("pw", "pbkdf2$sha256$150000$$aGFzaA=="));
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "   "));
    }

    #[test]
    fn legacy_digest_matches_case_insensitively() {
        let digest = sha256_hex("hunter2");
        assert!(verify_password("hunter2", &digest));
        assert!(verify_password("hunter2", &digest.to_uppercase()));
        assert!(!verify_password("hunter3", &digest));
    }

    #[test]
    fn stored_iteration_count_is_clamped_before_use() {
        let salt = b"0123456789abcdef";
        // A record claiming 10 iterations only matches a digest derived with
        // the clamped minimum, not the raw value.
        let clamped = derive("pw", salt, PBKDF2_ITERATIONS_MIN, PBKDF2_HASH_BYTES);
        let record = format!(
            "{PBKDF2_FORMAT_PREFIX}10${}${}",
            base64_encode(salt),
            base64_encode(&clamped)
        );
        assert!(verify_password("pw", &record));

        let raw = derive("pw", salt, 10, PBKDF2_HASH_BYTES);
        let record = format!(
            "{PBKDF2_FORMAT_PREFIX}10${}${}",
            base64_encode(salt),
            base64_encode(&raw)
        );
        assert!(!verify_password("pw", &record));
    }

    #[test]
    fn constant_time_eq_requires_equal_lengths() {
        assert!(constant_time_eq(b"digest", b"digest"));
        assert!(constant_time_eq(b"", b""));
        assert!(!constant_time_eq(b"digest", b"digesu"));
        assert!(!constant_time_eq(b"short", b"longer digest"));
    }
}
