//! Password record properties: round-trips, format negotiation, the
//! legacy fallback, and iteration clamping against reference digests.

use base64ct::{Base64, Encoding};
use iding_auth::auth::password::{hash_password, verify_password, PasswordRecord};
use sha2::{Digest, Sha256};

const CLAMP_MIN: u32 = 50_000;
const CLAMP_MAX: u32 = 500_000;

fn pbkdf2_reference(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

fn record(iterations: u32, salt: &[u8], digest: &[u8]) -> String {
    format!(
        "pbkdf2$sha256${iterations}${}${}",
        Base64::encode_string(salt),
        Base64::encode_string(digest)
    )
}

#[test]
fn hash_round_trips_and_salts_randomly() {
    let first = hash_password("tr0ub4dor&3").expect("hashing");
    let second = hash_password("tr0ub4dor&3").expect("hashing");

    assert_ne!(first, second);
    assert!(verify_password("tr0ub4dor&3", &first));
    assert!(verify_password("tr0ub4dor&3", &second));
    assert!(!verify_password("troubador", &first));
}

#[test]
fn emitted_records_are_self_describing() {
    let stored = hash_password("pw").expect("hashing");
    match PasswordRecord::parse(&stored) {
        Some(PasswordRecord::Pbkdf2 {
            iterations,
            salt,
            hash,
        }) => {
            assert_eq!(iterations, 150_000);
            assert_eq!(salt.len(), 16);
            assert_eq!(hash.len(), 32);
        }
        other => panic!("unexpected record shape: {other:?}"),
    }
}

#[test]
fn low_iteration_count_is_clamped_up() {
    let salt = b"fixed-salt-bytes";
    let clamped_digest = pbkdf2_reference("pw", salt, CLAMP_MIN);
    assert!(verify_password("pw", &record(10, salt, &clamped_digest)));

    // A digest derived with the raw, unclamped count must not match.
    let raw_digest = pbkdf2_reference("pw", salt, 10);
    assert!(!verify_password("pw", &record(10, salt, &raw_digest)));
}

#[test]
fn high_iteration_count_is_clamped_down() {
    let salt = b"fixed-salt-bytes";
    let clamped_digest = pbkdf2_reference("pw", salt, CLAMP_MAX);
    assert!(verify_password("pw", &record(10_000_000, salt, &clamped_digest)));
}

#[test]
fn in_range_iteration_count_is_used_as_stored() {
    let salt = b"fixed-salt-bytes";
    let digest = pbkdf2_reference("pw", salt, CLAMP_MIN + 1_000);
    assert!(verify_password("pw", &record(CLAMP_MIN + 1_000, salt, &digest)));
    assert!(!verify_password("pw", &record(CLAMP_MIN + 1_001, salt, &digest)));
}

#[test]
fn legacy_digests_still_verify() {
    let digest = hex::encode(Sha256::digest("hunter2"));
    assert!(verify_password("hunter2", &digest));
    assert!(verify_password("hunter2", &digest.to_uppercase()));
    assert!(!verify_password("hunter3", &digest));
}

#[test]
fn malformed_records_never_match() {
    assert!(!verify_password("pw", ""));
    assert!(!verify_password("pw", "pbkdf2$sha256$not-a-number$c2FsdA==$aGFzaA=="));
    assert!(!verify_password("pw", "pbkdf2$sha256$150000$%%%$aGFzaA=="));
    assert!(!verify_password("pw", "pbkdf2$sha256$150000$$aGFzaA=="));
    // Wrong field count falls back to the legacy comparison and misses.
    assert!(!verify_password("pw", "pbkdf2$sha256$150000$c2FsdA=="));
}
