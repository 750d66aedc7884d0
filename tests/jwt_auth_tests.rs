// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session token tests.
//!
//! These tests verify that tokens minted on login can be verified by
//! the session gate, and that expiry and signature failures are
//! reported as errors rather than panics.

use quizz_api::middleware::auth::{create_jwt, verify_jwt, Claims, TOKEN_TTL_SECS};
use std::time::{SystemTime, UNIX_EPOCH};

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

fn now_secs() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

#[test]
fn test_jwt_roundtrip() {
    // A token created by the auth flow must decode through the same
    // claims structure the gate uses.
    let token = create_jwt("g-12345", "user@example.com", SIGNING_KEY).unwrap();

    let claims = verify_jwt(&token, SIGNING_KEY).expect("fresh token should verify");

    assert_eq!(claims.sub, "g-12345");
    assert_eq!(claims.email, "user@example.com");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_jwt_expiry_is_24_hours() {
    let token = create_jwt("g-12345", "user@example.com", SIGNING_KEY).unwrap();
    let claims = verify_jwt(&token, SIGNING_KEY).unwrap();

    assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);

    // And the expiry is in the future relative to now
    assert!(claims.exp > now_secs());
}

#[test]
fn test_expired_token_fails_verification() {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    // Correctly signed, but expired two hours ago (well past any leeway)
    let now = now_secs();
    let claims = Claims {
        sub: "g-12345".to_string(),
        email: "user@example.com".to_string(),
        iat: now - 7200 - TOKEN_TTL_SECS,
        exp: now - 7200,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert!(verify_jwt(&token, SIGNING_KEY).is_err());
}

#[test]
fn test_wrongly_signed_token_fails_verification() {
    let token = create_jwt("g-12345", "user@example.com", b"some_other_key").unwrap();
    assert!(verify_jwt(&token, SIGNING_KEY).is_err());
}

#[test]
fn test_malformed_token_fails_without_panicking() {
    assert!(verify_jwt("", SIGNING_KEY).is_err());
    assert!(verify_jwt("not.a.jwt", SIGNING_KEY).is_err());
    assert!(verify_jwt("garbage", SIGNING_KEY).is_err());
}
