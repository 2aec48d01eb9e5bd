// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! JWT authentication tests.
//!
//! These tests verify that JWT tokens created by the auth routes can be
//! decoded by the auth middleware, catching compatibility issues early.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use macro_tracker::middleware::auth::{create_jwt, Claims};

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

#[test]
fn test_jwt_roundtrip() {
    // This test verifies that a JWT created by the auth flow can be decoded
    // by the middleware. If either side changes the Claims structure or
    // algorithm, this test will fail.
    let user_id = "provider-subject-12345";

    let token = create_jwt(user_id, SIGNING_KEY).expect("Failed to create JWT");

    // Decode token (like middleware does)
    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, user_id);
    assert!(token_data.claims.exp > 0);
    assert!(token_data.claims.iat > 0);
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_rejected_with_wrong_key() {
    let token = create_jwt("user-1", SIGNING_KEY).unwrap();

    let wrong_key = DecodingKey::from_secret(b"a_completely_different_key_here!");
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&token, &wrong_key, &validation).is_err());
}

#[test]
fn test_jwt_expiration_is_future() {
    use std::time::{SystemTime, UNIX_EPOCH};

    let token = create_jwt("user-1", SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually

    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    // Token should expire at least 29 days in the future
    assert!(
        token_data.claims.exp > now + 86400 * 29,
        "Token expiration should be ~30 days in the future"
    );
}
