// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

use jsonwebtoken::DecodingKey;
use macro_tracker::config::Config;
use macro_tracker::db::FirestoreDb;
use macro_tracker::routes::create_router;
use macro_tracker::services::{IdentityVerifier, LlmService};
use macro_tracker::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test JWT the way the auth routes do.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    macro_tracker::middleware::auth::create_jwt(user_id, signing_key)
        .expect("Failed to create test JWT")
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_frontend_url("http://localhost:5173")
}

/// Create a test app with a specific frontend URL (for cookie attribute
/// tests).
#[allow(dead_code)]
pub fn create_test_app_with_frontend_url(frontend_url: &str) -> (axum::Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.frontend_url = frontend_url.to_string();

    let db = test_db_offline();
    let llm = LlmService::new(&config);

    // Static RSA key: tests never verify real provider tokens, they only
    // need a constructible verifier.
    let decoding_key = DecodingKey::from_rsa_components("AQAB", "AQAB")
        .expect("static RSA components should parse");
    let identity_verifier = Arc::new(
        IdentityVerifier::new_with_static_key(&config.identity_audience, "test-kid", decoding_key)
            .expect("Failed to build static verifier"),
    );

    let state = Arc::new(AppState {
        config,
        db,
        llm,
        identity_verifier,
    });

    (create_router(state.clone()), state)
}
