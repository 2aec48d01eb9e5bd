// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Session establishment routes.
//!
//! Sign-in itself happens against the managed identity provider in the
//! browser; these routes exchange a verified ID token for our own session
//! JWT, delivered both as an HttpOnly cookie and in the response body.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::User;
use crate::services::IdentityError;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

const SESSION_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", post(create_session))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize)]
pub struct SessionRequest {
    /// ID token issued by the identity provider
    id_token: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub token: String,
    pub user_id: String,
    pub name: String,
}

/// Exchange a verified identity-provider ID token for a session JWT.
///
/// Upserts the account record so first sign-in doubles as registration.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<SessionRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let identity = state
        .identity_verifier
        .verify_id_token(&payload.id_token)
        .await
        .map_err(|e| match e {
            IdentityError::Rejected(msg) => {
                tracing::warn!(error = %msg, "Rejected ID token");
                AppError::InvalidToken
            }
            IdentityError::Unavailable(msg) => {
                AppError::Internal(anyhow::anyhow!("identity verification failed: {}", msg))
            }
        })?;

    let now = format_utc_rfc3339(chrono::Utc::now());
    let existing = state.db.get_user(&identity.subject).await?;
    let user = match existing {
        Some(mut user) => {
            user.last_active = now;
            user
        }
        None => User {
            user_id: identity.subject.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            created_at: now.clone(),
            last_active: now,
        },
    };
    state.db.upsert_user(&user).await?;

    let jwt = create_jwt(&user.user_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let secure = state.config.frontend_url.starts_with("https://");
    let cookie = Cookie::build((SESSION_COOKIE, jwt.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(SESSION_MAX_AGE_SECS))
        .build();

    tracing::info!(user_id = %user.user_id, "Session created");

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            token: jwt,
            user_id: user.user_id,
            name: user.name,
        }),
    ))
}

/// Logout - remove the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let secure = state.config.frontend_url.starts_with("https://");
    let removal = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build();

    (jar.add(removal), StatusCode::NO_CONTENT)
}
