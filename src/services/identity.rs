// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! ID-token verification for session establishment.
//!
//! The browser client signs in against the managed identity provider and
//! posts the resulting ID token to `/auth/session`; this module verifies the
//! token signature against the provider's JWKS (cached in memory) and
//! extracts the user identity. Sessions themselves are our own HS256 JWTs,
//! issued by the auth routes.

use anyhow::Context;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

const JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const JWKS_CACHE_TTL: Duration = Duration::from_secs(300);
const CLOCK_SKEW_SECS: u64 = 60;

/// Verified end-user identity extracted from a valid ID token.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    /// Stable provider subject (our user id)
    pub subject: String,
    pub email: Option<String>,
    pub name: String,
}

/// ID-token verification error categories.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IdentityError {
    /// The token is missing/invalid or claims do not match expectations.
    #[error("token rejected: {0}")]
    Rejected(String),
    /// A transient infrastructure failure occurred (JWKS fetch).
    #[error("verification unavailable: {0}")]
    Unavailable(String),
}

#[derive(Clone)]
enum VerifierMode {
    Jwks,
    StaticKey {
        kid: String,
        decoding_key: Arc<DecodingKey>,
    },
}

struct JwksCacheEntry {
    keys_by_kid: HashMap<String, Arc<DecodingKey>>,
    expires_at: Instant,
}

/// Verifier for identity-provider ID tokens.
pub struct IdentityVerifier {
    http_client: reqwest::Client,
    expected_audience: String,
    mode: VerifierMode,
    jwks_cache: RwLock<Option<JwksCacheEntry>>,
    refresh_lock: Mutex<()>,
}

impl IdentityVerifier {
    /// Create a production verifier that fetches and caches provider JWKS keys.
    pub fn new(expected_audience: &str) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building identity HTTP client")?;

        tracing::info!(
            expected_audience = %expected_audience,
            "Initialized ID-token verifier"
        );

        Ok(Self {
            http_client,
            expected_audience: expected_audience.to_string(),
            mode: VerifierMode::Jwks,
            jwks_cache: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Create a verifier with a static RSA public key.
    ///
    /// Intended for deterministic local/integration tests.
    pub fn new_with_static_key(
        expected_audience: &str,
        kid: impl Into<String>,
        decoding_key: DecodingKey,
    ) -> anyhow::Result<Self> {
        let kid = kid.into();
        if kid.trim().is_empty() {
            anyhow::bail!("static kid must not be empty");
        }

        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building identity HTTP client")?;

        Ok(Self {
            http_client,
            expected_audience: expected_audience.to_string(),
            mode: VerifierMode::StaticKey {
                kid,
                decoding_key: Arc::new(decoding_key),
            },
            jwks_cache: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Verify an ID token and extract the user identity.
    pub async fn verify_id_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let header = decode_header(token)
            .map_err(|e| IdentityError::Rejected(format!("invalid JWT header: {e}")))?;

        if header.alg != Algorithm::RS256 {
            return Err(IdentityError::Rejected(format!(
                "unexpected JWT alg: {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| IdentityError::Rejected("missing JWT kid".to_string()))?;

        let decoding_key = self.decoding_key_for_kid(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.set_issuer(&ISSUERS);
        validation.set_audience(&[self.expected_audience.as_str()]);
        validation.leeway = CLOCK_SKEW_SECS;

        let token_data = decode::<IdTokenClaims>(token, decoding_key.as_ref(), &validation)
            .map_err(|e| IdentityError::Rejected(format!("JWT validation failed: {e}")))?;

        let claims = token_data.claims;

        if claims.email.is_some() && claims.email_verified != Some(true) {
            return Err(IdentityError::Rejected(
                "email present but not verified".to_string(),
            ));
        }

        tracing::debug!(subject = %claims.sub, "ID token verified");

        Ok(VerifiedIdentity {
            name: claims
                .name
                .or_else(|| claims.email.clone())
                .unwrap_or_else(|| claims.sub.clone()),
            subject: claims.sub,
            email: claims.email,
        })
    }

    async fn decoding_key_for_kid(&self, kid: &str) -> Result<Arc<DecodingKey>, IdentityError> {
        match &self.mode {
            VerifierMode::StaticKey {
                kid: static_kid,
                decoding_key,
            } => {
                return if kid == static_kid {
                    Ok(decoding_key.clone())
                } else {
                    Err(IdentityError::Rejected(format!(
                        "unknown JWT kid for static verifier: {kid}"
                    )))
                };
            }
            VerifierMode::Jwks => {}
        }

        if let Some(key) = self.lookup_cached_key(kid).await {
            return Ok(key);
        }

        // Unknown kid may mean the provider rotated keys; retry once with a
        // forced refresh before giving up.
        for force_refresh in [false, true] {
            self.refresh_jwks(force_refresh).await?;
            if let Some(key) = self.lookup_cached_key(kid).await {
                return Ok(key);
            }
        }

        Err(IdentityError::Rejected(format!(
            "JWT kid not found in JWKS after refresh: {kid}"
        )))
    }

    async fn lookup_cached_key(&self, kid: &str) -> Option<Arc<DecodingKey>> {
        let cache = self.jwks_cache.read().await;
        let now = Instant::now();
        cache
            .as_ref()
            .filter(|entry| entry.expires_at > now)
            .and_then(|entry| entry.keys_by_kid.get(kid))
            .cloned()
    }

    async fn refresh_jwks(&self, force_refresh: bool) -> Result<(), IdentityError> {
        let _guard = self.refresh_lock.lock().await;

        if !force_refresh {
            let cache = self.jwks_cache.read().await;
            if cache
                .as_ref()
                .is_some_and(|entry| entry.expires_at > Instant::now())
            {
                return Ok(());
            }
        }

        tracing::debug!(jwks_url = JWKS_URL, "Refreshing JWKS cache");

        let response = self
            .http_client
            .get(JWKS_URL)
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("JWKS request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(IdentityError::Unavailable(format!(
                "JWKS request returned status {}",
                response.status()
            )));
        }

        let jwks: Jwks = response
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("invalid JWKS JSON: {e}")))?;

        let mut keys_by_kid: HashMap<String, Arc<DecodingKey>> = HashMap::new();
        for jwk in jwks.keys {
            if jwk.kty != "RSA" || jwk.kid.trim().is_empty() {
                continue;
            }
            if jwk.use_.as_deref().is_some_and(|u| u != "sig") {
                continue;
            }

            match DecodingKey::from_rsa_components(&jwk.n, &jwk.e) {
                Ok(key) => {
                    keys_by_kid.insert(jwk.kid, Arc::new(key));
                }
                Err(e) => {
                    tracing::warn!(error = %e, kid = %jwk.kid, "Skipping invalid RSA JWKS key");
                }
            }
        }

        let mut cache = self.jwks_cache.write().await;
        *cache = Some(JwksCacheEntry {
            keys_by_kid,
            expires_at: Instant::now() + JWKS_CACHE_TTL,
        });

        Ok(())
    }
}

#[derive(Deserialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct Jwks {
    keys: Vec<Jwk>,
}

#[derive(Deserialize)]
struct Jwk {
    kty: String,
    #[serde(default)]
    kid: String,
    #[serde(rename = "use", default)]
    use_: Option<String>,
    #[serde(default)]
    n: String,
    #[serde(default)]
    e: String,
}
