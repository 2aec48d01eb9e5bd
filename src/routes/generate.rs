// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! LLM recipe generation routes.
//!
//! Thin proxies over [`crate::services::LlmService`]; the reply is already
//! validated there, so a malformed completion never reaches the client as a
//! trusted recipe.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::MacroTargets;
use crate::services::GeneratedRecipe;
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::Deserialize;
use std::sync::Arc;

const MAX_QUERY_LEN: usize = 500;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/generate/recipe", post(generate_recipe))
        .route("/api/generate/alternative", post(generate_alternative))
}

fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_QUERY_LEN {
        return Err(AppError::BadRequest(format!(
            "Query must be 1-{} characters",
            MAX_QUERY_LEN
        )));
    }
    Ok(trimmed)
}

#[derive(Deserialize)]
pub struct GenerateRecipeRequest {
    pub query: String,
}

/// Generate a recipe from a free-text query.
async fn generate_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<GenerateRecipeRequest>,
) -> Result<Json<GeneratedRecipe>> {
    let query = validate_query(&payload.query)?;

    tracing::info!(user_id = %user.user_id, "Generating recipe");

    let recipe = state.llm.generate_recipe(query).await?;
    Ok(Json(recipe))
}

#[derive(Deserialize)]
pub struct GenerateAlternativeRequest {
    pub search_query: String,
    /// Caller-supplied goals; falls back to the stored profile targets
    #[serde(default)]
    pub user_goals: Option<MacroTargets>,
}

/// Generate a healthier alternative to a dish, steered by the user's
/// macro targets.
async fn generate_alternative(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<GenerateAlternativeRequest>,
) -> Result<Json<GeneratedRecipe>> {
    let query = validate_query(&payload.search_query)?;

    let goals = match payload.user_goals {
        Some(goals) => goals,
        None => {
            state
                .db
                .get_profile(&user.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::BadRequest(
                        "No stored targets; complete onboarding or pass user_goals".to_string(),
                    )
                })?
                .targets
        }
    };

    tracing::info!(user_id = %user.user_id, "Generating alternative recipe");

    let recipe = state.llm.generate_alternative(query, &goals).await?;
    Ok(Json(recipe))
}
