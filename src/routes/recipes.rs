// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Recipe CRUD routes.
//!
//! Ingredient macros and recipe totals are always recomputed server-side
//! from each ingredient's per-100g basis, so stored aggregates can never go
//! stale relative to the ingredient list.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Ingredient, MacroTotals, Recipe};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MAX_RECIPE_NAME_LEN: usize = 100;
const MAX_INGREDIENTS: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/{id}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecipeListResponse {
    pub recipes: Vec<Recipe>,
    pub total: u32,
}

/// List the user's recipes, newest first.
async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<RecipeListResponse>> {
    let recipes = state.db.list_recipes(&user.user_id).await?;
    let total = recipes.len() as u32;
    Ok(Json(RecipeListResponse { recipes, total }))
}

/// One ingredient line in a recipe payload.
///
/// The per-100g basis may be sent inline (round-tripped from an earlier GET
/// or an LLM generation); when absent it is resolved from the named food
/// item.
#[derive(Deserialize)]
pub struct IngredientRequest {
    pub food_name: String,
    pub amount_g: f64,
    #[serde(default)]
    pub per_100g: Option<MacroTotals>,
}

#[derive(Deserialize)]
pub struct RecipeRequest {
    pub name: String,
    pub ingredients: Vec<IngredientRequest>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
}

fn default_servings() -> u32 {
    1
}

fn validate_recipe_request(payload: &RecipeRequest) -> Result<()> {
    let name = payload.name.trim();
    if name.is_empty() || name.len() > MAX_RECIPE_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Recipe name must be 1-{} characters",
            MAX_RECIPE_NAME_LEN
        )));
    }
    if payload.ingredients.len() > MAX_INGREDIENTS {
        return Err(AppError::BadRequest(format!(
            "A recipe may have at most {} ingredients",
            MAX_INGREDIENTS
        )));
    }
    if payload.servings == 0 {
        return Err(AppError::BadRequest(
            "Servings must be at least 1".to_string(),
        ));
    }
    for ingredient in &payload.ingredients {
        if ingredient.amount_g <= 0.0 || !ingredient.amount_g.is_finite() {
            return Err(AppError::BadRequest(format!(
                "Ingredient '{}' must have a positive amount",
                ingredient.food_name
            )));
        }
    }
    Ok(())
}

/// Resolve each ingredient's per-100g basis and build scaled ingredients.
async fn resolve_ingredients(
    state: &AppState,
    user_id: &str,
    requested: Vec<IngredientRequest>,
) -> Result<Vec<Ingredient>> {
    let mut ingredients = Vec::with_capacity(requested.len());

    for req in requested {
        let basis = match req.per_100g {
            Some(basis) => basis,
            None => {
                let item = state
                    .db
                    .get_food_item(user_id, &req.food_name)
                    .await?
                    .ok_or_else(|| {
                        AppError::BadRequest(format!(
                            "Unknown food item '{}' and no per-100g values given",
                            req.food_name
                        ))
                    })?;
                item.per_100g
            }
        };

        ingredients.push(Ingredient::from_basis(&req.food_name, basis, req.amount_g));
    }

    Ok(ingredients)
}

/// Create a recipe.
async fn create_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<RecipeRequest>,
) -> Result<Json<Recipe>> {
    validate_recipe_request(&payload)?;

    let now = format_utc_rfc3339(chrono::Utc::now());
    let ingredients = resolve_ingredients(&state, &user.user_id, payload.ingredients).await?;

    let mut recipe = Recipe {
        recipe_id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id.clone(),
        name: payload.name.trim().to_string(),
        ingredients,
        totals: MacroTotals::default(),
        instructions: payload.instructions,
        notes: payload.notes,
        servings: payload.servings,
        created_at: now.clone(),
        updated_at: now,
    };
    recipe.recompute();

    state.db.set_recipe(&recipe).await?;

    tracing::info!(
        user_id = %user.user_id,
        recipe_id = %recipe.recipe_id,
        ingredients = recipe.ingredients.len(),
        "Recipe created"
    );

    Ok(Json(recipe))
}

/// Fetch a recipe, enforcing ownership.
async fn load_owned_recipe(state: &AppState, user_id: &str, recipe_id: &str) -> Result<Recipe> {
    let recipe = state
        .db
        .get_recipe(recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", recipe_id)))?;

    // Hide other users' recipes rather than revealing their existence
    if recipe.user_id != user_id {
        return Err(AppError::NotFound(format!("Recipe {} not found", recipe_id)));
    }

    Ok(recipe)
}

/// Get a single recipe.
async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>> {
    Ok(Json(load_owned_recipe(&state, &user.user_id, &id).await?))
}

/// Replace a recipe's contents, rescaling every ingredient from its basis.
async fn update_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<RecipeRequest>,
) -> Result<Json<Recipe>> {
    validate_recipe_request(&payload)?;

    let mut recipe = load_owned_recipe(&state, &user.user_id, &id).await?;

    recipe.name = payload.name.trim().to_string();
    recipe.ingredients = resolve_ingredients(&state, &user.user_id, payload.ingredients).await?;
    recipe.instructions = payload.instructions;
    recipe.notes = payload.notes;
    recipe.servings = payload.servings;
    recipe.updated_at = format_utc_rfc3339(chrono::Utc::now());
    recipe.recompute();

    state.db.set_recipe(&recipe).await?;

    Ok(Json(recipe))
}

/// Delete a recipe.
async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    load_owned_recipe(&state, &user.user_id, &id).await?;
    state.db.delete_recipe(&id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
