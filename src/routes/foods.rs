// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Food item CRUD routes.
//!
//! Food items are referenced by name from recipe ingredients, so the name
//! is the key: `PUT /api/foods/{name}` both creates and updates.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{FoodItem, MacroTotals};
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
use validator::Validate;

const MAX_FOOD_NAME_LEN: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/foods", get(list_foods))
        .route(
            "/api/foods/{name}",
            get(get_food).put(put_food).delete(delete_food),
        )
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FoodListResponse {
    pub foods: Vec<FoodItem>,
    pub total: u32,
}

/// List the user's food items sorted by name.
async fn list_foods(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FoodListResponse>> {
    let foods = state.db.list_food_items(&user.user_id).await?;
    let total = foods.len() as u32;
    Ok(Json(FoodListResponse { foods, total }))
}

/// Get a single food item by name.
async fn get_food(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
) -> Result<Json<FoodItem>> {
    state
        .db
        .get_food_item(&user.user_id, &name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Food item '{}' not found", name)))
}

/// Food item payload: a per-100g nutrient profile plus notes.
#[derive(Deserialize, Validate)]
pub struct FoodRequest {
    #[validate(range(min = 0.0, message = "calories must be non-negative"))]
    pub calories: f64,
    #[validate(range(min = 0.0, message = "protein must be non-negative"))]
    pub protein_g: f64,
    #[validate(range(min = 0.0, message = "carbs must be non-negative"))]
    pub carbs_g: f64,
    #[validate(range(min = 0.0, message = "fat must be non-negative"))]
    pub fat_g: f64,
    #[validate(range(min = 0.0, message = "fiber must be non-negative"))]
    #[serde(default)]
    pub fiber_g: f64,
    #[serde(default)]
    pub notes: String,
}

/// Create or update a food item.
async fn put_food(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
    Json(payload): Json<FoodRequest>,
) -> Result<Json<FoodItem>> {
    let name = name.trim().to_string();
    if name.is_empty() || name.len() > MAX_FOOD_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Food name must be 1-{} characters",
            MAX_FOOD_NAME_LEN
        )));
    }
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let item = FoodItem {
        user_id: user.user_id.clone(),
        name,
        per_100g: MacroTotals {
            calories: payload.calories,
            protein_g: payload.protein_g,
            carbs_g: payload.carbs_g,
            fat_g: payload.fat_g,
            fiber_g: payload.fiber_g,
        },
        notes: payload.notes,
    };

    state.db.upsert_food_item(&item).await?;
    Ok(Json(item))
}

/// Delete a food item by name. Recipes that already copied its per-100g
/// basis are unaffected.
async fn delete_food(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>> {
    state
        .db
        .get_food_item(&user.user_id, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Food item '{}' not found", name)))?;

    state.db.delete_food_item(&user.user_id, &name).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
