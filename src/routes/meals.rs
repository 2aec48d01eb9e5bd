// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Meal log routes.
//!
//! Logged meals are flat macro records for daily tracking; recipes are the
//! ingredient-decomposed templates.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{MacroTotals, MealEntry};
use crate::services::nutrition;
use crate::time_utils::{day_key, format_utc_rfc3339, parse_day_key};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_MEAL_NAME_LEN: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/meals", get(list_meals).post(log_meal))
        .route("/api/meals/summary", get(day_summary))
        .route("/api/meals/{id}", delete(delete_meal))
}

#[derive(Deserialize)]
struct DayQuery {
    /// Day to query ("YYYY-MM-DD"); defaults to today (UTC)
    day: Option<String>,
}

fn resolve_day(raw: Option<&str>) -> Result<String> {
    match raw {
        Some(raw) => {
            parse_day_key(raw)
                .ok_or_else(|| AppError::BadRequest("day must be YYYY-MM-DD".to_string()))?;
            Ok(raw.to_string())
        }
        None => Ok(day_key(chrono::Utc::now())),
    }
}

// ─── Logging ─────────────────────────────────────────────────

/// Meal payload: name plus flat macro values.
#[derive(Deserialize, Validate)]
pub struct MealRequest {
    pub name: String,
    /// Day the meal belongs to; defaults to today (UTC)
    #[serde(default)]
    pub day: Option<String>,
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
}

/// Log a meal.
async fn log_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<MealRequest>,
) -> Result<Json<MealEntry>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() || name.len() > MAX_MEAL_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Meal name must be 1-{} characters",
            MAX_MEAL_NAME_LEN
        )));
    }
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let meal = MealEntry {
        meal_id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id.clone(),
        name,
        day: resolve_day(payload.day.as_deref())?,
        macros: MacroTotals {
            calories: payload.calories,
            protein_g: payload.protein_g,
            carbs_g: payload.carbs_g,
            fat_g: payload.fat_g,
            fiber_g: payload.fiber_g,
        },
        logged_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    state.db.set_meal(&meal).await?;
    Ok(Json(meal))
}

// ─── Listing & Summary ───────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealListResponse {
    pub day: String,
    pub meals: Vec<MealEntry>,
    pub totals: MacroTotals,
}

/// List meals for a day with their aggregate totals.
async fn list_meals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DayQuery>,
) -> Result<Json<MealListResponse>> {
    let day = resolve_day(params.day.as_deref())?;
    let meals = state.db.get_meals_for_day(&user.user_id, &day).await?;
    let totals = nutrition::aggregate(meals.iter().map(|m| &m.macros));

    Ok(Json(MealListResponse { day, meals, totals }))
}

/// Day summary: aggregate totals plus per-macro calorie percentages.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DaySummaryResponse {
    pub day: String,
    pub meal_count: u32,
    pub totals: MacroTotals,
    /// Percent of calories from protein; None when no calories were logged
    pub protein_pct: Option<u32>,
    pub carbs_pct: Option<u32>,
    pub fat_pct: Option<u32>,
}

/// Aggregate a day of meals into totals and calorie-ratio percentages.
async fn day_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DayQuery>,
) -> Result<Json<DaySummaryResponse>> {
    let day = resolve_day(params.day.as_deref())?;
    let meals = state.db.get_meals_for_day(&user.user_id, &day).await?;
    let totals = nutrition::aggregate(meals.iter().map(|m| &m.macros));

    Ok(Json(DaySummaryResponse {
        day,
        meal_count: meals.len() as u32,
        protein_pct: nutrition::macro_ratio(
            totals.protein_g,
            nutrition::KCAL_PER_G_PROTEIN,
            totals.calories,
        ),
        carbs_pct: nutrition::macro_ratio(
            totals.carbs_g,
            nutrition::KCAL_PER_G_CARBS,
            totals.calories,
        ),
        fat_pct: nutrition::macro_ratio(totals.fat_g, nutrition::KCAL_PER_G_FAT, totals.calories),
        totals,
    }))
}

/// Delete a logged meal.
async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let meal = state
        .db
        .get_meal(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Meal {} not found", id)))?;

    if meal.user_id != user.user_id {
        return Err(AppError::NotFound(format!("Meal {} not found", id)));
    }

    state.db.delete_meal(&id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
