// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Profile and derived-targets routes.
//!
//! Onboarding and profile editing share `PUT /api/profile`; both recompute
//! BMR, TDEE, deficit and macro targets server-side. `POST
//! /api/targets/preview` runs the same calculation without persisting
//! anything, for the onboarding preview screen.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    ActivityLevel, DietType, MacroTargets, Sex, UserProfile, WeightUnit,
};
use crate::services::nutrition;
use crate::time_utils::{format_utc_rfc3339, parse_day_key};
use crate::AppState;
use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/profile", put(put_profile))
        .route("/api/targets/preview", post(preview_targets))
        .route("/api/account", delete(delete_account))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
    /// None until onboarding completes
    pub profile: Option<UserProfile>,
}

/// Get current user account and profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let account = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    let profile = state.db.get_profile(&user.user_id).await?;

    Ok(Json(MeResponse {
        user_id: account.user_id,
        name: account.name,
        email: account.email,
        profile,
    }))
}

// ─── Profile Update ──────────────────────────────────────────

/// Biometric payload for onboarding, profile edits and target previews.
#[derive(Deserialize, Validate)]
pub struct ProfileRequest {
    pub sex: Sex,
    /// Date of birth, "YYYY-MM-DD"
    pub date_of_birth: String,
    #[validate(range(min = 50.0, max = 280.0, message = "height must be 50-280 cm"))]
    pub height_cm: f64,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "weight must be positive"
    ))]
    pub current_weight: f64,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "weight must be positive"
    ))]
    pub target_weight: f64,
    pub weight_unit: WeightUnit,
    pub activity_level: ActivityLevel,
    /// Weekly weight-loss goal in kg; one of the fixed presets
    pub weekly_goal_kg: f64,
    pub diet_type: DietType,
}

/// Derived numbers computed from a biometric payload.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DerivedTargets {
    pub bmr: f64,
    pub tdee: u32,
    pub daily_deficit: u32,
    pub targets: MacroTargets,
}

/// Validate the payload and run the calculation pipeline.
fn derive_targets(payload: &ProfileRequest) -> Result<DerivedTargets> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if !nutrition::WEEKLY_GOAL_PRESETS
        .iter()
        .any(|p| (p - payload.weekly_goal_kg).abs() < f64::EPSILON)
    {
        return Err(AppError::BadRequest(
            "weekly_goal_kg must be one of 0.25, 0.5, 0.75, 1.0".to_string(),
        ));
    }

    let dob = parse_day_key(&payload.date_of_birth)
        .ok_or_else(|| AppError::BadRequest("date_of_birth must be YYYY-MM-DD".to_string()))?;
    let today = chrono::Utc::now().date_naive();
    if dob >= today {
        return Err(AppError::BadRequest(
            "date_of_birth must be in the past".to_string(),
        ));
    }

    let weight_kg = payload.weight_unit.to_kg(payload.current_weight);
    let age = nutrition::age_on(dob, today);

    let bmr = nutrition::bmr(payload.sex, weight_kg, payload.height_cm, age);
    let tdee = nutrition::tdee(bmr, payload.activity_level);
    let daily_deficit = nutrition::daily_deficit(payload.weekly_goal_kg);
    let calories = tdee.saturating_sub(daily_deficit);
    let targets = nutrition::split_macros(calories, payload.diet_type);

    Ok(DerivedTargets {
        bmr,
        tdee,
        daily_deficit,
        targets,
    })
}

/// Create or update the profile, recomputing all derived fields.
async fn put_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<UserProfile>> {
    let derived = derive_targets(&payload)?;

    let profile = UserProfile {
        user_id: user.user_id.clone(),
        sex: payload.sex,
        date_of_birth: payload.date_of_birth,
        height_cm: payload.height_cm,
        current_weight: payload.current_weight,
        target_weight: payload.target_weight,
        weight_unit: payload.weight_unit,
        activity_level: payload.activity_level,
        weekly_goal_kg: payload.weekly_goal_kg,
        diet_type: payload.diet_type,
        bmr: derived.bmr,
        tdee: derived.tdee,
        daily_deficit: derived.daily_deficit,
        targets: derived.targets,
        updated_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    state.db.set_profile(&profile).await?;

    tracing::info!(
        user_id = %user.user_id,
        tdee = profile.tdee,
        "Profile updated"
    );

    Ok(Json(profile))
}

/// Compute derived targets without persisting anything.
async fn preview_targets(
    Extension(_user): Extension<AuthUser>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<DerivedTargets>> {
    Ok(Json(derive_targets(&payload)?))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted_documents: u32,
}

/// Delete the account and all owned documents.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(user_id = %user.user_id, "User-initiated account deletion");

    let deleted = state.db.delete_user_data(&user.user_id).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        deleted_documents: deleted as u32,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ProfileRequest {
        ProfileRequest {
            sex: Sex::Male,
            date_of_birth: "1996-03-10".to_string(),
            height_cm: 180.0,
            current_weight: 80.0,
            target_weight: 75.0,
            weight_unit: WeightUnit::Kg,
            activity_level: ActivityLevel::ModeratelyActive,
            weekly_goal_kg: 0.5,
            diet_type: DietType::WeightLoss,
        }
    }

    #[test]
    fn test_derive_targets_pipeline() {
        let derived = derive_targets(&payload()).unwrap();

        assert_eq!(
            derived.tdee,
            (derived.bmr * 1.55).round() as u32,
            "TDEE must round BMR times the activity multiplier"
        );
        assert_eq!(derived.daily_deficit, 550);
        assert_eq!(
            derived.targets.calories,
            derived.tdee - derived.daily_deficit
        );
    }

    #[test]
    fn test_derive_targets_rejects_zero_weight() {
        let mut p = payload();
        p.current_weight = 0.0;
        assert!(matches!(
            derive_targets(&p),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_derive_targets_rejects_bad_dob() {
        let mut p = payload();
        p.date_of_birth = "10/03/1996".to_string();
        assert!(matches!(
            derive_targets(&p),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_derive_targets_rejects_off_preset_goal() {
        let mut p = payload();
        p.weekly_goal_kg = 0.6;
        assert!(matches!(
            derive_targets(&p),
            Err(AppError::BadRequest(_))
        ));
    }
}
