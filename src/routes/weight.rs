// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Weight tracking routes.
//!
//! The weight log is append-only and listed newest first. Each entry copies
//! the day's meal totals at creation time and records the change against
//! the previous entry. History can only be cleared as a whole.

use crate::db::firestore::WeightQueryCursor;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::WeightEntry;
use crate::services::nutrition;
use crate::time_utils::{day_key, format_utc_rfc3339, parse_day_key};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_PER_PAGE: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/weight",
        get(list_entries).post(add_entry).delete(clear_history),
    )
}

// ─── Cursor helpers ──────────────────────────────────────────

fn parse_cursor(cursor: Option<&str>) -> Result<Option<WeightQueryCursor>> {
    cursor
        .map(|raw| {
            let invalid_cursor =
                || AppError::BadRequest("Invalid 'cursor' parameter".to_string());

            let decoded = URL_SAFE_NO_PAD.decode(raw).map_err(|_| invalid_cursor())?;
            let day = String::from_utf8(decoded).map_err(|_| invalid_cursor())?;
            parse_day_key(&day).ok_or_else(invalid_cursor)?;

            Ok(WeightQueryCursor { day })
        })
        .transpose()
}

fn encode_cursor(cursor: &WeightQueryCursor) -> String {
    URL_SAFE_NO_PAD.encode(cursor.day.as_bytes())
}

// ─── Adding entries ──────────────────────────────────────────

/// Weight entry payload. Weights are in kilograms; the client converts
/// display units before submitting.
#[derive(Deserialize, Validate)]
pub struct WeightRequest {
    /// Day of the entry; defaults to today (UTC)
    #[serde(default)]
    pub day: Option<String>,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "weight must be positive"
    ))]
    pub morning_weight_kg: f64,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "weight must be positive"
    ))]
    pub night_weight_kg: Option<f64>,
}

/// Append a weight entry.
///
/// Copies the day's aggregate meal totals as an informational snapshot and
/// computes the morning-weight change against the most recent entry.
async fn add_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<WeightRequest>,
) -> Result<Json<WeightEntry>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let day = match payload.day.as_deref() {
        Some(raw) => {
            parse_day_key(raw)
                .ok_or_else(|| AppError::BadRequest("day must be YYYY-MM-DD".to_string()))?;
            raw.to_string()
        }
        None => day_key(chrono::Utc::now()),
    };

    let meals = state.db.get_meals_for_day(&user.user_id, &day).await?;
    let day_totals = nutrition::aggregate(meals.iter().map(|m| &m.macros));

    let previous = state.db.latest_weight_entry(&user.user_id).await?;
    let change_kg = previous
        .as_ref()
        .map(|prev| payload.morning_weight_kg - prev.morning_weight_kg);

    let entry = WeightEntry {
        entry_id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id.clone(),
        day,
        morning_weight_kg: payload.morning_weight_kg,
        night_weight_kg: payload.night_weight_kg,
        day_totals,
        change_kg,
        recorded_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    state.db.set_weight_entry(&entry).await?;

    tracing::info!(
        user_id = %user.user_id,
        day = %entry.day,
        "Weight entry recorded"
    );

    Ok(Json(entry))
}

// ─── Listing & Clearing ──────────────────────────────────────

#[derive(Deserialize)]
struct EntriesQuery {
    /// Cursor for forward pagination (opaque token)
    cursor: Option<String>,
    /// Items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_per_page() -> u32 {
    50
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeightListResponse {
    pub entries: Vec<WeightEntry>,
    pub per_page: u32,
    pub next_cursor: Option<String>,
}

/// List weight entries newest first with cursor pagination.
async fn list_entries(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<EntriesQuery>,
) -> Result<Json<WeightListResponse>> {
    let limit = params.per_page.min(MAX_PER_PAGE).max(1);
    let cursor = parse_cursor(params.cursor.as_deref())?;

    // Fetch one extra item to determine if another page is available.
    let fetch_limit = limit.saturating_add(1);
    let mut entries = state
        .db
        .get_weight_entries(&user.user_id, cursor, fetch_limit)
        .await?;

    let has_more = entries.len() > limit as usize;
    if has_more {
        entries.truncate(limit as usize);
    }

    let next_cursor = if has_more {
        entries.last().map(|e| {
            encode_cursor(&WeightQueryCursor {
                day: e.day.clone(),
            })
        })
    } else {
        None
    };

    Ok(Json(WeightListResponse {
        entries,
        per_page: limit,
        next_cursor,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub deleted: u32,
}

/// Clear the entire weight history.
async fn clear_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ClearHistoryResponse>> {
    let deleted = state.db.clear_weight_entries(&user.user_id).await?;

    Ok(Json(ClearHistoryResponse {
        success: true,
        deleted: deleted as u32,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_round_trip() {
        let cursor = WeightQueryCursor {
            day: "2026-02-14".to_string(),
        };

        let encoded = encode_cursor(&cursor);
        let decoded = parse_cursor(Some(&encoded)).unwrap().unwrap();

        assert_eq!(decoded, cursor);
    }

    #[test]
    fn test_cursor_rejects_invalid_input() {
        let err = parse_cursor(Some("not-base64!!")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        // Valid base64, but not a day key
        let bogus = URL_SAFE_NO_PAD.encode(b"yesterday");
        let err = parse_cursor(Some(&bogus)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
