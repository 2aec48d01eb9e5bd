// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Daily tracking models: logged meals and weight entries.

use crate::models::MacroTotals;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A logged meal: a flat macro record for daily tracking, not decomposed
/// into ingredients (distinct from a recipe).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealEntry {
    /// Document ID (UUID)
    pub meal_id: String,
    /// Owning user id
    pub user_id: String,
    /// Meal name
    pub name: String,
    /// Day the meal belongs to ("YYYY-MM-DD")
    pub day: String,
    /// Macro values for the meal
    pub macros: MacroTotals,
    /// When the meal was logged (ISO 8601)
    pub logged_at: String,
}

/// A body-weight entry. Append-only, listed newest first; deleting history
/// clears the entire list rather than individual entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeightEntry {
    /// Document ID (UUID)
    pub entry_id: String,
    /// Owning user id
    pub user_id: String,
    /// Day of the entry ("YYYY-MM-DD")
    pub day: String,
    /// Morning weight (kg)
    pub morning_weight_kg: f64,
    /// Night weight (kg), if recorded
    pub night_weight_kg: Option<f64>,
    /// Day's aggregate macro totals, copied from the meal log at entry time.
    /// Informational snapshot, not a live reference.
    pub day_totals: MacroTotals,
    /// Morning weight change vs. the previous entry (kg), None for the first
    pub change_kg: Option<f64>,
    /// When the entry was recorded (ISO 8601)
    pub recorded_at: String,
}
