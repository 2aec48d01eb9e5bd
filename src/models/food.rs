// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Food item and ingredient models.

use crate::models::MacroTotals;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User-authored food item stored in Firestore.
///
/// Referenced by name from recipe ingredients (the document ID is the
/// URL-encoded name scoped to the owning user).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FoodItem {
    /// Owning user id
    pub user_id: String,
    /// Display name (also the reference key)
    pub name: String,
    /// Nutrient profile normalized to a 100-gram reference quantity
    pub per_100g: MacroTotals,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}

/// An ingredient inside a recipe: a food item scaled to an amount in grams.
///
/// The per-100g basis is copied from the food item when the ingredient is
/// added and is immutable afterwards. `macros` always equals the basis
/// scaled to `amount_g`; edits rescale from the basis, never from the
/// previously scaled values, so repeated edits cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Ingredient {
    /// Name of the source food item
    pub food_name: String,
    /// Chosen amount in grams
    pub amount_g: f64,
    /// Immutable per-100g basis
    pub per_100g: MacroTotals,
    /// Derived absolute values (basis scaled to `amount_g`)
    pub macros: MacroTotals,
}

impl Ingredient {
    /// Build an ingredient from a food item's basis and an amount in grams.
    pub fn from_basis(food_name: &str, per_100g: MacroTotals, amount_g: f64) -> Self {
        Self {
            food_name: food_name.to_string(),
            amount_g,
            per_100g,
            macros: per_100g.scale(amount_g / 100.0),
        }
    }

    /// Change the amount, recomputing absolute values from the basis.
    pub fn rescale(&mut self, new_amount_g: f64) {
        self.amount_g = new_amount_g;
        self.macros = self.per_100g.scale(new_amount_g / 100.0);
    }
}
