// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Recipe / meal template model.

use crate::models::{Ingredient, MacroTotals};
use crate::services::nutrition;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored recipe (also used as a meal template) in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Recipe {
    /// Document ID (UUID)
    pub recipe_id: String,
    /// Owning user id
    pub user_id: String,
    /// Recipe name
    pub name: String,
    /// Ingredients, each carrying its per-100g basis and derived macros
    pub ingredients: Vec<Ingredient>,
    /// Aggregate macro totals over all ingredients
    pub totals: MacroTotals,
    /// Ordered preparation steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    /// Number of servings the totals cover
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// When the recipe was created (ISO 8601)
    pub created_at: String,
    /// Last modification (ISO 8601)
    pub updated_at: String,
}

fn default_servings() -> u32 {
    1
}

impl Recipe {
    /// Recompute every ingredient's macros from its basis and refresh the
    /// aggregate totals. Called on every write so stored totals can never
    /// go stale relative to the ingredient list.
    pub fn recompute(&mut self) {
        for ingredient in &mut self.ingredients {
            let amount = ingredient.amount_g;
            ingredient.rescale(amount);
        }
        self.totals = nutrition::aggregate(self.ingredients.iter().map(|i| &i.macros));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, calories: f64, protein: f64) -> Ingredient {
        Ingredient::from_basis(
            name,
            MacroTotals {
                calories,
                protein_g: protein,
                carbs_g: 0.0,
                fat_g: 0.0,
                fiber_g: 0.0,
            },
            100.0,
        )
    }

    fn recipe(ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            recipe_id: "r1".to_string(),
            user_id: "u1".to_string(),
            name: "Test".to_string(),
            ingredients,
            totals: MacroTotals::default(),
            instructions: vec![],
            notes: String::new(),
            servings: 1,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_recompute_sums_ingredients() {
        let mut r = recipe(vec![
            ingredient("chicken", 165.0, 31.0),
            ingredient("rice", 130.0, 2.7),
        ]);
        r.recompute();
        assert_eq!(r.totals.calories, 295.0);
        assert_eq!(r.totals.protein_g, 33.7);
    }

    #[test]
    fn test_recompute_overwrites_stale_totals() {
        let mut r = recipe(vec![ingredient("egg", 155.0, 13.0)]);
        r.totals = MacroTotals {
            calories: 9999.0,
            ..MacroTotals::default()
        };
        r.recompute();
        assert_eq!(r.totals.calories, 155.0);
    }

    #[test]
    fn test_recompute_empty_recipe_is_zero() {
        let mut r = recipe(vec![]);
        r.recompute();
        assert_eq!(r.totals, MacroTotals::default());
    }
}
