//! Macro-nutrient value types shared across foods, recipes and meal logs.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Absolute macro-nutrient amounts.
///
/// Used both as a per-100g basis on food items and as derived absolute
/// values on ingredients, recipes and logged meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MacroTotals {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein_g: f64,
    /// Carbohydrates (grams)
    pub carbs_g: f64,
    /// Fat (grams)
    pub fat_g: f64,
    /// Fiber (grams)
    #[serde(default)]
    pub fiber_g: f64,
}

impl MacroTotals {
    /// Element-wise sum.
    pub fn add(&self, other: &MacroTotals) -> MacroTotals {
        MacroTotals {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fat_g: self.fat_g + other.fat_g,
            fiber_g: self.fiber_g + other.fiber_g,
        }
    }

    /// Element-wise scale by a dimensionless ratio.
    pub fn scale(&self, ratio: f64) -> MacroTotals {
        MacroTotals {
            calories: self.calories * ratio,
            protein_g: self.protein_g * ratio,
            carbs_g: self.carbs_g * ratio,
            fat_g: self.fat_g * ratio,
            fiber_g: self.fiber_g * ratio,
        }
    }
}

/// Daily macro-nutrient targets derived from TDEE, deficit and diet type.
///
/// Gram targets are whole numbers; each is rounded independently, so the
/// calorie-equivalent sum may differ from `calories` by a few kcal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MacroTargets {
    /// Daily calorie target (TDEE minus deficit)
    pub calories: u32,
    /// Protein target (grams)
    pub protein_g: u32,
    /// Carbohydrate target (grams)
    pub carbs_g: u32,
    /// Fat target (grams)
    pub fat_g: u32,
}
