//! User account and profile models for storage and API.

use crate::models::MacroTargets;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User account stored in Firestore.
///
/// Keyed by the identity provider subject (also used as document ID).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identity provider subject (also used as document ID)
    pub user_id: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// Display name
    pub name: String,
    /// When user first signed in
    pub created_at: String,
    /// Last session timestamp
    pub last_active: String,
}

/// Biological sex, as used by the Harris-Benedict equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

/// Unit the user entered their weight in. Stored alongside the normalized
/// kilogram value so the UI can round-trip the original unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Kg,
    Lbs,
    St,
}

impl WeightUnit {
    /// Kilograms per one unit.
    pub fn kg_factor(self) -> f64 {
        match self {
            WeightUnit::Kg => 1.0,
            WeightUnit::Lbs => 0.453592,
            WeightUnit::St => 6.35029,
        }
    }

    /// Normalize an amount in this unit to kilograms.
    pub fn to_kg(self, amount: f64) -> f64 {
        amount * self.kg_factor()
    }
}

/// Activity level tiers with fixed TDEE multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 days/week
    LightlyActive,
    /// Exercise 3-5 days/week
    ModeratelyActive,
    /// Exercise 6-7 days/week
    VeryActive,
    /// Hard daily training or physical job
    ExtremelyActive,
}

impl ActivityLevel {
    /// TDEE multiplier for this tier.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// All tiers, in ascending multiplier order.
    pub fn all() -> [ActivityLevel; 5] {
        [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtremelyActive,
        ]
    }
}

/// Diet archetype mapping to fixed calorie-fraction triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    WeightLoss,
    MuscleBuilding,
    LowCarb,
}

impl DietType {
    /// Calorie fractions (protein, carbs, fat). Each triple sums to 1.0.
    pub fn calorie_fractions(self) -> (f64, f64, f64) {
        match self {
            DietType::WeightLoss => (0.30, 0.40, 0.30),
            DietType::MuscleBuilding => (0.30, 0.50, 0.20),
            DietType::LowCarb => (0.40, 0.20, 0.40),
        }
    }
}

/// User profile stored in Firestore, keyed by user id.
///
/// The `bmr`, `tdee`, `daily_deficit` and `targets` fields are derived and
/// recomputed on every write; they are never accepted from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// Owning user id
    pub user_id: String,
    pub sex: Sex,
    /// Date of birth, "YYYY-MM-DD"
    pub date_of_birth: String,
    /// Height in centimeters
    pub height_cm: f64,
    /// Current weight in the entered unit
    pub current_weight: f64,
    /// Target weight in the entered unit
    pub target_weight: f64,
    /// Unit the weights were entered in
    pub weight_unit: WeightUnit,
    pub activity_level: ActivityLevel,
    /// Weekly weight-loss goal in kg (0.25/0.5/0.75/1.0 presets)
    pub weekly_goal_kg: f64,
    pub diet_type: DietType,

    // Derived (server-computed)
    /// Basal metabolic rate, unrounded (kcal/day)
    pub bmr: f64,
    /// Total daily energy expenditure, rounded (kcal/day)
    pub tdee: u32,
    /// Daily calorie deficit, rounded (kcal/day)
    pub daily_deficit: u32,
    /// Daily macro targets
    pub targets: MacroTargets,

    /// Last profile update (ISO 8601)
    pub updated_at: String,
}
