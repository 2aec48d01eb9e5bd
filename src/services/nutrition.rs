// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Energy and macro-nutrient calculators.
//!
//! Six stateless pure functions over validated inputs:
//! - Harris-Benedict BMR and activity-scaled TDEE
//! - weekly-goal calorie deficit
//! - diet-type macro split
//! - per-100g ingredient scaling (see [`crate::models::Ingredient`])
//! - macro aggregation
//! - macro calorie-ratio percentages
//!
//! Input validation happens at the HTTP boundary; these functions assume
//! positive weights/heights and perform plain arithmetic.

use crate::models::{ActivityLevel, DietType, MacroTargets, MacroTotals, Sex};
use chrono::{Datelike, NaiveDate};

/// Energy density of adipose tissue: ~7700 kcal per kg.
pub const KCAL_PER_KG_BODY_FAT: f64 = 7700.0;

/// Atwater factors (kcal per gram).
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Supported weekly weight-loss presets (kg/week).
pub const WEEKLY_GOAL_PRESETS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Age in whole years on `today`, adjusted for whether the birthday has
/// already occurred this year.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Basal metabolic rate (kcal/day) via the Harris-Benedict equations.
///
/// Unrounded; rounding happens at the TDEE stage.
pub fn bmr(sex: Sex, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    let age = f64::from(age_years);
    match sex {
        Sex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Sex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

/// Total daily energy expenditure: BMR scaled by the activity multiplier,
/// rounded to the nearest calorie.
pub fn tdee(bmr: f64, level: ActivityLevel) -> u32 {
    (bmr * level.multiplier()).round() as u32
}

/// Daily calorie deficit for a weekly weight-loss goal in kg.
pub fn daily_deficit(weekly_goal_kg: f64) -> u32 {
    (weekly_goal_kg * KCAL_PER_KG_BODY_FAT / 7.0).round() as u32
}

/// Split a daily calorie target into gram targets by diet type.
///
/// Each gram value is rounded independently, so the calorie-equivalent sum
/// may differ from `calories` by a few kcal.
pub fn split_macros(calories: u32, diet: DietType) -> MacroTargets {
    let (protein_frac, carbs_frac, fat_frac) = diet.calorie_fractions();
    let calories_f = f64::from(calories);

    MacroTargets {
        calories,
        protein_g: (calories_f * protein_frac / KCAL_PER_G_PROTEIN).round() as u32,
        carbs_g: (calories_f * carbs_frac / KCAL_PER_G_CARBS).round() as u32,
        fat_g: (calories_f * fat_frac / KCAL_PER_G_FAT).round() as u32,
    }
}

/// Element-wise sum of macro values. An empty iterator yields all-zero
/// totals. No per-serving weighting happens here.
pub fn aggregate<'a, I>(items: I) -> MacroTotals
where
    I: IntoIterator<Item = &'a MacroTotals>,
{
    items
        .into_iter()
        .fold(MacroTotals::default(), |acc, m| acc.add(m))
}

/// Percentage of total calories contributed by one macro.
///
/// Returns `None` when `total_calories` is zero (the ratio is undefined).
pub fn macro_ratio(grams: f64, kcal_per_gram: f64, total_calories: f64) -> Option<u32> {
    if total_calories == 0.0 {
        return None;
    }
    Some((grams * kcal_per_gram / total_calories * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_multiplier_table() {
        let multipliers: Vec<f64> = ActivityLevel::all()
            .iter()
            .map(|l| l.multiplier())
            .collect();
        assert_eq!(multipliers, vec![1.2, 1.375, 1.55, 1.725, 1.9]);
    }

    #[test]
    fn test_bmr_male_matches_harris_benedict() {
        let expected = 88.362 + 13.397 * 80.0 + 4.799 * 180.0 - 5.677 * 30.0;
        let got = bmr(Sex::Male, 80.0, 180.0, 30);
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_female_matches_harris_benedict() {
        let expected = 447.593 + 9.247 * 65.0 + 3.098 * 165.0 - 4.330 * 28.0;
        let got = bmr(Sex::Female, 65.0, 165.0, 28);
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_rounds_at_tdee_stage() {
        let raw = bmr(Sex::Male, 80.0, 180.0, 30);
        for level in ActivityLevel::all() {
            assert_eq!(tdee(raw, level), (raw * level.multiplier()).round() as u32);
        }
    }

    #[test]
    fn test_deficit_presets() {
        assert_eq!(daily_deficit(0.25), 275);
        assert_eq!(daily_deficit(0.5), 550);
        assert_eq!(daily_deficit(0.75), 825);
        assert_eq!(daily_deficit(1.0), 1100);
    }

    #[test]
    fn test_macro_split_weight_loss_2000() {
        let targets = split_macros(2000, DietType::WeightLoss);
        assert_eq!(targets.protein_g, 150); // 2000 * 0.30 / 4
        assert_eq!(targets.carbs_g, 200); // 2000 * 0.40 / 4
        assert_eq!(targets.fat_g, 67); // 2000 * 0.30 / 9, rounded
    }

    #[test]
    fn test_macro_split_calorie_sum_within_rounding() {
        // Three independent roundings can each be off by half a gram:
        // 0.5*4 + 0.5*4 + 0.5*9 = 8.5 kcal worst case.
        for diet in [
            DietType::WeightLoss,
            DietType::MuscleBuilding,
            DietType::LowCarb,
        ] {
            for calories in [1200u32, 1730, 2000, 2487, 3100] {
                let t = split_macros(calories, diet);
                let sum = f64::from(t.protein_g) * KCAL_PER_G_PROTEIN
                    + f64::from(t.carbs_g) * KCAL_PER_G_CARBS
                    + f64::from(t.fat_g) * KCAL_PER_G_FAT;
                assert!(
                    (sum - f64::from(calories)).abs() <= 8.5,
                    "{diet:?}/{calories}: {sum}"
                );
            }
        }
    }

    #[test]
    fn test_diet_fractions_sum_to_one() {
        for diet in [
            DietType::WeightLoss,
            DietType::MuscleBuilding,
            DietType::LowCarb,
        ] {
            let (p, c, f) = diet.calorie_fractions();
            assert!((p + c + f - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_aggregate_empty_is_zero() {
        let totals = aggregate(std::iter::empty());
        assert_eq!(totals, MacroTotals::default());
    }

    #[test]
    fn test_aggregate_single_passes_through() {
        let single = MacroTotals {
            calories: 320.0,
            protein_g: 25.0,
            carbs_g: 40.0,
            fat_g: 6.0,
            fiber_g: 3.0,
        };
        assert_eq!(aggregate([&single]), single);
    }

    #[test]
    fn test_aggregate_sums_elementwise() {
        let a = MacroTotals {
            calories: 100.0,
            protein_g: 10.0,
            carbs_g: 5.0,
            fat_g: 2.0,
            fiber_g: 1.0,
        };
        let b = MacroTotals {
            calories: 50.0,
            protein_g: 2.5,
            carbs_g: 8.0,
            fat_g: 0.5,
            fiber_g: 0.0,
        };
        let sum = aggregate([&a, &b]);
        assert_eq!(sum.calories, 150.0);
        assert_eq!(sum.protein_g, 12.5);
        assert_eq!(sum.carbs_g, 13.0);
        assert_eq!(sum.fat_g, 2.5);
        assert_eq!(sum.fiber_g, 1.0);
    }

    #[test]
    fn test_macro_ratio() {
        assert_eq!(macro_ratio(150.0, KCAL_PER_G_PROTEIN, 2000.0), Some(30));
        assert_eq!(macro_ratio(67.0, KCAL_PER_G_FAT, 2000.0), Some(30));
    }

    #[test]
    fn test_macro_ratio_zero_calories_is_undefined() {
        assert_eq!(macro_ratio(50.0, KCAL_PER_G_PROTEIN, 0.0), None);
    }

    #[test]
    fn test_age_accounts_for_birthday() {
        let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let before = NaiveDate::from_ymd_opt(2026, 6, 14).unwrap();
        let on = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let after = NaiveDate::from_ymd_opt(2026, 6, 16).unwrap();

        assert_eq!(age_on(dob, before), 35);
        assert_eq!(age_on(dob, on), 36);
        assert_eq!(age_on(dob, after), 36);
    }

    #[test]
    fn test_weight_unit_normalization() {
        use crate::models::WeightUnit;

        assert_eq!(WeightUnit::Kg.to_kg(80.0), 80.0);
        assert!((WeightUnit::Lbs.to_kg(176.0) - 79.832_192).abs() < 1e-6);
        assert!((WeightUnit::St.to_kg(12.0) - 76.203_48).abs() < 1e-6);
    }
}
