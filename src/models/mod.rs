// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Data models for the application.

pub mod food;
pub mod log;
pub mod macros;
pub mod recipe;
pub mod user;

pub use food::{FoodItem, Ingredient};
pub use log::{MealEntry, WeightEntry};
pub use macros::{MacroTargets, MacroTotals};
pub use recipe::Recipe;
pub use user::{ActivityLevel, DietType, Sex, User, UserProfile, WeightUnit};
