// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! End-to-end tests for the target calculation pipeline.
//!
//! `/api/targets/preview` runs the whole BMR → TDEE → deficit → macro-split
//! chain without touching the database, so it can be exercised against the
//! offline test app.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::Datelike;
use serde_json::Value;
use tower::ServiceExt;

mod common;

/// Whole-year age the server should compute for a date of birth.
fn expected_age(dob: &str) -> f64 {
    let dob = chrono::NaiveDate::parse_from_str(dob, "%Y-%m-%d").unwrap();
    let today = chrono::Utc::now().date_naive();
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    f64::from(age)
}

async fn preview(body: &str) -> Value {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/targets/preview")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const MALE_80KG: &str = r#"{
    "sex": "male",
    "date_of_birth": "1990-01-15",
    "height_cm": 180.0,
    "current_weight": 80.0,
    "target_weight": 75.0,
    "weight_unit": "kg",
    "activity_level": "moderately_active",
    "weekly_goal_kg": 0.5,
    "diet_type": "weight_loss"
}"#;

#[tokio::test]
async fn test_preview_computes_tdee_from_bmr() {
    let body = preview(MALE_80KG).await;

    let bmr = body["bmr"].as_f64().unwrap();
    let tdee = body["tdee"].as_u64().unwrap();

    let expected_bmr =
        88.362 + 13.397 * 80.0 + 4.799 * 180.0 - 5.677 * expected_age("1990-01-15");
    assert!((bmr - expected_bmr).abs() < 1e-6, "bmr={bmr}");
    assert_eq!(tdee, (bmr * 1.55).round() as u64);
}

#[tokio::test]
async fn test_preview_deficit_and_calorie_target() {
    let body = preview(MALE_80KG).await;

    assert_eq!(body["daily_deficit"].as_u64().unwrap(), 550);

    let tdee = body["tdee"].as_u64().unwrap();
    let calories = body["targets"]["calories"].as_u64().unwrap();
    assert_eq!(calories, tdee - 550);
}

#[tokio::test]
async fn test_preview_macro_split_follows_atwater_factors() {
    let body = preview(MALE_80KG).await;

    let calories = body["targets"]["calories"].as_u64().unwrap() as f64;
    let protein = body["targets"]["protein_g"].as_u64().unwrap() as f64;
    let carbs = body["targets"]["carbs_g"].as_u64().unwrap() as f64;
    let fat = body["targets"]["fat_g"].as_u64().unwrap() as f64;

    // weight_loss split: 30% protein / 40% carbs / 30% fat by calories
    assert_eq!(protein, (calories * 0.30 / 4.0).round());
    assert_eq!(carbs, (calories * 0.40 / 4.0).round());
    assert_eq!(fat, (calories * 0.30 / 9.0).round());

    // The independent roundings must reconstruct the calorie target closely
    let sum = protein * 4.0 + carbs * 4.0 + fat * 9.0;
    assert!((sum - calories).abs() <= 8.5);
}

#[tokio::test]
async fn test_preview_normalizes_pounds() {
    let lbs_body = r#"{
        "sex": "female",
        "date_of_birth": "1992-07-01",
        "height_cm": 165.0,
        "current_weight": 154.0,
        "target_weight": 140.0,
        "weight_unit": "lbs",
        "activity_level": "sedentary",
        "weekly_goal_kg": 0.25,
        "diet_type": "low_carb"
    }"#;
    let body = preview(lbs_body).await;

    let bmr = body["bmr"].as_f64().unwrap();
    let weight_kg = 154.0 * 0.453592;
    let age = expected_age("1992-07-01");
    let expected = 447.593 + 9.247 * weight_kg + 3.098 * 165.0 - 4.330 * age;
    assert!((bmr - expected).abs() < 1e-6, "bmr={bmr}");
    assert_eq!(body["daily_deficit"].as_u64().unwrap(), 275);
}
