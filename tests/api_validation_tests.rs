// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! API input validation tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn preview_body(weight: f64, weekly_goal: f64, dob: &str) -> String {
    format!(
        r#"{{
            "sex": "male",
            "date_of_birth": "{dob}",
            "height_cm": 180.0,
            "current_weight": {weight},
            "target_weight": 75.0,
            "weight_unit": "kg",
            "activity_level": "moderately_active",
            "weekly_goal_kg": {weekly_goal},
            "diet_type": "weight_loss"
        }}"#
    )
}

async fn post_preview(body: String) -> StatusCode {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/targets/preview")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
    .status()
}

#[tokio::test]
async fn test_preview_rejects_zero_weight() {
    let status = post_preview(preview_body(0.0, 0.5, "1996-03-10")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_rejects_off_preset_goal() {
    let status = post_preview(preview_body(80.0, 0.6, "1996-03-10")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_rejects_malformed_dob() {
    let status = post_preview(preview_body(80.0, 0.5, "10/03/1996")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_meals_rejects_invalid_day() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/meals?day=yesterday")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_food_name_too_long() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let long_name = "a".repeat(101); // 101 characters

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(&format!("/api/foods/{}", long_name))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"calories": 100.0, "protein_g": 1.0, "carbs_g": 1.0, "fat_g": 1.0}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_food_rejects_negative_macros() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/foods/oats")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"calories": -100.0, "protein_g": 1.0, "carbs_g": 1.0, "fat_g": 1.0}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weight_rejects_invalid_cursor() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/weight?cursor=not-a-cursor!!")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_rejects_empty_query() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate/recipe")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"query": "   "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
