// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Auth cookie attribute tests.
//!
//! These tests verify the session cookie removal attributes on logout match
//! the creation attributes for localhost and production-style frontends.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use tower::ServiceExt;

mod common;

fn session_cookie_header(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .find(|value| value.starts_with("macro_token="))
        .expect("missing Set-Cookie header for macro_token")
}

#[tokio::test]
async fn test_logout_cookie_removal_localhost_attributes() {
    let (app, _) = common::create_test_app_with_frontend_url("http://localhost:5173");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, "macro_token=test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookie = session_cookie_header(&response);
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_logout_cookie_removal_production_attributes() {
    let (app, _) = common::create_test_app_with_frontend_url("https://macro-tracker.example.com");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, "macro_token=test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookie = session_cookie_header(&response);
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("Secure"));
}
