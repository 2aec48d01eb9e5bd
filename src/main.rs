// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Macro-Tracker API Server
//!
//! Backend for the diet and recipe tracking web app: computes calorie and
//! macro targets from biometrics, stores food items, recipes, meal logs and
//! weight entries, and proxies LLM recipe generation.

use macro_tracker::{
    config::Config,
    db::FirestoreDb,
    services::{IdentityVerifier, LlmService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Macro-Tracker API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize LLM client
    let llm = LlmService::new(&config);
    tracing::info!(model = %config.llm_model, "LLM client initialized");

    let identity_verifier = Arc::new(
        IdentityVerifier::new(&config.identity_audience)
            .expect("Failed to initialize ID-token verifier"),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        llm,
        identity_verifier,
    });

    // Build router
    let app = macro_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("macro_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
