// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Macro-Tracker: diet and recipe tracking backend
//!
//! This crate provides the backend API for onboarding users with biometric
//! data, computing calorie/macro targets, logging meals, storing recipes,
//! tracking body weight, and generating recipes through an LLM provider.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{IdentityVerifier, LlmService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub llm: LlmService,
    pub identity_verifier: Arc<IdentityVerifier>,
}
