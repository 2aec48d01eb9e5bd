// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Services module - business logic layer.

pub mod identity;
pub mod llm;
pub mod nutrition;

pub use identity::{IdentityError, IdentityVerifier, VerifiedIdentity};
pub use llm::{GeneratedRecipe, LlmService};
