// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! HTTP middleware.

pub mod auth;
pub mod security;
