// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! LLM API client for recipe generation.
//!
//! Handles:
//! - "Generate recipe" and "healthy alternative" completions
//! - Prompt formatting for both operations
//! - Fail-closed validation of the reply JSON (a malformed reply surfaces
//!   as a structured error, never as a trusted-shape parse)
//! - Rate limit detection

use crate::config::Config;
use crate::error::AppError;
use crate::models::{MacroTargets, MacroTotals};
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are a nutritionist assistant. Reply with a single JSON object \
     and no surrounding prose. The object must have the keys: name (string), \
     description (string), servings (integer), ingredients (array of \
     {name, amount}), instructions (array of strings), and macronutrients \
     ({per_serving: {calories, protein_g, carbs_g, fat_g, fiber_g}}).";

/// LLM API client speaking the OpenAI-compatible chat completions protocol.
#[derive(Clone)]
pub struct LlmService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Recipe object produced by the LLM, validated before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub servings: u32,
    pub ingredients: Vec<GeneratedIngredient>,
    pub instructions: Vec<String>,
    pub macronutrients: GeneratedMacros,
}

/// One ingredient line in a generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedIngredient {
    pub name: String,
    /// Free-form amount ("200 g", "1 tbsp")
    pub amount: String,
}

/// Macro block of a generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMacros {
    pub per_serving: MacroTotals,
}

// ─── Wire types (OpenAI-compatible) ──────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl LlmService {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.llm_base_url.clone(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
        }
    }

    /// Generate a recipe for a free-text query.
    pub async fn generate_recipe(&self, query: &str) -> Result<GeneratedRecipe, AppError> {
        let prompt = format!("Create a recipe for: {query}");
        let content = self.complete(&prompt).await?;
        parse_generated_recipe(&content)
    }

    /// Generate a healthier alternative to a dish, steered by the user's
    /// daily macro targets.
    pub async fn generate_alternative(
        &self,
        search_query: &str,
        user_goals: &MacroTargets,
    ) -> Result<GeneratedRecipe, AppError> {
        let prompt = format!(
            "Suggest a healthier alternative recipe for: {search_query}. \
             The user's daily targets are {} kcal, {} g protein, {} g carbs, \
             {} g fat; keep a single serving roughly proportionate.",
            user_goals.calories, user_goals.protein_g, user_goals.carbs_g, user_goals.fat_g
        );
        let content = self.complete(&prompt).await?;
        parse_generated_recipe(&content)
    }

    /// Run one chat completion and return the reply text.
    async fn complete(&self, user_prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: 0.7,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmApi(e.to_string()))?;

        let reply: ChatResponse = self.check_response_json(response).await?;
        reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::MalformedLlmReply("reply contained no choices".to_string()))
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("LLM rate limit hit (429)");
                return Err(AppError::LlmApi(AppError::LLM_RATE_LIMIT.to_string()));
            }

            return Err(AppError::LlmApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LlmApi(format!("Invalid completion envelope: {}", e)))
    }
}

/// Parse and validate a generated recipe from the reply text.
///
/// Providers sometimes wrap JSON in markdown code fences despite the system
/// prompt; those are stripped before parsing. Any shape problem fails closed
/// with [`AppError::MalformedLlmReply`].
pub fn parse_generated_recipe(content: &str) -> Result<GeneratedRecipe, AppError> {
    let stripped = strip_code_fence(content);

    let recipe: GeneratedRecipe = serde_json::from_str(stripped)
        .map_err(|e| AppError::MalformedLlmReply(format!("not a recipe object: {}", e)))?;

    validate_recipe(&recipe)?;
    Ok(recipe)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag ("json") up to the first newline
    let body = rest.split_once('\n').map_or(rest, |(_, b)| b);
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn validate_recipe(recipe: &GeneratedRecipe) -> Result<(), AppError> {
    if recipe.name.trim().is_empty() {
        return Err(AppError::MalformedLlmReply("empty recipe name".to_string()));
    }
    if recipe.ingredients.is_empty() {
        return Err(AppError::MalformedLlmReply(
            "recipe has no ingredients".to_string(),
        ));
    }
    if recipe.servings == 0 {
        return Err(AppError::MalformedLlmReply("zero servings".to_string()));
    }

    let m = &recipe.macronutrients.per_serving;
    let values = [m.calories, m.protein_g, m.carbs_g, m.fat_g, m.fiber_g];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(AppError::MalformedLlmReply(
            "negative or non-finite macro values".to_string(),
        ));
    }

    Ok(())
}
