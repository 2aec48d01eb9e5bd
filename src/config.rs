//! Application configuration loaded from environment variables.
//!
//! Secrets (JWT signing key, LLM API key) are injected as environment
//! variables by the deployment platform and read once at startup.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL for CORS and cookie scoping
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Base URL of the OpenAI-compatible LLM endpoint
    pub llm_base_url: String,
    /// Model name passed to the LLM endpoint
    pub llm_model: String,
    /// Expected audience of identity-provider ID tokens
    pub identity_audience: String,

    // --- Secrets (injected as env vars by the platform) ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// API key for the LLM endpoint
    pub llm_api_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            identity_audience: env::var("IDENTITY_AUDIENCE")
                .map_err(|_| ConfigError::Missing("IDENTITY_AUDIENCE"))?,

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            llm_api_key: env::var("LLM_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("LLM_API_KEY"))?,
        })
    }

    /// Config for tests only. Does not read the environment.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            llm_base_url: "http://localhost:9999/v1".to_string(),
            llm_model: "test-model".to_string(),
            identity_audience: "test-audience".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            llm_api_key: "test_llm_key".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("IDENTITY_AUDIENCE", "test-aud");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("LLM_API_KEY", "test_key");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.identity_audience, "test-aud");
        assert_eq!(config.llm_api_key, "test_key");
        assert_eq!(config.port, 8080);
    }
}
