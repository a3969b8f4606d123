//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini Developer API key (not a Vertex AI key)
    pub gemini_api_key: String,
    /// PayPal REST client ID
    pub paypal_client_id: String,
    /// PayPal REST client secret
    pub paypal_client_secret: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            paypal_client_id: env::var("PAYPAL_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("PAYPAL_CLIENT_ID"))?,
            paypal_client_secret: env::var("PAYPAL_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("PAYPAL_CLIENT_SECRET"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
        })
    }

    /// Fixed config for tests only.
    pub fn test_default() -> Self {
        Self {
            gemini_api_key: "test_gemini_key".to_string(),
            paypal_client_id: "test_paypal_id".to_string(),
            paypal_client_secret: "test_paypal_secret".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 5000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
