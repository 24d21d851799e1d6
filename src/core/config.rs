//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::core::errors::{Result, TranslationError};

/// Token issuance endpoint of Cognitive Services
pub const FETCH_TOKEN_URL: &str = "https://api.cognitive.microsoft.com/sts/v1.0/issueToken";

/// Text Translation API `/Translate` endpoint
pub const TRANSLATE_API_URL: &str = "https://api.microsofttranslator.com/v2/http.svc/Translate";

/// Text Translation API `/TranslateArray` endpoint
pub const TRANSLATE_ARRAY_API_URL: &str =
    "https://api.microsofttranslator.com/v2/http.svc/TranslateArray";

/// Request timeout applied to every outbound call
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub subscription_key: String,
    pub token_endpoint: String,
    pub translate_endpoint: String,
    pub translate_array_endpoint: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            subscription_key: std::env::var("SUBSCRIPTION_KEY").unwrap_or_default(),
            token_endpoint: FETCH_TOKEN_URL.to_string(),
            translate_endpoint: TRANSLATE_API_URL.to_string(),
            translate_array_endpoint: TRANSLATE_ARRAY_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: default_user_agent(),
        }
    }
}

/// Client identifier sent as `User-Agent` on every request
pub fn default_user_agent() -> String {
    format!("microsoft-translator-rs/{}", env!("CARGO_PKG_VERSION"))
}

impl TranslatorConfig {
    /// Configuration with default endpoints for the given subscription key
    pub fn with_subscription_key(subscription_key: impl Into<String>) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let subscription_key = std::env::var("SUBSCRIPTION_KEY").map_err(|_| {
            TranslationError::config("SUBSCRIPTION_KEY environment variable is required")
        })?;

        let token_endpoint = std::env::var("TRANSLATOR_TOKEN_ENDPOINT")
            .unwrap_or_else(|_| FETCH_TOKEN_URL.to_string());

        let translate_endpoint = std::env::var("TRANSLATOR_TRANSLATE_ENDPOINT")
            .unwrap_or_else(|_| TRANSLATE_API_URL.to_string());

        let translate_array_endpoint = std::env::var("TRANSLATOR_TRANSLATE_ARRAY_ENDPOINT")
            .unwrap_or_else(|_| TRANSLATE_ARRAY_API_URL.to_string());

        let timeout_ms = std::env::var("TRANSLATOR_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|e| TranslationError::config(format!("TRANSLATOR_TIMEOUT_MS: {}", e)))?;

        let user_agent =
            std::env::var("TRANSLATOR_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        let config = Self {
            subscription_key,
            token_endpoint,
            translate_endpoint,
            translate_array_endpoint,
            timeout_ms,
            user_agent,
        };

        info!("Loaded translator configuration from environment");
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslationError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            TranslationError::config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TranslationError::config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| {
            TranslationError::config(format!("failed to write {}: {}", path.display(), e))
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.subscription_key.is_empty() {
            return Err(TranslationError::config("subscription key is required"));
        }

        for (name, endpoint) in [
            ("token_endpoint", &self.token_endpoint),
            ("translate_endpoint", &self.translate_endpoint),
            ("translate_array_endpoint", &self.translate_array_endpoint),
        ] {
            if endpoint.is_empty() {
                return Err(TranslationError::config(format!("{} is required", name)));
            }
        }

        if self.timeout_ms == 0 {
            return Err(TranslationError::config("timeout_ms must be greater than 0"));
        }

        if self.user_agent.is_empty() {
            return Err(TranslationError::config("user_agent is required"));
        }

        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}
