//! Caller-facing translator: one token fetch plus one translation request per call

use std::sync::Arc;
use tracing::debug;

use crate::core::client::TranslationClient;
use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::TranslationResult;
use crate::core::token_provider::TokenProvider;

/// Translator bound to a subscription key
#[derive(Debug, Clone)]
pub struct Translator {
    config: Arc<TranslatorConfig>,
    tokens: TokenProvider,
    single: TranslationClient,
    array: TranslationClient,
}

impl Translator {
    /// Create a new translator with its own HTTP transport
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TranslationError::config(format!("failed to build HTTP client: {}", e)))?;

        Self::with_http_client(config, client)
    }

    /// Create a translator on top of a caller-supplied transport
    pub fn with_http_client(config: TranslatorConfig, client: reqwest::Client) -> Result<Self> {
        config.validate()?;

        let timeout = config.timeout();
        let tokens = TokenProvider::new(
            client.clone(),
            &config.token_endpoint,
            timeout,
            config.user_agent.clone(),
        )?;
        let single = TranslationClient::new(
            client.clone(),
            &config.translate_endpoint,
            timeout,
            config.user_agent.clone(),
        )?;
        let array = TranslationClient::new(
            client,
            &config.translate_array_endpoint,
            timeout,
            config.user_agent.clone(),
        )?;

        Ok(Self {
            config: Arc::new(config),
            tokens,
            single,
            array,
        })
    }

    /// Create with default endpoints for a subscription key
    pub fn with_subscription_key(subscription_key: impl Into<String>) -> Result<Self> {
        Self::new(TranslatorConfig::with_subscription_key(subscription_key))
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        Self::new(TranslatorConfig::from_env()?)
    }

    /// Active configuration
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate a single text
    pub async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String> {
        let token = self.tokens.fetch_token(&self.config.subscription_key).await?;
        self.single.translate_one(&token, text, from, to).await
    }

    /// Translate an ordered batch, returning only the translated texts
    pub async fn translate_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        from: &str,
        to: &str,
    ) -> Result<Vec<String>> {
        Ok(self
            .translate_batch_detailed(texts, from, to)
            .await?
            .into_iter()
            .map(|result| result.translation)
            .collect())
    }

    /// Translate an ordered batch, keeping the source language of each record
    pub async fn translate_batch_detailed<S: AsRef<str>>(
        &self,
        texts: &[S],
        from: &str,
        to: &str,
    ) -> Result<Vec<TranslationResult>> {
        if texts.is_empty() {
            debug!("Empty batch, skipping request");
            return Ok(Vec::new());
        }

        let token = self.tokens.fetch_token(&self.config.subscription_key).await?;
        self.array.translate_many_detailed(&token, texts, from, to).await
    }
}
