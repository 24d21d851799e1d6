//! Access token acquisition from the Cognitive Services token endpoint

use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::client::{parse_endpoint, read_error_body};
use crate::core::errors::{Result, TranslationError};

/// Exchanges a subscription key for a short-lived bearer token
#[derive(Debug, Clone)]
pub struct TokenProvider {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
    user_agent: String,
}

impl TokenProvider {
    /// Create a provider bound to the given token endpoint
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        timeout: Duration,
        user_agent: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: parse_endpoint(endpoint)?,
            timeout,
            user_agent: user_agent.into(),
        })
    }

    /// Fetch a fresh token. The response body is returned verbatim.
    pub async fn fetch_token(&self, subscription_key: &str) -> Result<String> {
        debug!("Fetching access token from {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("Subscription-Key", subscription_key)])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .body(String::new())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let error = read_error_body(response).await?;
            warn!("Token request rejected: {} - {}", status, error.message);
            return Err(TranslationError::AuthError {
                status: status.as_u16(),
                message: error.message,
            });
        }

        Ok(response.text().await?)
    }
}
