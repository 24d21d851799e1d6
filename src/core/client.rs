//! Translation client for the `/Translate` and `/TranslateArray` endpoints

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::errors::{Result, TranslationError};
use crate::core::models::{
    ArrayOfTranslateArrayResponse, ErrorResponse, TranslateArrayRequest, TranslateResponse,
    TranslationResult,
};

/// Client bound to a single translation endpoint
#[derive(Debug, Clone)]
pub struct TranslationClient {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
    user_agent: String,
}

impl TranslationClient {
    /// Create a client. Fails with `ConfigError` before any network call if
    /// `endpoint` is not an absolute http(s) URL.
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

    /// Endpoint this client talks to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Translate one string with a GET request
    pub async fn translate_one(
        &self,
        token: &str,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String> {
        debug!("Translating single text {} -> {} via {}", from, to, self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("text", text), ("from", from), ("to", to)])
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let decoded = TranslateResponse::from_xml(&body)?;

        Ok(decoded.translated_text)
    }

    /// Translate an ordered batch, returning the translated texts
    pub async fn translate_many<S: AsRef<str>>(
        &self,
        token: &str,
        texts: &[S],
        from: &str,
        to: &str,
    ) -> Result<Vec<String>> {
        Ok(self
            .translate_many_detailed(token, texts, from, to)
            .await?
            .into_iter()
            .map(|result| result.translation)
            .collect())
    }

    /// Translate an ordered batch with a POST of the XML envelope.
    ///
    /// Records are returned in the order the service sent them; the service is
    /// assumed to keep input order, which is not verified here.
    pub async fn translate_many_detailed<S: AsRef<str>>(
        &self,
        token: &str,
        texts: &[S],
        from: &str,
        to: &str,
    ) -> Result<Vec<TranslationResult>> {
        let body = TranslateArrayRequest::new(texts, from, to).to_xml()?;

        debug!(
            "Translating {} texts {} -> {} via {}",
            texts.len(),
            from,
            to,
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(USER_AGENT, &self.user_agent)
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .timeout(self.timeout)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let decoded = ArrayOfTranslateArrayResponse::from_xml(&body)?;

        if decoded.responses.len() != texts.len() {
            warn!(
                "Batch response has {} records for {} inputs",
                decoded.responses.len(),
                texts.len()
            );
        }

        Ok(decoded
            .responses
            .into_iter()
            .map(TranslationResult::from)
            .collect())
    }
}

/// Parse an endpoint, accepting only absolute http(s) URLs
pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| TranslationError::config(format!("invalid endpoint {:?}: {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(TranslationError::config(format!(
            "endpoint must be an absolute http(s) URL: {:?}",
            endpoint
        ))),
    }
}

/// Decode the JSON error body that accompanies a non-200 status
pub(crate) async fn read_error_body(response: reqwest::Response) -> Result<ErrorResponse> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Drain the body of a 200 response, or turn any other status into `RemoteError`
async fn read_success_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();

    if status != StatusCode::OK {
        let error = read_error_body(response).await?;
        warn!("Translation request failed: {} - {}", status, error.message);
        return Err(TranslationError::RemoteError {
            status: status.as_u16(),
            message: error.message,
        });
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(endpoint: &str) -> Result<TranslationClient> {
        TranslationClient::new(
            reqwest::Client::new(),
            endpoint,
            Duration::from_secs(2),
            "test-agent",
        )
    }

    #[test]
    fn test_client_creation() {
        let client = client_for("https://api.microsofttranslator.com/v2/http.svc/Translate").unwrap();
        assert_eq!(client.endpoint().path(), "/v2/http.svc/Translate");
    }

    #[test]
    fn test_empty_endpoint_is_config_error() {
        assert!(matches!(
            client_for(""),
            Err(TranslationError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_relative_endpoint_is_config_error() {
        assert!(matches!(
            client_for("/v2/http.svc/Translate"),
            Err(TranslationError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_non_http_endpoint_is_config_error() {
        assert!(matches!(
            client_for("mailto:translator@example.com"),
            Err(TranslationError::ConfigError { .. })
        ));
    }
}
