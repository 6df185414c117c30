use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::error::AttemptError;
use super::provider::Provider;

/// Response fields that may carry the translated text, in preference order.
const TRANSLATED_TEXT_FIELDS: &[&str] = &["translation", "translated_text", "output"];

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A transport able to ask one provider to translate one line.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Makes exactly one request. No retries happen at this level.
    async fn attempt(
        &self,
        provider: &Provider,
        line: &str,
        source: &str,
        target: &str,
    ) -> Result<String, AttemptError>;
}

/// JSON-over-HTTP backend shared by every configured provider.
pub struct HttpBackend {
    client: Client,
}

impl HttpBackend {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    fn request(
        &self,
        provider: &Provider,
        line: &str,
        source: &str,
        target: &str,
    ) -> reqwest::RequestBuilder {
        let payload = provider.build_payload(line, source, target);
        let mut http_request = self.client.post(&provider.endpoint).json(&payload);

        if let Some(api_key) = &provider.api_key {
            http_request = match &provider.api_key_header {
                Some(header) => http_request.header(header.as_str(), api_key.as_str()),
                None => http_request.header("Authorization", format!("Bearer {api_key}")),
            };
        }

        http_request
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn attempt(
        &self,
        provider: &Provider,
        line: &str,
        source: &str,
        target: &str,
    ) -> Result<String, AttemptError> {
        let response = self
            .request(provider, line, source, target)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::Rejected { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AttemptError::Malformed(format!("invalid JSON body: {e}")))?;

        extract_translation(&body).ok_or_else(|| {
            AttemptError::Malformed(format!(
                "none of {} present",
                TRANSLATED_TEXT_FIELDS.join(", ")
            ))
        })
    }
}

/// Picks the translated text out of a response body.
///
/// Empty strings count as missing.
pub fn extract_translation(body: &Value) -> Option<String> {
    TRANSLATED_TEXT_FIELDS
        .iter()
        .filter_map(|field| body.get(field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
