//! Yellowcake-backed content extractor.
//!
//! Posts a URL to the extraction API and reads the page text from the
//! first present of `content`, `text` or `body`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Result, VerifyError};
use crate::security::ServiceCredentials;
use crate::traits::extractor::ContentExtractor;

/// Default extraction endpoint.
pub const YELLOWCAKE_ENDPOINT: &str = "https://api.yellowcake.ai/v1/extract";

/// Yellowcake extraction client.
#[derive(Clone)]
pub struct YellowcakeExtractor {
    client: Client,
    credentials: ServiceCredentials,
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    url: &'a str,
    extract_content: bool,
}

#[derive(Deserialize)]
struct ExtractResponse {
    content: Option<String>,
    text: Option<String>,
    body: Option<String>,
}

impl ExtractResponse {
    fn into_content(self) -> Option<String> {
        [self.content, self.text, self.body]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

impl YellowcakeExtractor {
    /// Create a new extractor against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_credentials(ServiceCredentials::new(api_key, YELLOWCAKE_ENDPOINT))
    }

    /// Create from explicit credentials (custom endpoint or timeout).
    pub fn with_credentials(credentials: ServiceCredentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(credentials.timeout)
            .build()
            .map_err(|e| VerifyError::Config(Box::new(e)))?;

        Ok(Self {
            client,
            credentials,
        })
    }

    /// Create from environment variable `YELLOWCAKE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("YELLOWCAKE_API_KEY")
            .map_err(|_| VerifyError::Config("YELLOWCAKE_API_KEY not set".into()))?;
        Self::new(api_key)
    }
}

#[async_trait]
impl ContentExtractor for YellowcakeExtractor {
    async fn extract(&self, url: &Url) -> Result<Option<String>> {
        let request = ExtractRequest {
            url: url.as_str(),
            extract_content: true,
        };

        let response = self
            .client
            .post(&self.credentials.endpoint)
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.api_key.expose()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| VerifyError::extraction(url.as_str(), e.to_string()))?;

        if !response.status().is_success() {
            return Err(VerifyError::extraction(
                url.as_str(),
                format!("Yellowcake API error: {}", response.status()),
            ));
        }

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::extraction(url.as_str(), e.to_string()))?;

        let content = body.into_content();
        debug!(url = %url, found = content.is_some(), "Yellowcake extraction complete");
        Ok(content)
    }

    fn name(&self) -> &str {
        "yellowcake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_field_precedence() {
        let body: ExtractResponse =
            serde_json::from_str(r#"{"text": "from text", "body": "from body"}"#).unwrap();
        assert_eq!(body.into_content().as_deref(), Some("from text"));

        let body: ExtractResponse =
            serde_json::from_str(r#"{"content": "main", "text": "t"}"#).unwrap();
        assert_eq!(body.into_content().as_deref(), Some("main"));
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let body: ExtractResponse =
            serde_json::from_str(r#"{"content": "", "body": "fallback"}"#).unwrap();
        assert_eq!(body.into_content().as_deref(), Some("fallback"));
    }

    #[test]
    fn test_no_content_is_none() {
        let body: ExtractResponse = serde_json::from_str(r#"{"status": "blocked"}"#).unwrap();
        assert!(body.into_content().is_none());
    }

    #[test]
    fn test_request_shape() {
        let json = serde_json::to_value(ExtractRequest {
            url: "https://a.com/",
            extract_content: true,
        })
        .unwrap();
        assert_eq!(json["url"], "https://a.com/");
        assert_eq!(json["extract_content"], true);
    }
}
