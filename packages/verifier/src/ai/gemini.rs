//! Gemini implementation of the text generation trait.
//!
//! Talks to the Generative Language REST API (`generateContent`) at
//! temperature 0 so repeated prompts give repeated answers.
//!
//! # Example
//!
//! ```rust,ignore
//! use verifier::ai::GeminiGenerator;
//!
//! let generator = GeminiGenerator::new("AIza...")?.with_model("gemini-1.5-pro");
//! let text = generator.generate("Say hello").await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, VerifyError};
use crate::security::ServiceCredentials;
use crate::traits::generator::TextGenerator;

/// Default API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

const TEMPERATURE: f32 = 0.0;

/// Gemini-backed text generator.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    credentials: ServiceCredentials,
    model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        Some(text)
    }
}

impl GeminiGenerator {
    /// Create a new generator with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_credentials(
            ServiceCredentials::new(api_key, GEMINI_BASE_URL),
            GEMINI_DEFAULT_MODEL,
        )
    }

    /// Create from explicit credentials and model.
    pub fn with_credentials(credentials: ServiceCredentials, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(credentials.timeout)
            .build()
            .map_err(|e| VerifyError::Config(Box::new(e)))?;

        Ok(Self {
            client,
            credentials,
            model: model.into(),
        })
    }

    /// Create from environment variable `GEMINI_API_KEY` (and optional `GEMINI_MODEL`).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| VerifyError::Config("GEMINI_API_KEY not set".into()))?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| GEMINI_DEFAULT_MODEL.to_string());
        Self::with_credentials(ServiceCredentials::new(api_key, GEMINI_BASE_URL), model)
    }

    /// Set the model (default: gemini-1.5-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.credentials.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.credentials.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| VerifyError::Generation(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(VerifyError::generation(format!(
                "Gemini API error: {} - {}",
                status, text
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::Generation(Box::new(e)))?;

        let text = body.text().unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(VerifyError::EmptyGeneration);
        }

        debug!(model = %self.model, chars = text.len(), "Gemini generation complete");
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
