use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use verifier::{
    ai::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL},
    extractors::YELLOWCAKE_ENDPOINT,
    searchers::SERPER_ENDPOINT,
    PipelineConfig, SecretString, ServiceCredentials,
};

pub const DEFAULT_APP_NAME: &str = "Agentic Fake News Detector";
pub const DEFAULT_PORT: u16 = 8000;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub app_name: String,
    pub gemini_api_key: Option<SecretString>,
    pub serper_api_key: Option<SecretString>,
    pub yellowcake_api_key: Option<SecretString>,
    pub gemini_model: String,
    pub serper_endpoint: String,
    pub yellowcake_endpoint: String,
    pub max_content_per_source: usize,
    pub search_results_limit: usize,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Missing API keys are allowed; they are reported by `/health` and the
    /// corresponding client fails at request time.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = PipelineConfig::default();
        let secret = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(SecretString::from)
        };

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            app_name: lookup("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            gemini_api_key: secret("GEMINI_API_KEY"),
            serper_api_key: secret("SERPER_API_KEY"),
            yellowcake_api_key: secret("YELLOWCAKE_API_KEY"),
            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
            serper_endpoint: lookup("SERPER_ENDPOINT")
                .unwrap_or_else(|| SERPER_ENDPOINT.to_string()),
            yellowcake_endpoint: lookup("YELLOWCAKE_ENDPOINT")
                .unwrap_or_else(|| YELLOWCAKE_ENDPOINT.to_string()),
            max_content_per_source: parse_or(
                &lookup,
                "MAX_CONTENT_PER_SOURCE",
                defaults.max_content_per_source,
            )?,
            search_results_limit: parse_or(&lookup, "SEARCH_RESULTS_LIMIT", defaults.search_limit)?,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.extraction_timeout.as_secs(),
            )?),
        })
    }

    /// Pipeline tuning derived from this configuration.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_search_limit(self.search_results_limit)
            .with_max_content_per_source(self.max_content_per_source)
            .with_extraction_timeout(self.request_timeout)
    }

    pub fn gemini_credentials(&self) -> ServiceCredentials {
        self.credentials(&self.gemini_api_key, GEMINI_BASE_URL)
    }

    pub fn serper_credentials(&self) -> ServiceCredentials {
        self.credentials(&self.serper_api_key, &self.serper_endpoint)
    }

    pub fn yellowcake_credentials(&self) -> ServiceCredentials {
        self.credentials(&self.yellowcake_api_key, &self.yellowcake_endpoint)
    }

    /// A missing key yields credentials with an empty key, which report
    /// themselves as not configured.
    fn credentials(&self, key: &Option<SecretString>, endpoint: &str) -> ServiceCredentials {
        let key = key.as_ref().map(|k| k.expose().to_string()).unwrap_or_default();
        ServiceCredentials::new(key, endpoint).with_timeout(self.request_timeout)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.app_name, "Agentic Fake News Detector");
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.serper_endpoint, "https://google.serper.dev/search");
        assert_eq!(config.search_results_limit, 3);
        assert_eq!(config.max_content_per_source, 2000);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "9000"),
            ("GEMINI_API_KEY", "g-key"),
            ("SEARCH_RESULTS_LIMIT", "5"),
            ("REQUEST_TIMEOUT_SECS", "30"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.gemini_api_key.as_ref().unwrap().expose(), "g-key");

        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.search_limit, 5);
        assert_eq!(pipeline.max_content_per_source, 2000);
        assert_eq!(pipeline.extraction_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let config = config(&[("SERPER_API_KEY", "  ")]).unwrap();
        assert!(config.serper_api_key.is_none());
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT must be a valid number"));
    }

    #[test]
    fn test_credentials_follow_config() {
        let config = config(&[
            ("SERPER_API_KEY", "s-key"),
            ("SERPER_ENDPOINT", "http://localhost:9999/search"),
            ("REQUEST_TIMEOUT_SECS", "7"),
        ])
        .unwrap();

        let serper = config.serper_credentials();
        assert!(serper.is_configured());
        assert_eq!(serper.endpoint, "http://localhost:9999/search");
        assert_eq!(serper.timeout, Duration::from_secs(7));

        assert!(!config.gemini_credentials().is_configured());
        assert!(!config.yellowcake_credentials().is_configured());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = config(&[("YELLOWCAKE_API_KEY", "super-secret")]).unwrap();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
