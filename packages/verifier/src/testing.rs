//! Testing utilities including mock implementations.
//!
//! Deterministic fakes for the three collaborators so the pipeline can be
//! exercised without network calls. Every mock is `Clone` and shares its
//! state between clones, so a test can hand one copy to the pipeline and
//! keep another for assertions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use url::Url;

use crate::error::{Result, VerifyError};
use crate::traits::{
    extractor::ContentExtractor,
    generator::TextGenerator,
    searcher::{SearchResult, WebSearcher},
};

// =============================================================================
// MockGenerator
// =============================================================================

/// A mock text generator.
///
/// Responses are chosen by the first registered substring found in the
/// prompt, falling back to a default response.
#[derive(Clone, Default)]
pub struct MockGenerator {
    responses: Arc<RwLock<Vec<(String, String)>>>,
    default_response: Arc<RwLock<Option<String>>>,
    failure: Arc<RwLock<Option<String>>>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `response` whenever the prompt contains `needle`.
    pub fn with_response(self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((needle.into(), response.into()));
        self
    }

    /// Answer `response` when no registered needle matches.
    pub fn with_default(self, response: impl Into<String>) -> Self {
        *self.default_response.write().unwrap() = Some(response.into());
        self
    }

    /// Fail every call with a generation error.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// All prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(VerifyError::generation(message));
        }

        let matched = self
            .responses
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, response)| response.clone());

        matched
            .or_else(|| self.default_response.read().unwrap().clone())
            .ok_or_else(|| VerifyError::generation("no mock response configured"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// =============================================================================
// MockSearcher
// =============================================================================

/// A mock web searcher returning canned results per query.
///
/// Unknown queries return an empty list.
#[derive(Clone, Default)]
pub struct MockSearcher {
    results: Arc<RwLock<HashMap<String, Vec<SearchResult>>>>,
    failure: Arc<RwLock<Option<String>>>,
    calls: Arc<RwLock<Vec<(String, usize)>>>,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for a query.
    pub fn with_results(self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        self.results.write().unwrap().insert(query.into(), results);
        self
    }

    /// Add URL strings as results for a query.
    pub fn with_links(self, query: impl Into<String>, links: &[&str]) -> Self {
        let results = links
            .iter()
            .filter_map(|l| SearchResult::from_link(l))
            .collect();
        self.with_results(query, results)
    }

    /// Fail every search with a transport-style error.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// `(query, limit)` pairs received, in call order.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        self.calls
            .write()
            .unwrap()
            .push((query.to_string(), limit));

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(VerifyError::search(message));
        }

        let mut results = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        results.truncate(limit);
        Ok(results)
    }
}

// =============================================================================
// MockExtractor
// =============================================================================

#[derive(Clone)]
enum Canned {
    Content(String),
    Failure(String),
}

/// A mock content extractor keyed by URL.
///
/// Unknown URLs extract to `None`. Delays use `tokio::time::sleep`, so
/// tests can run them under a paused clock.
#[derive(Clone, Default)]
pub struct MockExtractor {
    pages: Arc<RwLock<HashMap<String, Canned>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract `content` for `url` (as normalized by `Url`).
    pub fn with_content(self, url: impl Into<String>, content: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.into(), Canned::Content(content.into()));
        self
    }

    /// Fail extraction for `url`.
    pub fn with_failure(self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.into(), Canned::Failure(reason.into()));
        self
    }

    /// Sleep before answering for `url`.
    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(url.into(), delay);
        self
    }

    /// URLs requested, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract(&self, url: &Url) -> Result<Option<String>> {
        let key = url.as_str().to_string();
        self.calls.write().unwrap().push(key.clone());

        let delay = self.delays.read().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let canned = self.pages.read().unwrap().get(&key).cloned();
        match canned {
            Some(Canned::Content(content)) => Ok(Some(content)),
            Some(Canned::Failure(reason)) => Err(VerifyError::extraction(key, reason)),
            None => Ok(None),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
