//! Serper-backed web searcher (Google results).
//!
//! Only organic results carrying a `link` are kept. Missing titles and
//! snippets become empty strings and a missing date becomes
//! [`UNKNOWN_DATE`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Result, VerifyError};
use crate::security::ServiceCredentials;
use crate::traits::searcher::{SearchResult, WebSearcher, UNKNOWN_DATE};

/// Default search endpoint.
pub const SERPER_ENDPOINT: &str = "https://google.serper.dev/search";

/// Serper search client.
#[derive(Clone)]
pub struct SerperSearcher {
    client: Client,
    credentials: ServiceCredentials,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    link: Option<String>,
    title: Option<String>,
    snippet: Option<String>,
    date: Option<String>,
}

impl SerperSearcher {
    /// Create a new searcher against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_credentials(ServiceCredentials::new(api_key, SERPER_ENDPOINT))
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

    /// Create from environment variable `SERPER_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SERPER_API_KEY")
            .map_err(|_| VerifyError::Config("SERPER_API_KEY not set".into()))?;
        Self::new(api_key)
    }
}

/// Convert Serper's organic results, preserving order.
fn to_search_results(response: SearchResponse, limit: usize) -> Vec<SearchResult> {
    response
        .organic
        .into_iter()
        .filter_map(|r| {
            let link = r.link?;
            let mut result = match Url::parse(&link) {
                Ok(url) => SearchResult::new(url),
                // Keep the metadata; the researcher uses it as a snippet
                Err(_) => SearchResult::without_link(),
            };
            result = result
                .with_title(r.title.unwrap_or_default())
                .with_snippet(r.snippet.unwrap_or_default())
                .with_published_date(r.date.unwrap_or_else(|| UNKNOWN_DATE.to_string()));
            Some(result)
        })
        .take(limit)
        .collect()
}

#[async_trait]
impl WebSearcher for SerperSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let request = SearchRequest { q: query, num: limit };

        let response = self
            .client
            .post(&self.credentials.endpoint)
            .header("X-API-KEY", self.credentials.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| VerifyError::Search(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(VerifyError::search(format!(
                "Serper API error: {} - {}",
                status, text
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::Search(Box::new(e)))?;

        let results = to_search_results(body, limit);
        debug!(query = %query, results = results.len(), "Serper search complete");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_results_keep_order_and_defaults() {
        let response = parse(
            r#"{"organic": [
                {"link": "https://www.snopes.com/fact-check/ohio-aliens/", "title": "Snopes", "snippet": "False.", "date": "Oct 18, 2026"},
                {"link": "https://apnews.com/x", "title": "AP"},
                {"title": "No link at all"}
            ]}"#,
        );

        let results = to_search_results(response, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Snopes");
        assert_eq!(results[0].published_date, "Oct 18, 2026");
        assert_eq!(results[1].snippet, "");
        assert_eq!(results[1].published_date, UNKNOWN_DATE);
    }

    #[test]
    fn test_results_truncated_to_limit() {
        let response = parse(
            r#"{"organic": [{"link": "https://a.com"}, {"link": "https://b.com"}, {"link": "https://c.com"}]}"#,
        );
        assert_eq!(to_search_results(response, 2).len(), 2);
    }

    #[test]
    fn test_unparseable_link_keeps_metadata() {
        let response = parse(r#"{"organic": [{"link": "::::", "title": "Odd", "snippet": "s"}]}"#);
        let results = to_search_results(response, 3);
        assert_eq!(results.len(), 1);
        assert!(results[0].link.is_none());
        assert_eq!(results[0].title, "Odd");
    }

    #[test]
    fn test_missing_organic_is_empty() {
        assert!(to_search_results(parse(r#"{"searchParameters": {}}"#), 3).is_empty());
    }

    #[test]
    fn test_request_shape() {
        let json = serde_json::to_value(SearchRequest { q: "ohio aliens", num: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"q": "ohio aliens", "num": 3}));
    }
}
