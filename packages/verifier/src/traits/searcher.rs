//! Web searcher trait for gathering candidate sources.
//!
//! The researcher asks the searcher for a bounded, relevance-ordered list
//! of results. The order is preserved all the way into the evidence
//! document but is not otherwise interpreted.

use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

use crate::error::Result;

/// Placeholder used when a search provider reports no publication date.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// A candidate source with its search metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Link to the page. `None` when the provider's link did not parse.
    pub link: Option<Url>,

    /// Title of the page (empty if the provider had none).
    pub title: String,

    /// Snippet/description from search results.
    pub snippet: String,

    /// Publication date as reported by the provider.
    pub published_date: String,
}

impl SearchResult {
    /// Create a result pointing at a URL.
    pub fn new(link: Url) -> Self {
        Self {
            link: Some(link),
            title: String::new(),
            snippet: String::new(),
            published_date: UNKNOWN_DATE.to_string(),
        }
    }

    /// Create a result that has metadata but no usable link.
    pub fn without_link() -> Self {
        Self {
            link: None,
            title: String::new(),
            snippet: String::new(),
            published_date: UNKNOWN_DATE.to_string(),
        }
    }

    /// Create from a URL string.
    pub fn from_link(link: &str) -> Option<Self> {
        Url::parse(link).ok().map(Self::new)
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Set the publication date.
    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.published_date = date.into();
        self
    }

    pub fn link_str(&self) -> Option<String> {
        self.link.as_ref().map(|u| u.to_string())
    }

    /// Whether a snippet fallback can say anything about this source.
    pub fn has_usable_metadata(&self) -> bool {
        self.link.is_some() || !self.title.trim().is_empty() || !self.snippet.trim().is_empty()
    }
}

/// Web search abstraction.
///
/// # Implementations
///
/// - `SerperSearcher` - Serper (Google) API
/// - `MockSearcher` - For testing
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Return at most `limit` results in relevance order.
    ///
    /// An empty list means nothing was found and is not an error.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;
}

#[async_trait]
impl<T: WebSearcher + ?Sized> WebSearcher for Arc<T> {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        (**self).search(query, limit).await
    }
}
