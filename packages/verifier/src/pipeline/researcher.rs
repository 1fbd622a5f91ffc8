//! Source aggregation: search query in, evidence document out.
//!
//! One search call, then one extraction per result, all in flight at
//! once and joined before anything is merged. A source whose extraction
//! fails, comes back empty, or times out is kept as snippet-only evidence
//! built from its search metadata.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::traits::{
    extractor::ContentExtractor,
    searcher::{SearchResult, WebSearcher},
};
use crate::types::{
    config::PipelineConfig,
    evidence::{EvidenceDocument, EvidenceItem},
};

/// Gathers evidence for a query. Never fails outward.
pub struct Researcher<S, E> {
    searcher: S,
    extractor: E,
    config: PipelineConfig,
}

impl<S: WebSearcher, E: ContentExtractor> Researcher<S, E> {
    pub fn new(searcher: S, extractor: E, config: PipelineConfig) -> Self {
        Self {
            searcher,
            extractor,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build the evidence document for `query`.
    ///
    /// `document.count()` is the number of sources checked. It equals the
    /// number of search results except for results with neither a link nor
    /// any title/snippet, which are dropped.
    pub async fn research(&self, query: &str) -> EvidenceDocument {
        let limit = self.config.search_limit;

        let mut results = match self.searcher.search(query, limit).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Search unavailable, continuing without sources");
                Vec::new()
            }
        };
        results.truncate(limit);

        if results.is_empty() {
            info!(query = %query, "No sources found");
            return EvidenceDocument::no_sources();
        }

        // Each future owns one slot; join_all keeps input order.
        let slots: Vec<Option<EvidenceItem>> = join_all(
            results
                .iter()
                .enumerate()
                .map(|(index, result)| self.gather(index, result)),
        )
        .await;

        let items: Vec<EvidenceItem> = slots.into_iter().flatten().collect();
        let snippet_only = items.iter().filter(|i| i.is_snippet_only()).count();

        info!(
            results = results.len(),
            sources_checked = items.len(),
            snippet_only,
            "Research complete"
        );

        EvidenceDocument::from_items(items)
    }

    /// Produce the evidence slot for one search result.
    async fn gather(&self, index: usize, result: &SearchResult) -> Option<EvidenceItem> {
        let Some(url) = &result.link else {
            if result.has_usable_metadata() {
                debug!(index, "Result has no link, using snippet");
                return Some(EvidenceItem::snippet_only(result));
            }
            debug!(index, "Result has no link and no metadata, skipping");
            return None;
        };

        let attempt = tokio::time::timeout(
            self.config.extraction_timeout,
            self.extractor.extract(url),
        )
        .await;

        let item = match attempt {
            Ok(Ok(Some(content))) if !content.trim().is_empty() => {
                debug!(index, url = %url, chars = content.len(), "Extracted content");
                EvidenceItem::full_content(result, &content, self.config.max_content_per_source)
            }
            Ok(Ok(_)) => {
                warn!(index, url = %url, extractor = self.extractor.name(), "No content extracted, using snippet");
                EvidenceItem::snippet_only(result)
            }
            Ok(Err(e)) => {
                warn!(index, url = %url, error = %e, "Extraction failed, using snippet");
                EvidenceItem::snippet_only(result)
            }
            Err(_) => {
                warn!(
                    index,
                    url = %url,
                    timeout_secs = self.config.extraction_timeout.as_secs(),
                    "Extraction timed out, using snippet"
                );
                EvidenceItem::snippet_only(result)
            }
        };

        Some(item)
    }
}
