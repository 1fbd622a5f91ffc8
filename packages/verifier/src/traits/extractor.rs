//! Content extractor trait for pulling page text from a URL.

use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

use crate::error::Result;

/// Fetches the main text of a page.
///
/// `Ok(None)` and `Err(_)` both mean "could not extract". Callers treat
/// either as a per-source condition, never as a reason to stop.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, url: &Url) -> Result<Option<String>>;

    /// Extractor name for logging.
    fn name(&self) -> &str {
        "extractor"
    }
}

#[async_trait]
impl<T: ContentExtractor + ?Sized> ContentExtractor for Arc<T> {
    async fn extract(&self, url: &Url) -> Result<Option<String>> {
        (**self).extract(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
