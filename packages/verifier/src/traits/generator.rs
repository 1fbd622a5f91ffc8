//! Text generation trait for LLM operations.
//!
//! Both the reader and the judge talk to the model through this one
//! method. Implementations wrap a specific provider and are expected to run
//! at low temperature so identical prompts give identical answers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// Prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// Provider faults surface as [`VerifyError::Generation`](crate::VerifyError::Generation).
    /// The returned text may wrap JSON in markdown fences.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging.
    fn name(&self) -> &str {
        "generator"
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
