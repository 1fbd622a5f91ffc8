//! Typed errors for the verification pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Only claim-extraction failures and cancellation ever leave
//! [`Pipeline::verify`](crate::Pipeline::verify). Search, extraction and
//! judgment failures are absorbed inside their stage.

use thiserror::Error;

/// Errors that can occur during verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Text generation service unavailable or failed
    #[error("generation failed: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Text generation returned nothing usable
    #[error("generation returned empty text")]
    EmptyGeneration,

    /// Search service failed (degraded to "no sources" by the researcher)
    #[error("search failed: {0}")]
    Search(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Content extraction failed for a single URL
    #[error("extraction failed for {url}: {reason}")]
    Extraction { url: String, reason: String },

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl VerifyError {
    /// Build a generation error from any displayable message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into().into())
    }

    /// Build a search error from any displayable message.
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search(message.into().into())
    }

    /// Build an extraction error for a URL.
    pub fn extraction(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts a pipeline run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Generation(_) | Self::EmptyGeneration | Self::Cancelled
        )
    }
}

/// Result type alias for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;
