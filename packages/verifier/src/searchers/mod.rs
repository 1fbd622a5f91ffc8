//! Web searcher implementations.
//!
//! - `SerperSearcher` - Serper (Google) search API
//! - `MockSearcher` - For testing (see [`crate::testing`])

mod serper;

pub use serper::{SerperSearcher, SERPER_ENDPOINT};

// Re-export from traits for convenience
pub use crate::traits::searcher::{SearchResult, WebSearcher};
