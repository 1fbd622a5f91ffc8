//! Content extractor implementations.
//!
//! - `YellowcakeExtractor` - Yellowcake extraction API
//! - `MockExtractor` - For testing (see [`crate::testing`])

mod yellowcake;

pub use yellowcake::{YellowcakeExtractor, YELLOWCAKE_ENDPOINT};

// Re-export from traits for convenience
pub use crate::traits::extractor::ContentExtractor;
