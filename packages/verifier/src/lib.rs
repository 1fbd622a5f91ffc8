//! Article Verification Library
//!
//! Checks an article against the open web in three stages:
//!
//! 1. **Reader** - asks a language model for a fact-checking search query
//! 2. **Researcher** - searches, then extracts every result concurrently,
//!    falling back to search snippets when a page can't be extracted
//! 3. **Judge** - asks the model to compare article and evidence, and
//!    parses its answer into a bounded trust score and verdict
//!
//! Only the reader can fail a run. Search outages, unreachable pages and
//! malformed model output all degrade to a lower-confidence result.
//!
//! # Usage
//!
//! ```rust,ignore
//! use verifier::{Pipeline, PipelineConfig};
//! use verifier::testing::{MockExtractor, MockGenerator, MockSearcher};
//!
//! let pipeline = Pipeline::new(
//!     MockGenerator::new().with_default("..."),
//!     MockSearcher::new(),
//!     MockExtractor::new(),
//!     PipelineConfig::default(),
//! );
//!
//! let result = pipeline.verify("Aliens landed in Ohio yesterday").await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (TextGenerator, WebSearcher, ContentExtractor)
//! - [`types`] - Evidence, judgment and result types
//! - [`pipeline`] - Reader, Researcher, Judge and the Pipeline orchestrator
//! - [`ai`], [`searchers`], [`extractors`] - HTTP clients for Gemini, Serper, Yellowcake
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod extractors;
pub mod pipeline;
pub mod searchers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{Result, VerifyError};
pub use traits::{
    extractor::ContentExtractor,
    generator::TextGenerator,
    searcher::{SearchResult, WebSearcher, UNKNOWN_DATE},
};
pub use types::{
    config::PipelineConfig,
    evidence::{EvidenceDocument, EvidenceItem, EvidenceKind, NO_SOURCES_FOUND},
    judgment::{Judgment, Verdict, DEFAULT_TRUST_SCORE},
    verification::VerificationResult,
};

// Re-export pipeline components
pub use pipeline::{
    clean_query, extract_json_payload, parse_judgment, ClaimReader, Judge, JudgmentParseError,
    Pipeline, Researcher,
};

// Re-export clients
pub use ai::GeminiGenerator;
pub use extractors::YellowcakeExtractor;
pub use searchers::SerperSearcher;
pub use security::{SecretString, ServiceCredentials};

// Re-export testing utilities
pub use testing::{MockExtractor, MockGenerator, MockSearcher};
