//! Core trait abstractions for the verifier.
//!
//! These traits define the three external services the pipeline consumes.
//! Concrete HTTP clients live in [`crate::ai`], [`crate::searchers`] and
//! [`crate::extractors`]; deterministic fakes live in [`crate::testing`].

pub mod extractor;
pub mod generator;
pub mod searcher;
