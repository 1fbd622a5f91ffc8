// Agentic Fake News Detector - API Core
//
// HTTP host for the verification pipeline. The pipeline itself lives in the
// `verifier` crate; this crate wires real clients from configuration and
// exposes them over axum.

pub mod config;
pub mod server;

pub use config::*;
