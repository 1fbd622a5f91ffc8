//! The externally visible result of one pipeline run.

use serde::{Deserialize, Serialize};

use super::judgment::{Judgment, Verdict};

/// Assembled once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub trust_score: u8,
    pub verdict: Verdict,
    pub reasoning: String,
    /// The query the researcher searched for
    pub search_query: String,
    /// Number of evidence items the judge saw
    pub sources_checked: usize,
}

impl VerificationResult {
    pub fn new(judgment: Judgment, search_query: String, sources_checked: usize) -> Self {
        Self {
            trust_score: judgment.trust_score,
            verdict: judgment.verdict,
            reasoning: judgment.reasoning,
            search_query,
            sources_checked,
        }
    }
}
