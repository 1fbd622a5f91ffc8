//! Verdict types produced by the judge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Trust score substituted whenever the judge cannot produce one.
pub const DEFAULT_TRUST_SCORE: u8 = 50;

/// Reasoning used when the model's answer could not be parsed.
pub const PARSE_FAILURE_REASONING: &str =
    "Unable to complete verification due to processing error.";

/// Categorical judgment of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Fake,
    True,
    Unverified,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fake => "Fake",
            Self::True => "True",
            Self::Unverified => "Unverified",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown verdict label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown verdict: {0:?}")]
pub struct UnknownVerdict(pub String);

impl FromStr for Verdict {
    type Err = UnknownVerdict;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fake" => Ok(Self::Fake),
            "true" => Ok(Self::True),
            "unverified" => Ok(Self::Unverified),
            _ => Err(UnknownVerdict(s.to_string())),
        }
    }
}

/// The judge's bounded output. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    /// 0 = completely fake, 100 = completely true
    pub trust_score: u8,
    pub verdict: Verdict,
    /// A single sentence explaining the verdict
    pub reasoning: String,
}

impl Judgment {
    /// Build a judgment, clamping the score into [0, 100].
    pub fn new(trust_score: i64, verdict: Verdict, reasoning: impl Into<String>) -> Self {
        Self {
            trust_score: clamp_trust_score(trust_score),
            verdict,
            reasoning: reasoning.into(),
        }
    }

    /// Neutral judgment carrying an explanation of what went wrong.
    pub fn unverified(reasoning: impl Into<String>) -> Self {
        Self {
            trust_score: DEFAULT_TRUST_SCORE,
            verdict: Verdict::Unverified,
            reasoning: reasoning.into(),
        }
    }

    /// The fixed judgment substituted for unparseable model output.
    pub fn parse_failure() -> Self {
        Self::unverified(PARSE_FAILURE_REASONING)
    }
}

/// Clamp any integer into the trust-score range.
pub fn clamp_trust_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}
