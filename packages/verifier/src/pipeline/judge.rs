//! Verdict judging: article and evidence in, bounded judgment out.
//!
//! The model is asked for a bare JSON object but frequently wraps it in a
//! markdown fence. [`extract_json_payload`] picks the payload with fixed
//! precedence and [`parse_judgment`] validates it. Any failure, including
//! a failed generation call, resolves to a neutral `Unverified` judgment.

use chrono::{Local, NaiveDate};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::pipeline::prompts::format_judge_prompt;
use crate::traits::generator::TextGenerator;
use crate::types::{
    evidence::EvidenceDocument,
    judgment::{clamp_trust_score, Judgment, Verdict},
};

const FENCE: &str = "```";

/// Why a model response could not be turned into a judgment.
#[derive(Debug, Error)]
pub enum JudgmentParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("trust score is not a number: {0}")]
    InvalidScore(String),

    #[error("unknown verdict: {0}")]
    UnknownVerdict(String),

    #[error("reasoning is empty")]
    EmptyReasoning,
}

/// Compares an article against evidence. Never fails outward.
pub struct Judge<G> {
    generator: Arc<G>,
    fixed_date: Option<NaiveDate>,
}

impl<G: TextGenerator> Judge<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self {
            generator,
            fixed_date: None,
        }
    }

    /// Use a fixed "current date" in the prompt instead of the clock.
    pub fn with_fixed_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    pub async fn judge(&self, article: &str, evidence: &EvidenceDocument) -> Judgment {
        let today = self
            .fixed_date
            .unwrap_or_else(|| Local::now().date_naive());
        let prompt = format_judge_prompt(
            &today.format("%Y-%m-%d").to_string(),
            article,
            evidence.as_str(),
        );

        let response = match self.generator.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    generator = self.generator.name(),
                    error = %e,
                    "Judge generation failed, returning default judgment"
                );
                return Judgment::unverified(format!("Unable to complete verification: {}", e));
            }
        };

        match parse_judgment(&response) {
            Ok(judgment) => {
                debug!(
                    generator = self.generator.name(),
                    trust_score = judgment.trust_score,
                    verdict = %judgment.verdict,
                    "Judgment parsed"
                );
                judgment
            }
            Err(e) => {
                warn!(error = %e, response_len = response.len(), "Unparseable judgment, returning default");
                Judgment::parse_failure()
            }
        }
    }
}

/// Pick the JSON payload out of a model response.
///
/// Precedence:
/// 1. the first fenced block carrying a language tag (e.g. `` ```json ``)
/// 2. the first fenced block without a tag
/// 3. the whole response, trimmed
///
/// An unterminated fence runs to the end of the text.
pub fn extract_json_payload(text: &str) -> &str {
    let blocks = fenced_blocks(text);

    if let Some(block) = blocks.iter().find(|b| b.tagged) {
        return block.body;
    }
    if let Some(block) = blocks.first() {
        return block.body;
    }
    text.trim()
}

struct FencedBlock<'a> {
    tagged: bool,
    body: &'a str,
}

fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];

        // A language tag is a leading run of tag characters; whatever
        // follows it on the fence line already belongs to the body.
        let tag_len = language_tag_len(after_open);
        let tagged = tag_len > 0;
        let body_start = &after_open[tag_len..];

        match body_start.find(FENCE) {
            Some(close) => {
                blocks.push(FencedBlock {
                    tagged,
                    body: body_start[..close].trim(),
                });
                rest = &body_start[close + FENCE.len()..];
            }
            None => {
                blocks.push(FencedBlock {
                    tagged,
                    body: body_start.trim(),
                });
                break;
            }
        }
    }

    blocks
}

fn language_tag_len(text: &str) -> usize {
    if !text.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return 0;
    }
    text.find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
        .unwrap_or(text.len())
}

/// Parse a model response into a judgment.
///
/// `trust_score` may also be spelled `trustScore`, and may be an integer,
/// a float (rounded) or a numeric string. Scores are clamped to [0, 100].
pub fn parse_judgment(response: &str) -> Result<Judgment, JudgmentParseError> {
    let payload = extract_json_payload(response);
    let value: Value = serde_json::from_str(payload)?;
    let object = value.as_object().ok_or(JudgmentParseError::NotAnObject)?;

    let score = object
        .get("trust_score")
        .or_else(|| object.get("trustScore"))
        .ok_or(JudgmentParseError::MissingField("trust_score"))?;
    let trust_score = parse_score(score)?;

    let verdict = object
        .get("verdict")
        .and_then(Value::as_str)
        .ok_or(JudgmentParseError::MissingField("verdict"))?
        .parse::<Verdict>()
        .map_err(|e| JudgmentParseError::UnknownVerdict(e.0))?;

    let reasoning = object
        .get("reasoning")
        .and_then(Value::as_str)
        .ok_or(JudgmentParseError::MissingField("reasoning"))?
        .trim();
    if reasoning.is_empty() {
        return Err(JudgmentParseError::EmptyReasoning);
    }

    Ok(Judgment {
        trust_score,
        verdict,
        reasoning: reasoning.to_string(),
    })
}

fn parse_score(value: &Value) -> Result<u8, JudgmentParseError> {
    let number = match value {
        Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(clamp_trust_score(n.round() as i64)),
        _ => Err(JudgmentParseError::InvalidScore(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGenerator;
    use crate::types::judgment::PARSE_FAILURE_REASONING;

    const BODY: &str = r#"{"trust_score": 5, "verdict": "Fake", "reasoning": "No credible source corroborates this claim."}"#;

    // =========================================================================
    // Payload extraction
    // =========================================================================

    #[test]
    fn test_extract_tagged_fence() {
        let text = format!("Here you go:\n```json\n{}\n```\nThanks", BODY);
        assert_eq!(extract_json_payload(&text), BODY);
    }

    #[test]
    fn test_extract_untagged_fence() {
        let text = format!("```\n{}\n```", BODY);
        assert_eq!(extract_json_payload(&text), BODY);
    }

    #[test]
    fn test_extract_raw() {
        let text = format!("\n  {}  \n", BODY);
        assert_eq!(extract_json_payload(&text), BODY);
    }

    #[test]
    fn test_tagged_fence_wins_over_earlier_untagged() {
        let text = format!("```\nnot it\n```\n```json\n{}\n```", BODY);
        assert_eq!(extract_json_payload(&text), BODY);
    }

    #[test]
    fn test_uppercase_tag_counts_as_tagged() {
        let text = format!("```JSON\n{}\n```", BODY);
        assert_eq!(extract_json_payload(&text), BODY);
    }

    #[test]
    fn test_inline_fence_without_newline() {
        let text = format!("```{}```", BODY);
        assert_eq!(extract_json_payload(&text), BODY);
    }

    #[test]
    fn test_tagged_fence_with_body_on_fence_line() {
        let text = format!("```json {}\n```", BODY);
        assert_eq!(extract_json_payload(&text), BODY);
        assert_eq!(parse_judgment(&text).unwrap().trust_score, 5);
    }

    #[test]
    fn test_tagged_fence_glued_to_body() {
        let text = format!("```json{}```", BODY);
        assert_eq!(extract_json_payload(&text), BODY);
        assert_eq!(parse_judgment(&text).unwrap().verdict, Verdict::Fake);
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let text = format!("```json\n{}\n", BODY);
        assert_eq!(extract_json_payload(&text), BODY);
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn test_parse_valid() {
        let judgment = parse_judgment(BODY).unwrap();
        assert_eq!(judgment.trust_score, 5);
        assert_eq!(judgment.verdict, Verdict::Fake);
        assert_eq!(judgment.reasoning, "No credible source corroborates this claim.");
    }

    #[test]
    fn test_parse_camel_case_and_float_score() {
        let judgment =
            parse_judgment(r#"{"trustScore": 72.6, "verdict": "true", "reasoning": "Matches."}"#)
                .unwrap();
        assert_eq!(judgment.trust_score, 73);
        assert_eq!(judgment.verdict, Verdict::True);
    }

    #[test]
    fn test_parse_string_score() {
        let judgment =
            parse_judgment(r#"{"trust_score": "40", "verdict": "Unverified", "reasoning": "Thin."}"#)
                .unwrap();
        assert_eq!(judgment.trust_score, 40);
    }

    #[test]
    fn test_parse_clamps_out_of_range() {
        let high =
            parse_judgment(r#"{"trust_score": 250, "verdict": "True", "reasoning": "r"}"#).unwrap();
        let low =
            parse_judgment(r#"{"trust_score": -20, "verdict": "Fake", "reasoning": "r"}"#).unwrap();
        assert_eq!(high.trust_score, 100);
        assert_eq!(low.trust_score, 0);
    }

    #[test]
    fn test_parse_missing_fields() {
        assert!(matches!(
            parse_judgment(r#"{"verdict": "Fake", "reasoning": "r"}"#),
            Err(JudgmentParseError::MissingField("trust_score"))
        ));
        assert!(matches!(
            parse_judgment(r#"{"trust_score": 1, "reasoning": "r"}"#),
            Err(JudgmentParseError::MissingField("verdict"))
        ));
        assert!(matches!(
            parse_judgment(r#"{"trust_score": 1, "verdict": "Fake"}"#),
            Err(JudgmentParseError::MissingField("reasoning"))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(matches!(
            parse_judgment(r#"{"trust_score": 1, "verdict": "Misleading", "reasoning": "r"}"#),
            Err(JudgmentParseError::UnknownVerdict(_))
        ));
        assert!(matches!(
            parse_judgment(r#"{"trust_score": "high", "verdict": "Fake", "reasoning": "r"}"#),
            Err(JudgmentParseError::InvalidScore(_))
        ));
        assert!(matches!(
            parse_judgment(r#"{"trust_score": 1, "verdict": "Fake", "reasoning": "  "}"#),
            Err(JudgmentParseError::EmptyReasoning)
        ));
        assert!(matches!(
            parse_judgment("[1, 2, 3]"),
            Err(JudgmentParseError::NotAnObject)
        ));
        assert!(matches!(
            parse_judgment("The article is fake."),
            Err(JudgmentParseError::Json(_))
        ));
    }

    // =========================================================================
    // Judge
    // =========================================================================

    #[tokio::test]
    async fn test_judge_parses_fenced_response() {
        let generator =
            Arc::new(MockGenerator::new().with_default(format!("```json\n{}\n```", BODY)));
        let judge = Judge::new(generator);

        let judgment = judge
            .judge("Aliens landed in Ohio", &EvidenceDocument::no_sources())
            .await;
        assert_eq!(judgment.verdict, Verdict::Fake);
        assert_eq!(judgment.trust_score, 5);
    }

    #[tokio::test]
    async fn test_judge_defaults_on_garbage() {
        let generator = Arc::new(MockGenerator::new().with_default("I think it is fake"));
        let judge = Judge::new(generator);

        let judgment = judge.judge("article", &EvidenceDocument::no_sources()).await;
        assert_eq!(judgment, Judgment::parse_failure());
        assert_eq!(judgment.reasoning, PARSE_FAILURE_REASONING);
    }

    #[tokio::test]
    async fn test_judge_defaults_on_generation_error() {
        let generator = Arc::new(MockGenerator::new().failing("503 from provider"));
        let judge = Judge::new(generator);

        let judgment = judge.judge("article", &EvidenceDocument::no_sources()).await;
        assert_eq!(judgment.trust_score, 50);
        assert_eq!(judgment.verdict, Verdict::Unverified);
        assert!(judgment.reasoning.contains("503 from provider"));
    }

    #[tokio::test]
    async fn test_judge_prompt_contains_date_article_and_evidence() {
        let generator = Arc::new(MockGenerator::new().with_default(BODY));
        let judge = Judge::new(generator.clone())
            .with_fixed_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());

        judge
            .judge("Aliens landed in Ohio", &EvidenceDocument::no_sources())
            .await;

        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("Current Date: 2026-10-19"));
        assert!(prompt.contains("Aliens landed in Ohio"));
        assert!(prompt.contains("No sources found for verification."));
    }
}
