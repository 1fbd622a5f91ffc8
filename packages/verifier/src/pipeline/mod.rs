//! Verification pipeline - the core of the library.
//!
//! The pipeline runs three stages strictly in order:
//! - Reader: article → search query (the only stage that can fail)
//! - Researcher: query → evidence document (concurrent extraction with
//!   snippet fallback)
//! - Judge: article + evidence → bounded judgment

pub mod judge;
pub mod prompts;
pub mod reader;
pub mod researcher;

pub use judge::{extract_json_payload, parse_judgment, Judge, JudgmentParseError};
pub use prompts::{format_judge_prompt, format_reader_prompt, JUDGE_PROMPT, READER_PROMPT};
pub use reader::{clean_query, ClaimReader};
pub use researcher::Researcher;

use chrono::NaiveDate;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::error::{Result, VerifyError};
use crate::traits::{
    extractor::ContentExtractor, generator::TextGenerator, searcher::WebSearcher,
};
use crate::types::{config::PipelineConfig, verification::VerificationResult};

/// Reader → Researcher → Judge.
///
/// Collaborators are injected at construction; the same generator is
/// shared by the reader and the judge.
///
/// # Example
///
/// ```rust,ignore
/// use verifier::{Pipeline, PipelineConfig, GeminiGenerator, SerperSearcher, YellowcakeExtractor};
///
/// let pipeline = Pipeline::new(
///     GeminiGenerator::from_env()?,
///     SerperSearcher::from_env()?,
///     YellowcakeExtractor::from_env()?,
///     PipelineConfig::default(),
/// );
/// let result = pipeline.verify("Aliens landed in Ohio yesterday").await?;
/// println!("{} ({})", result.verdict, result.trust_score);
/// ```
pub struct Pipeline<G, S, E> {
    reader: ClaimReader<G>,
    researcher: Researcher<S, E>,
    judge: Judge<G>,
}

impl<G, S, E> Pipeline<G, S, E>
where
    G: TextGenerator,
    S: WebSearcher,
    E: ContentExtractor,
{
    /// Create a pipeline from its three collaborators.
    pub fn new(generator: G, searcher: S, extractor: E, config: PipelineConfig) -> Self {
        let generator = Arc::new(generator);
        Self {
            reader: ClaimReader::new(generator.clone()),
            researcher: Researcher::new(searcher, extractor, config),
            judge: Judge::new(generator),
        }
    }

    /// Use a fixed date in the judge prompt (deterministic runs).
    pub fn with_judge_date(mut self, date: NaiveDate) -> Self {
        self.judge = self.judge.with_fixed_date(date);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        self.researcher.config()
    }

    /// Verify an article under a fresh request id.
    pub async fn verify(&self, article: &str) -> Result<VerificationResult> {
        self.verify_with_id(article, Uuid::new_v4()).await
    }

    /// Verify an article, tagging every log line with `request_id`.
    pub async fn verify_with_id(
        &self,
        article: &str,
        request_id: Uuid,
    ) -> Result<VerificationResult> {
        let span = info_span!("verify", request_id = %request_id);
        self.run(article).instrument(span).await
    }

    /// Verify with cancellation support.
    ///
    /// Cancelling drops the in-flight run, which cancels every outstanding
    /// extraction call.
    pub async fn verify_with_cancel(
        &self,
        article: &str,
        request_id: Uuid,
        cancel: CancellationToken,
    ) -> Result<VerificationResult> {
        tokio::select! {
            result = self.verify_with_id(article, request_id) => result,
            _ = cancel.cancelled() => {
                info!(request_id = %request_id, "Verification cancelled");
                Err(VerifyError::Cancelled)
            }
        }
    }

    async fn run(&self, article: &str) -> Result<VerificationResult> {
        info!(article_chars = article.chars().count(), "Verification started");

        let query = self
            .reader
            .extract_query(article)
            .instrument(info_span!("stage", stage = "reader"))
            .await
            .inspect_err(|e| error!(error = %e, "Claim extraction failed"))?;
        info!(search_query = %query, "Search query extracted");

        let evidence = self
            .researcher
            .research(&query)
            .instrument(info_span!("stage", stage = "researcher"))
            .await;

        let judgment = self
            .judge
            .judge(article, &evidence)
            .instrument(info_span!("stage", stage = "judge"))
            .await;

        let result = VerificationResult::new(judgment, query, evidence.count());
        info!(
            trust_score = result.trust_score,
            verdict = %result.verdict,
            sources_checked = result.sources_checked,
            "Verification complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockExtractor, MockGenerator, MockSearcher};
    use crate::traits::searcher::SearchResult;
    use crate::types::judgment::Verdict;
    use std::time::Duration;

    const ARTICLE: &str = "Aliens landed in Ohio yesterday";

    fn generator() -> MockGenerator {
        MockGenerator::new()
            .with_response("professional fact-checker", "Ohio alien landing fact check")
            .with_response(
                "fact-checking judge",
                r#"{"trust_score": 5, "verdict": "Fake", "reasoning": "No credible source corroborates this claim."}"#,
            )
    }

    #[tokio::test]
    async fn test_reader_failure_stops_pipeline() {
        let searcher = MockSearcher::new();
        let pipeline = Pipeline::new(
            MockGenerator::new().failing("quota"),
            searcher.clone(),
            MockExtractor::new(),
            PipelineConfig::default(),
        );

        let err = pipeline.verify(ARTICLE).await.unwrap_err();
        assert!(matches!(err, VerifyError::Generation(_)));
        assert!(searcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_query_flows_into_search() {
        let searcher = MockSearcher::new();
        let pipeline = Pipeline::new(
            generator(),
            searcher.clone(),
            MockExtractor::new(),
            PipelineConfig::default(),
        );

        let result = pipeline.verify(ARTICLE).await.unwrap();
        assert_eq!(result.search_query, "Ohio alien landing fact check");
        assert_eq!(
            searcher.calls(),
            vec![("Ohio alien landing fact check".to_string(), 3)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation() {
        let searcher = MockSearcher::new().with_results(
            "Ohio alien landing fact check",
            vec![SearchResult::from_link("https://slow.com").unwrap()],
        );
        let extractor = MockExtractor::new()
            .with_content("https://slow.com/", "body")
            .with_delay("https://slow.com/", Duration::from_secs(10));
        let pipeline = Pipeline::new(
            generator(),
            searcher,
            extractor,
            PipelineConfig::default().with_extraction_timeout(Duration::from_secs(30)),
        );

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let err = pipeline
            .verify_with_cancel(ARTICLE, Uuid::new_v4(), cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::Cancelled));
    }

    #[tokio::test]
    async fn test_verdict_comes_from_judge() {
        let pipeline = Pipeline::new(
            generator(),
            MockSearcher::new(),
            MockExtractor::new(),
            PipelineConfig::default(),
        );

        let result = pipeline.verify(ARTICLE).await.unwrap();
        assert_eq!(result.verdict, Verdict::Fake);
        assert_eq!(result.trust_score, 5);
        assert_eq!(result.sources_checked, 0);
    }
}
