//! Claim extraction: article text in, search query out.

use std::sync::Arc;
use tracing::debug;

use crate::error::{Result, VerifyError};
use crate::pipeline::prompts::format_reader_prompt;
use crate::traits::generator::TextGenerator;

/// Characters removed from the model's query.
const QUOTE_CHARS: &[char] = &['"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Turns an article into a search query with one generation call.
///
/// No retries happen here; a failed generation is returned as is.
pub struct ClaimReader<G> {
    generator: Arc<G>,
}

impl<G: TextGenerator> ClaimReader<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Produce a search query for `article`.
    ///
    /// Fails with a generation error if the model fails, or with
    /// [`VerifyError::EmptyGeneration`] if nothing is left after cleaning.
    pub async fn extract_query(&self, article: &str) -> Result<String> {
        let prompt = format_reader_prompt(article);
        let raw = self.generator.generate(&prompt).await?;
        debug!(
            generator = self.generator.name(),
            raw_len = raw.len(),
            "Reader response received"
        );

        let query = clean_query(&raw);
        if query.is_empty() {
            return Err(VerifyError::EmptyGeneration);
        }

        Ok(query)
    }
}

/// Strip quote characters and surrounding whitespace.
///
/// Content is otherwise passed through untouched.
pub fn clean_query(raw: &str) -> String {
    raw.chars()
        .filter(|c| !QUOTE_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}
