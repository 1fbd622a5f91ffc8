//! LLM prompts for the reader and the judge.

/// Prompt for turning an article into a fact-checking search query.
pub const READER_PROMPT: &str = r#"You are a professional fact-checker.
Read the article below and identify the central claim that seems suspicious or requires verification.

Generate a Google Search query (2-8 words) to verify this claim.
Crucial: Construct the query to find INDEPENDENT CONFIRMATION or DEBUNKING articles.
Prefer keywords like "fact check", "official", "snopes", "reuters", or "hoax".

Article:
{article}

Output ONLY the search query string (no quotes):"#;

/// Prompt for comparing the article against the gathered evidence.
pub const JUDGE_PROMPT: &str = r#"You are a fact-checking judge.
Current Date: {current_date}

Compare the ORIGINAL ARTICLE with information from TRUSTED SOURCES below.
Analyze whether the claims in the original article are supported by the trusted sources.
Sources marked as snippet only contain search-result metadata, not the full page.

ORIGINAL ARTICLE:
{article}

TRUSTED SOURCES:
{evidence}

Return your analysis as a JSON object with exactly these fields:
- trust_score: An integer from 0 to 100 (0 = completely fake, 100 = completely true)
- verdict: One of "Fake", "True", or "Unverified"
- reasoning: A single sentence explaining your verdict

Output ONLY the JSON object, no other text."#;

/// Format the reader prompt.
pub fn format_reader_prompt(article: &str) -> String {
    render(READER_PROMPT, &[("article", article)])
}

/// Format the judge prompt. `current_date` is rendered as given.
pub fn format_judge_prompt(current_date: &str, article: &str, evidence: &str) -> String {
    render(
        JUDGE_PROMPT,
        &[
            ("current_date", current_date),
            ("article", article),
            ("evidence", evidence),
        ],
    )
}

/// Substitute `{name}` placeholders in one pass over the template.
///
/// Substituted text is never rescanned, so braces inside an article or a
/// scraped page come through verbatim.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let var = vars.iter().find(|(name, _)| {
            tail.strip_prefix(*name)
                .is_some_and(|after| after.starts_with('}'))
        });
        match var {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_prompt_embeds_article() {
        let prompt = format_reader_prompt("Aliens landed in Ohio yesterday");
        assert!(prompt.contains("Aliens landed in Ohio yesterday"));
        assert!(prompt.contains("fact check"));
        assert!(!prompt.contains("{article}"));
    }

    #[test]
    fn test_judge_prompt_embeds_all_parts() {
        let prompt = format_judge_prompt("2026-10-19", "the article", "the evidence");
        assert!(prompt.contains("Current Date: 2026-10-19"));
        assert!(prompt.contains("ORIGINAL ARTICLE:\nthe article"));
        assert!(prompt.contains("TRUSTED SOURCES:\nthe evidence"));
        assert!(prompt.contains("trust_score"));
    }

    #[test]
    fn test_judge_prompt_leaves_placeholders_in_article_alone() {
        let prompt = format_judge_prompt(
            "2026-10-19",
            "Template var {evidence} appears here",
            "snopes: false",
        );
        assert_eq!(prompt.matches("snopes: false").count(), 1);
        assert!(prompt.contains("Template var {evidence} appears here"));
    }

    #[test]
    fn test_judge_prompt_evidence_is_not_expanded() {
        let prompt = format_judge_prompt("2026-10-19", "the article", "page text {article} {x}");
        assert_eq!(prompt.matches("the article").count(), 1);
        assert!(prompt.contains("page text {article} {x}"));
    }
}
