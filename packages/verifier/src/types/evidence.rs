//! Evidence gathered by the researcher and handed to the judge.

use serde::{Deserialize, Serialize};

use crate::traits::searcher::SearchResult;

/// Text of the evidence document when the search returned nothing.
pub const NO_SOURCES_FOUND: &str = "No sources found for verification.";

/// Separator placed between evidence items.
pub const EVIDENCE_SEPARATOR: &str = "\n\n---\n\n";

/// Marker line on items built from search metadata only.
pub const SNIPPET_ONLY_MARKER: &str = "[Snippet only - full content unavailable]";

/// How an evidence item was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// Extracted page content, truncated to the per-source cap.
    FullContent,

    /// Built from the search result's title, snippet and date.
    SnippetOnly,
}

/// One unit of evidence tied to one search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub kind: EvidenceKind,

    /// Source link, when the search result carried one
    pub link: Option<String>,

    /// Rendered text as it appears in the evidence document
    pub text: String,
}

impl EvidenceItem {
    /// Build an item from extracted content, keeping at most `max_chars`
    /// characters of the content.
    pub fn full_content(result: &SearchResult, content: &str, max_chars: usize) -> Self {
        let truncated = truncate_chars(content.trim(), max_chars);
        let text = format!("{}\n{}", header(result), truncated);

        Self {
            kind: EvidenceKind::FullContent,
            link: result.link_str(),
            text,
        }
    }

    /// Build an item from the search result's own metadata.
    pub fn snippet_only(result: &SearchResult) -> Self {
        let text = format!(
            "{}\n{}\n{}",
            header(result),
            SNIPPET_ONLY_MARKER,
            result.snippet.trim()
        );

        Self {
            kind: EvidenceKind::SnippetOnly,
            link: result.link_str(),
            text,
        }
    }

    pub fn is_snippet_only(&self) -> bool {
        self.kind == EvidenceKind::SnippetOnly
    }
}

fn header(result: &SearchResult) -> String {
    let source = result
        .link
        .as_ref()
        .map(|u| u.as_str())
        .unwrap_or("(no link)");
    format!(
        "Source: {}\nTitle: {}\nPublished: {}",
        source,
        result.title.trim(),
        result.published_date
    )
}

/// Keep the first `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Ordered concatenation of evidence items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceDocument {
    items: Vec<EvidenceItem>,
    text: String,
}

impl EvidenceDocument {
    /// The sentinel document used when the search returned nothing.
    pub fn no_sources() -> Self {
        Self {
            items: Vec::new(),
            text: NO_SOURCES_FOUND.to_string(),
        }
    }

    /// Join items in the given order. An empty list yields the sentinel.
    pub fn from_items(items: Vec<EvidenceItem>) -> Self {
        if items.is_empty() {
            return Self::no_sources();
        }

        let text = items
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join(EVIDENCE_SEPARATOR);

        Self { items, text }
    }

    /// Number of items included.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[EvidenceItem] {
        &self.items
    }

    /// Text handed to the judge.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_no_sources(&self) -> bool {
        self.items.is_empty()
    }
}
