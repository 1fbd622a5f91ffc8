//! Configuration for the verification pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the research stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum search results requested per query.
    ///
    /// Bounds the extraction fan-out. Default: 3.
    pub search_limit: usize,

    /// Maximum characters of extracted content kept per source.
    ///
    /// Bounds the prompt fed to the judge. Default: 2000.
    pub max_content_per_source: usize,

    /// Upper bound on a single extraction call.
    ///
    /// A timed-out extraction falls back to snippet evidence. Default: 15s.
    #[serde(with = "duration_secs")]
    pub extraction_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_limit: 3,
            max_content_per_source: 2000,
            extraction_timeout: Duration::from_secs(15),
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search result limit.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Set the per-source content cap.
    pub fn with_max_content_per_source(mut self, max: usize) -> Self {
        self.max_content_per_source = max;
        self
    }

    /// Set the per-extraction timeout.
    pub fn with_extraction_timeout(mut self, timeout: Duration) -> Self {
        self.extraction_timeout = timeout;
        self
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
