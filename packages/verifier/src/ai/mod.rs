//! Text generation provider implementations.

mod gemini;

pub use gemini::{GeminiGenerator, GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL};
