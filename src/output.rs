//! Result types returned by [`crate::generate`].

use serde::{Deserialize, Serialize};

/// Text used for every [`ContentSummary`] field.
pub const AUTO_GENERATED: &str = "Auto-generated in HTML";

/// Everything produced by one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Final HTML/CSS with images inlined.
    pub html: String,
    /// Encoded data URIs in input order (`IMAGE_1` first).
    pub images: Vec<String>,
    pub generated_content: ContentSummary,
    pub stats: GenerationStats,
}

/// Copy blocks of the generated page.
///
/// The copy lives inside [`GenerationResult::html`]; these fields are fixed
/// placeholders and are not parsed out of the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSummary {
    pub headline: String,
    pub subheadline: String,
    pub cta_text: String,
    pub features: String,
}

impl Default for ContentSummary {
    fn default() -> Self {
        Self {
            headline: AUTO_GENERATED.to_string(),
            subheadline: AUTO_GENERATED.to_string(),
            cta_text: AUTO_GENERATED.to_string(),
            features: AUTO_GENERATED.to_string(),
        }
    }
}

/// Timing and size figures for one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Number of images embedded.
    pub image_count: usize,
    /// Feature slots requested in the prompt.
    pub feature_count: usize,
    /// Prompt length in bytes.
    pub prompt_bytes: usize,
    /// Final HTML length in bytes.
    pub html_bytes: usize,
    /// Wall-clock time of the completion request.
    pub llm_duration_ms: u64,
    /// Wall-clock time of the whole call.
    pub total_duration_ms: u64,
}
