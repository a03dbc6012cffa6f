//! Remote completion call: one POST, one answer.
//!
//! The endpoint speaks the OpenAI-style text completion dialect
//! (`POST /v1/completions` with `{model, prompt, max_tokens, …}` returning
//! `{"choices": [{"text": …}]}`). All prompt engineering lives in
//! [`crate::prompts`]; this module only moves bytes.
//!
//! There is no retry and no streaming. Any status other than 200 becomes
//! [`BrandPageError::Api`] carrying the status code and raw body. A 200 whose
//! JSON lacks `choices` or `text` yields an empty string rather than an error.

use crate::config::GeneratorSettings;
use crate::error::BrandPageError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// JSON body of a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stop: &'a [String],
}

/// The subset of the completion response we read.
#[derive(Debug, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<CompletionChoice>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub text: Option<String>,
}

impl CompletionResponse {
    /// `choices[0].text`, trimmed; empty when either is missing.
    pub fn first_text(&self) -> String {
        self.choices
            .as_deref()
            .and_then(|c| c.first())
            .and_then(|c| c.text.as_deref())
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    }
}

/// Thin client for the completion endpoint.
///
/// Holds a `reqwest::Client` and the request constants. Cheap to clone and
/// free of mutable state, so one instance may serve concurrent callers.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    settings: GeneratorSettings,
}

impl CompletionClient {
    pub fn new(settings: &GeneratorSettings) -> Result<Self, BrandPageError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            settings: settings.clone(),
        })
    }

    /// Build the JSON body for `prompt`.
    pub fn request_body<'a>(&'a self, prompt: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.settings.model,
            prompt,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
            stop: &self.settings.stop,
        }
    }

    /// Send `prompt` and return the generated text, trimmed.
    pub async fn complete(&self, prompt: &str) -> Result<String, BrandPageError> {
        let start = Instant::now();
        debug!(
            "POST {} (model {}, {} prompt bytes)",
            self.settings.endpoint,
            self.settings.model,
            prompt.len()
        );

        let response = self
            .http
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Completion endpoint answered {} in {:?}", status, start.elapsed());

        if status != StatusCode::OK {
            return Err(BrandPageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| BrandPageError::MalformedResponse(e.to_string()))?;
        let text = parsed.first_text();
        if text.is_empty() {
            warn!("Completion response carried no text; the page will be empty");
        }
        Ok(text)
    }
}
